//! Output formats
//!
//!     Serializers for built trees. All of them work from a
//!     [`NodeSnapshot`](crate::indentree::tree::snapshot::NodeSnapshot) and are looked up by name
//!     through the [`FormatRegistry`].
//!
//!     - `tag`: XML-like tags
//!     - `treeviz`: one line per node with box connectors
//!     - `json`, `yaml`: the snapshot through serde

mod data;
mod registry;
mod tag;
mod treeviz;

pub use data::{JsonFormat, YamlFormat};
pub use registry::{Format, FormatError, FormatRegistry};
pub use tag::{serialize_tree as to_tag_str, TagFormat};
pub use treeviz::{to_treeviz_str, TreevizFormat};

use serde::{Deserialize, Serialize};

/// Presentation settings shared by the formats. Formats ignore what doesn't apply to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// One level of indentation in `tag` output
    pub indent: String,
    /// Prefix `treeviz` lines with source line numbers
    pub show_line_numbers: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            show_line_numbers: false,
        }
    }
}
