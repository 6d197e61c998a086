//! XML-like tag serialization
//!
//! ## Format
//!
//! - Element → `<name key="value">`, children nested one indent deeper
//! - Element with only text children → text inline between the tags
//! - Element without children → `<name/>`
//! - Text leaf beside elements → its own line
//!
//! ## Example
//!
//! ```text
//! <root>
//!   <section title="Intro">
//!     <p>Welcome</p>
//!     <code lang="rust">
//!       <body>fn main() {}
//! </body>
//!     </code>
//!   </section>
//! </root>
//! ```
//!
//! Text is written as is apart from escaping, so multi-line bodies keep their line breaks.

use super::registry::{snapshot_of, Format, FormatError};
use super::FormatOptions;
use crate::indentree::tree::snapshot::{NodeSnapshot, SnapshotKind};
use crate::indentree::tree::{NodeId, Tree};
use html_escape::{encode_double_quoted_attribute, encode_text};

struct TagSerializer<'a> {
    output: String,
    indent: &'a str,
    level: usize,
}

impl<'a> TagSerializer<'a> {
    fn new(indent: &'a str) -> Self {
        Self {
            output: String::new(),
            indent,
            level: 0,
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.level {
            self.output.push_str(self.indent);
        }
    }

    fn serialize_snapshot(&mut self, snapshot: &NodeSnapshot) {
        if snapshot.kind == SnapshotKind::Text {
            self.push_indent();
            self.output
                .push_str(&encode_text(snapshot.text.as_deref().unwrap_or_default()));
            self.output.push('\n');
            return;
        }

        let name = snapshot.name.as_deref().unwrap_or_default();
        self.push_indent();
        self.output.push('<');
        self.output.push_str(name);
        for (key, value) in &snapshot.attributes {
            self.output.push(' ');
            self.output.push_str(key);
            self.output.push_str("=\"");
            self.output.push_str(&encode_double_quoted_attribute(value));
            self.output.push('"');
        }

        if snapshot.children.is_empty() {
            self.output.push_str("/>\n");
            return;
        }
        self.output.push('>');

        if snapshot
            .children
            .iter()
            .all(|child| child.kind == SnapshotKind::Text)
        {
            for child in &snapshot.children {
                self.output
                    .push_str(&encode_text(child.text.as_deref().unwrap_or_default()));
            }
        } else {
            self.output.push('\n');
            self.level += 1;
            for child in &snapshot.children {
                self.serialize_snapshot(child);
            }
            self.level -= 1;
            self.push_indent();
        }

        self.output.push_str("</");
        self.output.push_str(name);
        self.output.push_str(">\n");
    }
}

/// Serialize the subtree at `node` to tags.
pub fn serialize_tree(
    tree: &Tree,
    node: NodeId,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let snapshot = snapshot_of(tree, node)?;
    let mut serializer = TagSerializer::new(&options.indent);
    serializer.serialize_snapshot(&snapshot);
    Ok(serializer.output)
}

pub struct TagFormat;

impl Format for TagFormat {
    fn name(&self) -> &str {
        "tag"
    }

    fn description(&self) -> &str {
        "XML-like tags with attributes, one element per line"
    }

    fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        serialize_tree(tree, node, options)
    }
}
