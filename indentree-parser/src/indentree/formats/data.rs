//! JSON and YAML output
//!
//! Both formats write the node snapshot as is. Keys that carry nothing (no attributes, no
//! children, no line) are left out, and attributes keep their source order.

use super::registry::{snapshot_of, Format, FormatError};
use super::FormatOptions;
use crate::indentree::tree::{NodeId, Tree};

pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON of the node snapshot"
    }

    fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        _options: &FormatOptions,
    ) -> Result<String, FormatError> {
        let snapshot = snapshot_of(tree, node)?;
        let mut output = serde_json::to_string_pretty(&snapshot)
            .map_err(|err| FormatError::Serialization(err.to_string()))?;
        output.push('\n');
        Ok(output)
    }
}

pub struct YamlFormat;

impl Format for YamlFormat {
    fn name(&self) -> &str {
        "yaml"
    }

    fn description(&self) -> &str {
        "YAML of the node snapshot"
    }

    fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        _options: &FormatOptions,
    ) -> Result<String, FormatError> {
        let snapshot = snapshot_of(tree, node)?;
        serde_yaml::to_string(&snapshot).map_err(|err| FormatError::Serialization(err.to_string()))
    }
}
