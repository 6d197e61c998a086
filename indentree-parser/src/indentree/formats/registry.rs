//! Format registry for tree serialization
//!
//! Each output format implements [`Format`] and is looked up by name in a [`FormatRegistry`].

use super::FormatOptions;
use crate::indentree::tree::snapshot::NodeSnapshot;
use crate::indentree::tree::{NodeId, Tree};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// A named way of turning a subtree into text.
pub trait Format: Send + Sync {
    /// The name of this format (e.g., "tag", "treeviz")
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Serialize the subtree rooted at `node`
    fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        options: &FormatOptions,
    ) -> Result<String, FormatError>;
}

/// Snapshot `node`, refusing ids the tree doesn't know.
pub(crate) fn snapshot_of(tree: &Tree, node: NodeId) -> Result<NodeSnapshot, FormatError> {
    if !tree.contains(node) {
        return Err(FormatError::Serialization(format!("unknown node {node}")));
    }
    Ok(tree.snapshot(node))
}

pub struct FormatRegistry {
    formats: HashMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formats: HashMap::new(),
        }
    }

    /// Register a format, replacing any format with the same name
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Format> {
        self.formats.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    pub fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        format: &str,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        let format = self
            .get(format)
            .ok_or_else(|| FormatError::FormatNotFound(format.to_string()))?;
        format.serialize(tree, node, options)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description pairs, sorted by name
    pub fn describe(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .formats
            .values()
            .map(|f| (f.name(), f.description()))
            .collect();
        entries.sort();
        entries
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::TagFormat);
        registry.register(super::TreevizFormat);
        registry.register(super::JsonFormat);
        registry.register(super::YamlFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoFormat;
    impl Format for EchoFormat {
        fn name(&self) -> &str {
            "echo"
        }
        fn serialize(
            &self,
            tree: &Tree,
            node: NodeId,
            _options: &FormatOptions,
        ) -> Result<String, FormatError> {
            Ok(tree.name(node).unwrap_or_default().to_string())
        }
        fn description(&self) -> &str {
            "Echoes the node name"
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(EchoFormat);
        let tree = Tree::new("doc");

        assert!(registry.has("echo"));
        assert_eq!(
            registry.serialize(&tree, tree.root(), "echo", &FormatOptions::default()),
            Ok("doc".to_string())
        );
    }

    #[test]
    fn test_registry_replace_format() {
        let mut registry = FormatRegistry::new();
        registry.register(EchoFormat);
        registry.register(EchoFormat);
        assert_eq!(registry.list_formats(), vec!["echo"]);
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        let tree = Tree::new("doc");
        let result = registry.serialize(&tree, tree.root(), "nope", &FormatOptions::default());

        assert_eq!(result, Err(FormatError::FormatNotFound("nope".to_string())));
        assert_eq!(result.unwrap_err().to_string(), "Format 'nope' not found");
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "tag", "treeviz", "yaml"]
        );
        assert!(registry.describe().iter().all(|(_, desc)| !desc.is_empty()));
    }

    #[test]
    fn test_unknown_node_is_a_serialization_error() {
        let registry = FormatRegistry::default();
        let tree = Tree::new("doc");
        let mut other = Tree::new("other");
        let foreign = other.create_element("x");

        let result = registry.serialize(&tree, foreign, "tag", &FormatOptions::default());
        assert!(matches!(result, Err(FormatError::Serialization(_))));
    }
}
