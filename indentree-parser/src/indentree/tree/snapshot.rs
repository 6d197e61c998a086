//! Tree snapshot - a normalized, owned copy of a subtree
//!
//! Serializers consume snapshots instead of walking the arena themselves, so traversal lives in
//! one place and each format only deals with presentation. Snapshots serialize with serde;
//! attributes keep their source order in every output format.

use super::{NodeId, NodeKind, Tree};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotKind {
    Element,
    Text,
}

/// A snapshot of one node and everything below it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSnapshot {
    pub kind: SnapshotKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        serialize_with = "serialize_ordered",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// One-line description used by tree views: the element name followed by its attributes,
    /// or the text itself for text leaves.
    pub fn display_label(&self) -> String {
        match self.kind {
            SnapshotKind::Text => self.text.clone().unwrap_or_default(),
            SnapshotKind::Element => {
                let mut label = self.name.clone().unwrap_or_default();
                for (key, value) in &self.attributes {
                    label.push_str(&format!(" {}={:?}", key, value));
                }
                label
            }
        }
    }
}

fn serialize_ordered<S>(attributes: &[(String, String)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(attributes.len()))?;
    for (key, value) in attributes {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Snapshot the subtree rooted at `id`. Unknown ids produce an empty element snapshot.
pub fn snapshot_node(tree: &Tree, id: NodeId) -> NodeSnapshot {
    let Some(node) = tree.get(id) else {
        return NodeSnapshot {
            kind: SnapshotKind::Element,
            name: None,
            text: None,
            attributes: Vec::new(),
            line: None,
            children: Vec::new(),
        };
    };

    let children = node
        .children()
        .iter()
        .map(|child| snapshot_node(tree, *child))
        .collect();

    match &node.kind {
        NodeKind::Element { name, attributes } => NodeSnapshot {
            kind: SnapshotKind::Element,
            name: Some(name.clone()),
            text: None,
            attributes: attributes.clone(),
            line: node.line(),
            children,
        },
        NodeKind::Text(text) => NodeSnapshot {
            kind: SnapshotKind::Text,
            name: None,
            text: Some(text.clone()),
            attributes: Vec::new(),
            line: node.line(),
            children,
        },
    }
}

impl Tree {
    pub fn snapshot(&self, id: NodeId) -> NodeSnapshot {
        snapshot_node(self, id)
    }
}
