//! Node tree
//!
//!     The tree is an arena: every node lives in one `Vec` owned by [`Tree`] and is addressed by a
//!     copyable [`NodeId`]. Parent links are plain ids, so the builder can hold on to ancestors
//!     while it appends under descendants without juggling borrows.
//!
//!     A node is either an element (a name plus ordered string attributes) or a text leaf. Each
//!     node has at most one parent, children keep insertion order, and nothing is ever removed.
//!     Nodes can be created detached and attached later with [`Tree::append_child`], which is how
//!     line parsers hand their nodes to the builder.
//!
//!     Layout is not stored in the tree. Serializers in [`crate::indentree::formats`] indent by
//!     depth when they print.

mod error;
pub mod snapshot;

pub use error::TreeError;
pub use snapshot::NodeSnapshot;

use std::fmt;

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// 1-based source line that produced the node, when known
    line: Option<usize>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            line: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Text(_) => &[],
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.kind, NodeKind::Text(_))
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }
}

/// Arena of nodes with a single synthetic root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Create a tree holding only a root element named `root_name`.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = Node::new(NodeKind::Element {
            name: root_name.into(),
            attributes: Vec::new(),
        });
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.nodes.get_mut(id.0).ok_or(TreeError::UnknownNode(id))
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(Node::new(NodeKind::Element {
            name: name.into(),
            attributes: Vec::new(),
        }))
    }

    /// Create a detached text leaf.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(Node::new(NodeKind::Text(text.into())))
    }

    /// Set an attribute on an element. An existing key keeps its position.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), TreeError> {
        let node = self.get_mut(id)?;
        match &mut node.kind {
            NodeKind::Element { attributes, .. } => {
                let key = key.into();
                let value = value.into();
                match attributes.iter_mut().find(|(k, _)| *k == key) {
                    Some(slot) => slot.1 = value,
                    None => attributes.push((key, value)),
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(TreeError::NotAnElement(id)),
        }
    }

    pub fn set_line(&mut self, id: NodeId, line: usize) -> Result<(), TreeError> {
        self.get_mut(id)?.line = Some(line);
        Ok(())
    }

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), TreeError> {
        if !self.contains(child) {
            return Err(TreeError::UnknownNode(child));
        }
        if child == self.root {
            return Err(TreeError::RootAsChild);
        }
        match self.get(parent).map(|node| &node.kind) {
            None => return Err(TreeError::UnknownNode(parent)),
            Some(NodeKind::Text(_)) => return Err(TreeError::NotAnElement(parent)),
            Some(NodeKind::Element { .. }) => {}
        }
        if let Some(current) = self.nodes[child.0].parent {
            return Err(TreeError::AlreadyAttached {
                node: child,
                parent: current,
            });
        }
        if parent == child || self.ancestors(parent).any(|id| id == child) {
            return Err(TreeError::Cycle { parent, child });
        }

        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        Ok(())
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::name)
    }

    pub fn attribute(&self, id: NodeId, key: &str) -> Option<&str> {
        self.get(id).and_then(|node| node.attribute(key))
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.get(id).map(Node::attributes).unwrap_or(&[])
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::text)
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(Node::is_text)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Children that are elements, skipping text leaves.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| !self.is_text(*child))
    }

    /// First element child with the given name.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.element_children(id)
            .find(|child| self.name(*child) == Some(name))
    }

    /// Every text leaf below `id`, concatenated in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.descendants(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }

    /// Ancestors of `id`, nearest first. `id` itself is not included.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Number of edges between `id` and the top of its subtree (0 for the root).
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }

    /// `id` and all nodes below it, in pre-order.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.contains(id) { vec![id] } else { vec![] };
        Descendants { tree: self, stack }
    }
}

pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}
