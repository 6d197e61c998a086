//! Fluent assertions for built trees
//!
//!     Tests that walk the arena by hand get long and tend to check only counts. The assertions
//!     here read top-down like the document they check, and every failure names the path to the
//!     offending node (`root[0][1]`).
//!
//!     ```rust,ignore
//!     use indentree_parser::indentree::testing::assert_tree;
//!
//!     let tree = build("a\n  b\n  c {\n    raw\n  }\n", &DeclineAll);
//!
//!     assert_tree(&tree).child_count(1).child(0, |a| {
//!         a.attr("text", "a")
//!             .child_count(2)
//!             .child(1, |c| c.attr("text", "c").body_text("raw\n"))
//!     });
//!     ```
//!
//!     Children are counted and indexed among element children only; text leaves are checked
//!     with [`NodeAssertion::text`].

use crate::indentree::tree::{NodeId, Tree};

/// Start asserting at the tree's root.
pub fn assert_tree(tree: &Tree) -> NodeAssertion<'_> {
    NodeAssertion {
        tree,
        node: tree.root(),
        context: "root".to_string(),
    }
}

pub struct NodeAssertion<'a> {
    tree: &'a Tree,
    node: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    /// Start asserting at any node.
    pub fn at(tree: &'a Tree, node: NodeId) -> Self {
        Self {
            tree,
            node,
            context: node.to_string(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.node
    }

    fn elements(&self) -> Vec<NodeId> {
        self.tree.element_children(self.node).collect()
    }

    pub fn name(self, expected: &str) -> Self {
        let actual = self.tree.name(self.node);
        assert_eq!(
            actual,
            Some(expected),
            "{}: expected element named '{}', found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }

    pub fn attr(self, key: &str, expected: &str) -> Self {
        let actual = self.tree.attribute(self.node, key);
        assert_eq!(
            actual,
            Some(expected),
            "{}: expected attribute {}={:?}, found {:?}",
            self.context,
            key,
            expected,
            actual
        );
        self
    }

    pub fn no_attr(self, key: &str) -> Self {
        let actual = self.tree.attribute(self.node, key);
        assert!(
            actual.is_none(),
            "{}: expected no attribute '{}', found {:?}",
            self.context,
            key,
            actual
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.elements().len();
        assert_eq!(
            actual, expected,
            "{}: expected {} element children, found {}",
            self.context, expected, actual
        );
        self
    }

    pub fn child<F>(self, index: usize, assertion: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let elements = self.elements();
        assert!(
            index < elements.len(),
            "{}: child index {} out of bounds ({} element children)",
            self.context,
            index,
            elements.len()
        );
        assertion(NodeAssertion {
            tree: self.tree,
            node: elements[index],
            context: format!("{}[{}]", self.context, index),
        });
        self
    }

    /// Text of the node's direct text leaves, concatenated.
    pub fn text(self, expected: &str) -> Self {
        let actual: String = self
            .tree
            .children(self.node)
            .iter()
            .filter_map(|child| self.tree.text(*child))
            .collect();
        assert_eq!(
            actual, expected,
            "{}: expected text {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    /// Text captured in the node's `body` element.
    pub fn body_text(self, expected: &str) -> Self {
        self.body_text_in("body", expected)
    }

    /// Like [`NodeAssertion::body_text`] for builders configured with another body tag.
    pub fn body_text_in(self, body_tag: &str, expected: &str) -> Self {
        let Some(body) = self.tree.find_child(self.node, body_tag) else {
            panic!("{}: expected a '{}' child", self.context, body_tag);
        };
        let actual = self.tree.text_content(body);
        assert_eq!(
            actual, expected,
            "{}: expected body text {:?}, found {:?}",
            self.context, expected, actual
        );
        self
    }

    pub fn no_body(self) -> Self {
        assert!(
            self.tree.find_child(self.node, "body").is_none(),
            "{}: expected no 'body' child",
            self.context
        );
        self
    }

    /// Source line the node was built from.
    pub fn line(self, expected: usize) -> Self {
        let actual = self.tree.get(self.node).and_then(|node| node.line());
        assert_eq!(
            actual,
            Some(expected),
            "{}: expected line {}, found {:?}",
            self.context,
            expected,
            actual
        );
        self
    }
}
