//! Line parsing capability
//!
//!     The builder decides *where* a line goes; a [`LineParser`] decides *what* it becomes. The
//!     parser sees one line at a time, already stripped of indentation, comments and markers. It
//!     either creates a node in the tree (left detached, the builder attaches it) or declines.
//!
//!     Declining is an explicit [`LineOutcome::Declined`] rather than "returned the input
//!     unchanged". On a decline the builder synthesizes a default `line` element carrying the
//!     text in an attribute.
//!
//!     A parser can also ask for the deeper-indented lines that follow to be captured verbatim as
//!     the node's body (`wants_sublines`), the same way a trailing `{` does, but terminated by the
//!     next unindented line instead of a `}`.

mod element;

pub use element::{ElementLineParser, DEFAULT_RAW_TAGS};

use crate::indentree::tree::{NodeId, Tree};

/// What a line parser made of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// A detached node to place at the line's position.
    Node { node: NodeId, wants_sublines: bool },
    /// The parser does not handle this line.
    Declined,
}

impl LineOutcome {
    pub fn node(node: NodeId) -> Self {
        LineOutcome::Node {
            node,
            wants_sublines: false,
        }
    }

    pub fn with_sublines(node: NodeId) -> Self {
        LineOutcome::Node {
            node,
            wants_sublines: true,
        }
    }
}

/// Turns one trimmed line into a node.
///
/// Implementations must not attach the node themselves; the builder does that. They may build
/// a whole detached subtree (for example an element with a text child).
///
/// Any `Fn(&mut Tree, &str) -> LineOutcome` closure is a line parser.
pub trait LineParser {
    fn parse_line(&self, tree: &mut Tree, text: &str) -> LineOutcome;
}

impl<F> LineParser for F
where
    F: Fn(&mut Tree, &str) -> LineOutcome,
{
    fn parse_line(&self, tree: &mut Tree, text: &str) -> LineOutcome {
        self(tree, text)
    }
}

/// Declines every line, so every line becomes a default `line` element.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl LineParser for DeclineAll {
    fn parse_line(&self, _tree: &mut Tree, _text: &str) -> LineOutcome {
        LineOutcome::Declined
    }
}
