//! Error types for tree operations

use super::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("node {0} does not belong to this tree")]
    UnknownNode(NodeId),
    #[error("node {0} is a text node and cannot hold attributes or children")]
    NotAnElement(NodeId),
    #[error("node {node} is already attached to {parent}")]
    AlreadyAttached { node: NodeId, parent: NodeId },
    #[error("attaching {child} under {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
    #[error("the root node cannot become a child")]
    RootAsChild,
}
