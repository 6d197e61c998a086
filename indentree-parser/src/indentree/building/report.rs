//! Build results

use super::error::BuildError;
use crate::indentree::tree::{NodeId, Tree};

/// Whether the scan reached the end of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStatus {
    Complete,
    /// The scan stopped at the error's line; the tree holds everything before it.
    Partial(BuildError),
}

/// An explicit raw body that was still open at the end of input. Its text is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnclosedBlock {
    pub owner: NodeId,
    pub opened_at: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The node the document was built under
    pub root: NodeId,
    pub status: BuildStatus,
    /// Physical lines read, including the one that stopped a partial build
    pub lines_processed: usize,
    pub unclosed_block: Option<UnclosedBlock>,
}

impl BuildReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.status, BuildStatus::Complete)
    }

    pub fn error(&self) -> Option<&BuildError> {
        match &self.status {
            BuildStatus::Complete => None,
            BuildStatus::Partial(err) => Some(err),
        }
    }

    /// The first problem a strict caller should fail on, if any.
    pub fn strict_error(&self) -> Option<BuildError> {
        if let Some(err) = self.error() {
            return Some(err.clone());
        }
        self.unclosed_block
            .map(|block| BuildError::UnterminatedBlock {
                opened_at: block.opened_at,
            })
    }
}

/// A freshly built tree together with its report.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub tree: Tree,
    pub report: BuildReport,
}

impl BuildOutput {
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Fail on anything short of a complete build, an unclosed explicit body included.
    pub fn into_strict(self) -> Result<Tree, BuildError> {
        match self.report.strict_error() {
            Some(err) => Err(err),
            None => Ok(self.tree),
        }
    }
}
