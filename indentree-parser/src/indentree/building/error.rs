//! Errors that stop a build early
//!
//! None of these cross the lenient entry points as an `Err`. The builder stops at the offending
//! line, keeps what it built so far and records the error in the [`super::BuildReport`].

use crate::indentree::tree::TreeError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// An unindented line inside an explicit raw body that is not its closing brace.
    #[error(
        "line {line}: unindented line inside the raw body opened on line {opened_at} \
         (body lines start at column {shoulder})"
    )]
    ConfusingIndentation {
        line: usize,
        opened_at: usize,
        shoulder: usize,
    },

    /// A line inside an explicit raw body backs out past the body's indentation without
    /// closing it.
    #[error(
        "line {line}: back-indented to column {width} inside the raw body opened on line \
         {opened_at} (body lines start at column {shoulder}) without a closing `}}`"
    )]
    BackIndented {
        line: usize,
        opened_at: usize,
        width: usize,
        shoulder: usize,
    },

    /// An explicit raw body still open at the end of input. Only strict callers see this as an
    /// error; the lenient build just leaves the body out.
    #[error("the raw body opened on line {opened_at} is never closed")]
    UnterminatedBlock { opened_at: usize },

    /// The line parser handed back a node the tree refused to attach.
    #[error("line {line}: {source}")]
    Tree { line: usize, source: TreeError },
}

impl BuildError {
    /// Source line the error points at.
    pub fn line(&self) -> usize {
        match self {
            BuildError::ConfusingIndentation { line, .. }
            | BuildError::BackIndented { line, .. }
            | BuildError::Tree { line, .. } => *line,
            BuildError::UnterminatedBlock { opened_at } => *opened_at,
        }
    }
}
