//! Tree building
//!
//!     Turns indentation-structured text into a [`Tree`](crate::indentree::tree::Tree). The
//!     builder owns placement and raw body capture; what each line becomes is up to the
//!     [`LineParser`](crate::indentree::parsing::LineParser) it is given.
//!
//!     - [`build`]: default options, lenient, returns just the tree
//!     - [`IndentTreeBuilder::build_output`]: the tree plus a [`BuildReport`]
//!     - [`IndentTreeBuilder::build_into`]: append a document under a node of an existing tree
//!     - [`BuildOutput::into_strict`]: turn a partial build into an error

mod builder;
mod capture;
mod error;
mod options;
mod report;

pub use builder::{build, IndentTreeBuilder};
pub use error::BuildError;
pub use options::BuilderOptions;
pub use report::{BuildOutput, BuildReport, BuildStatus, UnclosedBlock};
