//! Main module for indentree library functionality

pub mod building;
pub mod formats;
pub mod lines;
pub mod loader;
pub mod parsing;
pub mod testing;
pub mod tree;

pub use building::{
    build, BuildError, BuildOutput, BuildReport, BuildStatus, BuilderOptions, IndentTreeBuilder,
};
pub use parsing::{DeclineAll, ElementLineParser, LineOutcome, LineParser};
pub use tree::{Node, NodeId, NodeKind, Tree, TreeError};
