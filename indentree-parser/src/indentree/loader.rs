//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or a string and hands it to a builder. It is
//! shared by the CLI and the integration tests.
//!
//! # Example
//!
//! ```rust
//! use indentree_parser::indentree::loader::DocumentLoader;
//! use indentree_parser::indentree::{ElementLineParser, IndentTreeBuilder};
//!
//! let output = DocumentLoader::from_path("notes.txt")?
//!     .build(&IndentTreeBuilder::default(), &ElementLineParser::new());
//! ```

use crate::indentree::building::{BuildOutput, IndentTreeBuilder};
use crate::indentree::parsing::LineParser;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Source text waiting to be built.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Build the source with `builder`, turning lines into nodes with `parser`.
    pub fn build<P>(&self, builder: &IndentTreeBuilder, parser: &P) -> BuildOutput
    where
        P: LineParser + ?Sized,
    {
        builder.build_output(&self.source, parser)
    }
}

/// Format the source around a 1-based line number
///
/// Shows 2 lines before the line, the line itself with a >> marker, and 2 lines after.
pub fn format_source_context(source: &str, line: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let target = line.saturating_sub(1);

    let start = target.saturating_sub(2);
    let end = (target + 3).min(lines.len());

    let mut context = String::new();
    for index in start..end {
        let marker = if index == target { ">>" } else { "  " };
        context.push_str(&format!("{} {:3} | {}\n", marker, index + 1, lines[index]));
    }
    context
}
