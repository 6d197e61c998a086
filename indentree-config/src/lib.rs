//! Shared configuration loader for indentree.
//!
//! `defaults/indentree.default.toml` is embedded into every binary so that the documented
//! defaults and runtime behavior stay in sync. The CLI stacks, lowest first: the defaults, an
//! `indentree.toml` in the working directory, the `--config` file, then flag overrides.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use indentree_parser::indentree::formats::FormatOptions;
use indentree_parser::indentree::{BuilderOptions, ElementLineParser};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/indentree.default.toml");

/// Top-level configuration consumed by indentree applications.
#[derive(Debug, Clone, Deserialize)]
pub struct IndentreeConfig {
    pub building: BuilderOptions,
    pub elements: ElementsConfig,
    pub output: OutputConfig,
}

/// Settings of the `@name` element line parser.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementsConfig {
    pub raw_tags: String,
}

impl ElementsConfig {
    pub fn line_parser(&self) -> Result<ElementLineParser, regex::Error> {
        ElementLineParser::with_raw_tags(&self.raw_tags)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
    pub indent: String,
    pub show_line_numbers: bool,
}

impl OutputConfig {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            indent: self.indent.clone(),
            show_line_numbers: self.show_line_numbers,
        }
    }
}

/// File picked up from the working directory when present.
pub const PROJECT_FILE: &str = "indentree.toml";

/// Layers TOML files and single-key overrides over the embedded defaults. Later layers win.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    fn add_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Layer a file that must exist (`--config`).
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), true)
    }

    /// Layer a file that is skipped when absent.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.add_file(path.as_ref(), false)
    }

    /// Layer `dir/indentree.toml` if there is one.
    pub fn with_project_file(self, dir: impl AsRef<Path>) -> Self {
        self.with_optional_file(dir.as_ref().join(PROJECT_FILE))
    }

    /// Override one dotted key, e.g. `output.format`.
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<IndentreeConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<IndentreeConfig, ConfigError> {
    Loader::new().build()
}
