//! Builder options

use serde::{Deserialize, Serialize};

/// Names and markers the builder uses when it creates nodes on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Name of the synthetic root element
    pub root_tag: String,
    /// Element created when the line parser declines a line
    pub line_tag: String,
    /// Attribute of the default element holding the line's text
    pub text_attribute: String,
    /// Element wrapping a captured raw body
    pub body_tag: String,
    /// Starts a comment that runs to the end of the line
    pub comment_marker: char,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            root_tag: "root".to_string(),
            line_tag: "line".to_string(),
            text_attribute: "text".to_string(),
            body_tag: "body".to_string(),
            comment_marker: '#',
        }
    }
}
