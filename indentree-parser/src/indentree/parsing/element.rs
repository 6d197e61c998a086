//! Element line parser
//!
//! A small line language for authoring element trees:
//!
//! ```text
//! @section title="Getting started" level=1
//!     plain lines become <line text="..."/>
//!     @code lang=rust
//!         fn main() {}
//! ```
//!
//! A line starting with `@` names an element. `key=value` pairs (values may be double quoted,
//! with `\"` and `\\` escapes) become attributes, every other word joins a single text child.
//! Elements whose name matches the raw-tag pattern ask for their indented sublines as a raw body.
//! Lines that do not start with `@`, or that do not tokenize cleanly, are declined.

use super::{LineOutcome, LineParser};
use crate::indentree::tree::{NodeId, Tree, TreeError};
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

/// Element names that capture their sublines unless configured otherwise.
pub static DEFAULT_RAW_TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(code|pre|script|style|raw)$").expect("valid raw tag pattern"));

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t]+")]
enum ElementToken {
    #[token("@")]
    At,
    #[token("=")]
    Equals,
    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    Quoted(String),
    #[regex(r"[A-Za-z_][A-Za-z0-9_.:-]*", |lex| lex.slice().to_string(), priority = 3)]
    Ident(String),
    #[regex(r#"[^\s"=@]+"#, |lex| lex.slice().to_string(), priority = 1)]
    Word(String),
}

fn unquote(quoted: &str) -> String {
    let inner = &quoted[1..quoted.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// A parsed `@name ...` line, before it is put into a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ElementLine {
    name: String,
    attributes: Vec<(String, String)>,
    words: Vec<String>,
}

fn parse_element_line(text: &str) -> Option<ElementLine> {
    let tokens: Vec<ElementToken> = ElementToken::lexer(text)
        .collect::<Result<_, _>>()
        .ok()?;
    let mut tokens = tokens.into_iter().peekable();

    if tokens.next()? != ElementToken::At {
        return None;
    }
    let name = match tokens.next()? {
        ElementToken::Ident(name) => name,
        _ => return None,
    };

    let mut attributes = Vec::new();
    let mut words = Vec::new();
    while let Some(token) = tokens.next() {
        match token {
            ElementToken::Ident(key) if tokens.peek() == Some(&ElementToken::Equals) => {
                tokens.next();
                let value = match tokens.next()? {
                    ElementToken::Quoted(value)
                    | ElementToken::Ident(value)
                    | ElementToken::Word(value) => value,
                    _ => return None,
                };
                attributes.push((key, value));
            }
            ElementToken::Ident(word) | ElementToken::Word(word) | ElementToken::Quoted(word) => {
                words.push(word)
            }
            ElementToken::At | ElementToken::Equals => return None,
        }
    }

    Some(ElementLine {
        name,
        attributes,
        words,
    })
}

/// Line parser for `@name key=value text` element lines.
#[derive(Debug, Clone)]
pub struct ElementLineParser {
    raw_tags: Regex,
}

impl ElementLineParser {
    pub fn new() -> Self {
        Self {
            raw_tags: DEFAULT_RAW_TAGS.clone(),
        }
    }

    /// Use `pattern` to decide which element names capture their sublines.
    pub fn with_raw_tags(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            raw_tags: Regex::new(pattern)?,
        })
    }

    pub fn raw_tags(&self) -> &Regex {
        &self.raw_tags
    }
}

impl Default for ElementLineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser for ElementLineParser {
    fn parse_line(&self, tree: &mut Tree, text: &str) -> LineOutcome {
        let Some(line) = parse_element_line(text) else {
            return LineOutcome::Declined;
        };

        match insert_element(tree, &line) {
            Ok(node) => LineOutcome::Node {
                node,
                wants_sublines: self.raw_tags.is_match(&line.name),
            },
            Err(err) => {
                warn!("element line `{}` left to the default node: {}", text, err);
                LineOutcome::Declined
            }
        }
    }
}

/// Create the detached element for `line`, text child included.
fn insert_element(tree: &mut Tree, line: &ElementLine) -> Result<NodeId, TreeError> {
    let node = tree.create_element(line.name.as_str());
    for (key, value) in &line.attributes {
        tree.set_attribute(node, key.as_str(), value.as_str())?;
    }
    if !line.words.is_empty() {
        let child = tree.create_text(line.words.join(" "));
        tree.append_child(node, child)?;
    }
    Ok(node)
}
