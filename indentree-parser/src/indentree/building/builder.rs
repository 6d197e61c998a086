//! Indent-tree builder
//!
//!     A single pass over the physical lines. The builder keeps a *cursor* (the last placed node,
//!     the parent it was attached under and the indentation that produced it) plus a stack of
//!     *level frames*, one per enclosing level. The root sits at width -1, below any real line.
//!
//! Placement
//!
//!     For a line indented `w` columns, compared with the cursor's width:
//!
//!     - deeper: save the cursor as a frame and attach the node under the cursor's node
//!     - equal: attach under the cursor's parent, as the cursor's sibling
//!     - shallower: drop frames while the top frame is at least `w` wide, then attach under the
//!       top frame's node
//!
//!     So indents 0, 2, 4, 2 give `A { B { C }, D }`. Indentation mismatches are never errors;
//!     every line finds a place.
//!
//! Raw bodies
//!
//!     A line ending in `{`, or one the line parser flags with `wants_sublines`, is placed as
//!     usual and then opens a [`RawCapture`]. Until the capture ends, lines are collected verbatim
//!     and never reach the line parser. When it ends, the text is wrapped in a `body` element
//!     appended to the opening line's node. See the capture module for how bodies end.
//!
//! Failure policy
//!
//!     Malformed bodies stop the scan. The tree keeps everything placed so far and the report says
//!     where and why; nothing is raised to the caller. An explicit body still open at the end of
//!     input is dropped and only noted in the report.

use super::capture::{CaptureMode, CaptureStep, RawCapture};
use super::error::BuildError;
use super::options::BuilderOptions;
use super::report::{BuildOutput, BuildReport, BuildStatus, UnclosedBlock};
use crate::indentree::lines::{physical_lines, PreparedLine};
use crate::indentree::parsing::{LineOutcome, LineParser};
use crate::indentree::tree::{NodeId, Tree, TreeError};
use std::cmp::Ordering;
use tracing::{debug, trace, warn};

/// The active placement context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    width: isize,
    parent: NodeId,
    node: NodeId,
}

/// A saved cursor: the width it held and the node its deeper lines attach under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LevelFrame {
    width: isize,
    parent: NodeId,
}

/// Builds node trees from indentation-structured text.
#[derive(Debug, Clone, Default)]
pub struct IndentTreeBuilder {
    options: BuilderOptions,
}

impl IndentTreeBuilder {
    pub fn new(options: BuilderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Build a fresh tree. Never fails: a malformed document yields the tree built up to the
    /// point of failure. Use [`IndentTreeBuilder::build_output`] to find out whether that
    /// happened.
    pub fn build<P>(&self, source: &str, parser: &P) -> Tree
    where
        P: LineParser + ?Sized,
    {
        self.build_output(source, parser).tree
    }

    /// Build a fresh tree and report how the scan went.
    pub fn build_output<P>(&self, source: &str, parser: &P) -> BuildOutput
    where
        P: LineParser + ?Sized,
    {
        let mut tree = Tree::new(self.options.root_tag.as_str());
        let root = tree.root();
        let report = self.build_into(&mut tree, root, source, parser);
        BuildOutput { tree, report }
    }

    /// Build into an existing tree, appending top-level lines under `root` after whatever it
    /// already holds.
    pub fn build_into<P>(&self, tree: &mut Tree, root: NodeId, source: &str, parser: &P) -> BuildReport
    where
        P: LineParser + ?Sized,
    {
        let mut scan = Scan::new(&self.options, tree, parser, root);
        let status = match scan.run(source) {
            Ok(()) => BuildStatus::Complete,
            Err(err) => {
                warn!(line = err.line(), "stopped early: {}", err);
                BuildStatus::Partial(err)
            }
        };

        BuildReport {
            root,
            status,
            lines_processed: scan.lines_processed,
            unclosed_block: scan.unclosed_block,
        }
    }
}

/// State of one build.
struct Scan<'a, P: ?Sized> {
    options: &'a BuilderOptions,
    tree: &'a mut Tree,
    parser: &'a P,
    root: NodeId,
    cursor: Cursor,
    frames: Vec<LevelFrame>,
    capture: Option<RawCapture>,
    lines_processed: usize,
    unclosed_block: Option<UnclosedBlock>,
}

impl<'a, P> Scan<'a, P>
where
    P: LineParser + ?Sized,
{
    fn new(options: &'a BuilderOptions, tree: &'a mut Tree, parser: &'a P, root: NodeId) -> Self {
        Self {
            options,
            tree,
            parser,
            root,
            cursor: Cursor {
                width: -1,
                parent: root,
                node: root,
            },
            frames: Vec::new(),
            capture: None,
            lines_processed: 0,
            unclosed_block: None,
        }
    }

    fn run(&mut self, source: &str) -> Result<(), BuildError> {
        for (index, raw) in physical_lines(source).enumerate() {
            let number = index + 1;
            self.lines_processed = number;

            let step = match self.capture.as_mut() {
                Some(capture) => Some(capture.accept(raw, number)?),
                None => None,
            };
            match step {
                Some(CaptureStep::Consumed) => continue,
                Some(CaptureStep::Closed) => {
                    self.flush_capture(number)?;
                    continue;
                }
                Some(CaptureStep::Released) => self.flush_capture(number)?,
                None => {}
            }

            self.process_line(raw, number)?;
        }

        self.finish()
    }

    fn finish(&mut self) -> Result<(), BuildError> {
        let Some(capture) = self.capture.as_ref() else {
            return Ok(());
        };
        match capture.mode {
            CaptureMode::Free => self.flush_capture(self.lines_processed),
            CaptureMode::Explicit => {
                warn!(
                    line = capture.opened_at,
                    "raw body is never closed; its {} line(s) are dropped",
                    capture.captured_lines()
                );
                self.unclosed_block = Some(UnclosedBlock {
                    owner: capture.owner,
                    opened_at: capture.opened_at,
                });
                self.capture = None;
                Ok(())
            }
        }
    }

    fn process_line(&mut self, raw: &str, number: usize) -> Result<(), BuildError> {
        let Some(line) = PreparedLine::from_source(raw, number, self.options.comment_marker)
        else {
            return Ok(());
        };

        let (node, wants_sublines) = match self.parser.parse_line(self.tree, &line.content) {
            LineOutcome::Node {
                node,
                wants_sublines,
            } => (node, wants_sublines),
            LineOutcome::Declined => (self.default_node(&line.content, number)?, false),
        };
        self.tree
            .set_line(node, number)
            .map_err(|source| tree_error(number, source))?;

        self.place(node, line.indent, number)?;

        if line.opens_block || wants_sublines {
            let mode = if line.opens_block {
                CaptureMode::Explicit
            } else {
                CaptureMode::Free
            };
            debug!(line = number, ?mode, "opening raw body");
            self.capture = Some(RawCapture::new(node, mode, line.indent, number));
        }
        Ok(())
    }

    fn default_node(&mut self, content: &str, number: usize) -> Result<NodeId, BuildError> {
        let node = self.tree.create_element(self.options.line_tag.as_str());
        self.tree
            .set_attribute(node, self.options.text_attribute.as_str(), content)
            .map_err(|source| tree_error(number, source))?;
        Ok(node)
    }

    fn place(&mut self, node: NodeId, indent: usize, number: usize) -> Result<(), BuildError> {
        let width = indent as isize;
        let parent = match width.cmp(&self.cursor.width) {
            Ordering::Greater => {
                trace!(line = number, width, "descend");
                self.frames.push(LevelFrame {
                    width: self.cursor.width,
                    parent: self.cursor.node,
                });
                self.cursor.node
            }
            Ordering::Equal => {
                trace!(line = number, width, "sibling");
                self.cursor.parent
            }
            Ordering::Less => {
                while self.frames.last().is_some_and(|frame| frame.width >= width) {
                    self.frames.pop();
                }
                trace!(line = number, width, depth = self.frames.len(), "ascend");
                self.frames
                    .last()
                    .map(|frame| frame.parent)
                    .unwrap_or(self.root)
            }
        };

        self.tree
            .append_child(parent, node)
            .map_err(|source| tree_error(number, source))?;
        self.cursor = Cursor {
            width,
            parent,
            node,
        };
        Ok(())
    }

    fn flush_capture(&mut self, number: usize) -> Result<(), BuildError> {
        let Some(capture) = self.capture.take() else {
            return Ok(());
        };
        debug!(
            line = capture.opened_at,
            lines = capture.captured_lines(),
            shoulder = ?capture.shoulder(),
            "closing raw body"
        );
        if capture.mode == CaptureMode::Free && capture.captured_lines() == 0 {
            return Ok(());
        }

        let owner = capture.owner;
        let body_line = capture.first_line.unwrap_or(number);
        let text = capture.into_text();
        let body_tag = self.options.body_tag.as_str();

        let attach = |tree: &mut Tree| -> Result<(), TreeError> {
            let body = tree.create_element(body_tag);
            tree.set_line(body, body_line)?;
            if !text.is_empty() {
                let leaf = tree.create_text(text);
                tree.append_child(body, leaf)?;
            }
            tree.append_child(owner, body)
        };
        attach(self.tree).map_err(|source| tree_error(number, source))
    }
}

fn tree_error(line: usize, source: TreeError) -> BuildError {
    BuildError::Tree { line, source }
}

/// Build a tree with default options. See [`IndentTreeBuilder::build`].
pub fn build<P>(source: &str, parser: &P) -> Tree
where
    P: LineParser + ?Sized,
{
    IndentTreeBuilder::default().build(source, parser)
}
