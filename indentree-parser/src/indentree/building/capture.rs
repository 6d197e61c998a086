//! Raw body capture
//!
//!     While a capture is open, physical lines are collected verbatim instead of being parsed.
//!     The first content line fixes the *shoulder*: its indentation, which is stripped from every
//!     captured line. Blank lines are held back and only written once another content line
//!     follows, so a body never ends in blank lines.
//!
//!     Two modes differ only in how they end:
//!
//!     - Explicit (`label {`): a line starting with `}` closes the body when it sits below the
//!       shoulder or no deeper than the opening line. The closing line is consumed. Backing out
//!       below the shoulder with anything else is an error.
//!     - Free (the line parser asked for sublines): the first line that is no deeper than the
//!       opening line or below the shoulder ends the body, so an unindented line always does.
//!       That line is not consumed; it is parsed as an ordinary line.

use super::error::BuildError;
use crate::indentree::lines::{indent_width, is_blank, strip_columns, CLOSE_BLOCK};
use crate::indentree::tree::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaptureMode {
    Explicit,
    Free,
}

/// What happened to a line offered to the capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CaptureStep {
    /// Stored in the body (or held as a pending blank line)
    Consumed,
    /// Closing brace; the line is used up and the body is complete
    Closed,
    /// The body is complete and the line belongs to the ordinary scan
    Released,
}

#[derive(Debug, Clone)]
pub(crate) struct RawCapture {
    pub owner: NodeId,
    pub mode: CaptureMode,
    /// Indentation of the line that opened the capture
    pub opener_width: usize,
    /// Line number of the opening line
    pub opened_at: usize,
    /// Line number of the first captured content line
    pub first_line: Option<usize>,
    shoulder: Option<usize>,
    buffer: String,
    pending_blank_lines: usize,
    captured_lines: usize,
}

impl RawCapture {
    pub fn new(owner: NodeId, mode: CaptureMode, opener_width: usize, opened_at: usize) -> Self {
        Self {
            owner,
            mode,
            opener_width,
            opened_at,
            first_line: None,
            shoulder: None,
            buffer: String::new(),
            pending_blank_lines: 0,
            captured_lines: 0,
        }
    }

    pub fn shoulder(&self) -> Option<usize> {
        self.shoulder
    }

    pub fn captured_lines(&self) -> usize {
        self.captured_lines
    }

    #[cfg(test)]
    pub fn text(&self) -> &str {
        &self.buffer
    }

    /// Offer the next physical line to the capture.
    pub fn accept(&mut self, raw: &str, number: usize) -> Result<CaptureStep, BuildError> {
        if is_blank(raw) {
            self.pending_blank_lines += 1;
            return Ok(CaptureStep::Consumed);
        }

        let width = indent_width(raw);
        let below_shoulder = self.shoulder.is_some_and(|shoulder| width < shoulder);

        match self.mode {
            CaptureMode::Free => {
                if width <= self.opener_width || below_shoulder {
                    return Ok(CaptureStep::Released);
                }
            }
            CaptureMode::Explicit => {
                let closes = strip_columns(raw, width).starts_with(CLOSE_BLOCK);
                if closes
                    && (self.shoulder.is_none() || below_shoulder || width <= self.opener_width)
                {
                    return Ok(CaptureStep::Closed);
                }
                if below_shoulder {
                    let shoulder = self.shoulder.unwrap_or_default();
                    return Err(if width == 0 {
                        BuildError::ConfusingIndentation {
                            line: number,
                            opened_at: self.opened_at,
                            shoulder,
                        }
                    } else {
                        BuildError::BackIndented {
                            line: number,
                            opened_at: self.opened_at,
                            width,
                            shoulder,
                        }
                    });
                }
            }
        }

        let shoulder = *self.shoulder.get_or_insert(width);
        self.first_line.get_or_insert(number);
        self.push_line(strip_columns(raw, shoulder));
        Ok(CaptureStep::Consumed)
    }

    fn push_line(&mut self, line: &str) {
        for _ in 0..self.pending_blank_lines {
            self.buffer.push('\n');
        }
        self.pending_blank_lines = 0;
        self.buffer.push_str(line);
        self.buffer.push('\n');
        self.captured_lines += 1;
    }

    pub fn into_text(self) -> String {
        self.buffer
    }
}
