//! Line preprocessing
//!
//!     Every physical line outside a raw body goes through the same cleanup before the builder
//!     looks at it:
//!
//!     1. Cut everything from the comment marker (`#` by default) to the end of the line. There is
//!        no escaping, so a marker inside quotes still starts a comment.
//!     2. Drop trailing whitespace. A line with nothing left is skipped entirely.
//!     3. Measure the leading whitespace in characters (a tab is one character).
//!     4. Strip one trailing `:`. It is recorded but does not affect placement.
//!     5. Strip one trailing `{`, which opens an explicit raw body, and trailing whitespace again.
//!     6. Strip the leading whitespace. A line holding only `{` keeps its indentation and ends
//!        up with empty content.
//!
//!     Lines inside a raw body skip all of this; the builder only measures and strips their
//!     indentation with the helpers below.

/// Opens an explicit raw body when it ends a line.
pub const OPEN_BLOCK: char = '{';
/// Starts the line that closes an explicit raw body.
pub const CLOSE_BLOCK: char = '}';

/// A content-bearing line ready for placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLine {
    /// 1-based line number in the source
    pub number: usize,
    /// Leading whitespace, in characters
    pub indent: usize,
    /// Text handed to the line parser: no indentation, comment, colon or brace
    pub content: String,
    pub has_colon: bool,
    pub opens_block: bool,
}

impl PreparedLine {
    /// Clean up a physical line. Returns `None` for lines that are empty once comments and
    /// whitespace are gone.
    pub fn from_source(raw: &str, number: usize, comment_marker: char) -> Option<Self> {
        let text = strip_comment(raw, comment_marker).trim_end();
        if text.is_empty() {
            return None;
        }
        let indent = indent_width(text);

        let (text, has_colon) = match text.strip_suffix(':') {
            Some(rest) => (rest, true),
            None => (text, false),
        };
        let (text, opens_block) = match text.strip_suffix(OPEN_BLOCK) {
            Some(rest) => (rest.trim_end(), true),
            None => (text, false),
        };

        Some(Self {
            number,
            indent,
            content: strip_columns(text, indent).to_string(),
            has_colon,
            opens_block,
        })
    }
}

/// Everything before the first `marker`.
pub fn strip_comment(line: &str, marker: char) -> &str {
    match line.find(marker) {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Count of leading whitespace characters.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// True for lines holding nothing but whitespace.
pub fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Drop the first `columns` characters. Shorter lines become empty.
pub fn strip_columns(line: &str, columns: usize) -> &str {
    match line.char_indices().nth(columns) {
        Some((pos, _)) => &line[pos..],
        None => "",
    }
}

/// Split source text into physical lines. A trailing `\r` is removed from each line so CRLF
/// input behaves like LF input.
pub fn physical_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}
