//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors, which makes a tree quick to scan. Labels
//! are truncated to 30 characters; line breaks inside text show as `↵`.
//!
//!     ⧉ root
//!     ├─ ○ section title="Intro"
//!     │ ├─ ○ p
//!     │ │ └─ ◦ Welcome
//!     │ └─ ○ code lang="rust"
//!     │   └─ ○ body
//!     │     └─ ◦ fn main() {}↵
//!     └─ ○ line text="closing words"
//!
//! Icons
//!     Top node: ⧉
//!     Element: ○
//!     Text: ◦
//!
//! With line numbers on, each node line is prefixed by the source line it came from (two digits,
//! blank for nodes without one).

use super::registry::{snapshot_of, Format, FormatError};
use super::FormatOptions;
use crate::indentree::tree::snapshot::{NodeSnapshot, SnapshotKind};
use crate::indentree::tree::{NodeId, Tree};

const LABEL_WIDTH: usize = 30;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn icon(kind: SnapshotKind) -> &'static str {
    match kind {
        SnapshotKind::Element => "○",
        SnapshotKind::Text => "◦",
    }
}

fn label(snapshot: &NodeSnapshot) -> String {
    let label = snapshot.display_label().replace('\n', "↵");
    truncate(&label, LABEL_WIDTH)
}

fn format_snapshot(
    snapshot: &NodeSnapshot,
    prefix: &str,
    is_last: bool,
    show_linum: bool,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };

    if show_linum {
        match snapshot.line {
            Some(line) => output.push_str(&format!("{:02} ", line)),
            None => output.push_str("   "),
        }
    }
    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        icon(snapshot.kind),
        label(snapshot)
    ));

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == child_count, show_linum, output);
    }
}

/// Render the subtree at `node` as a treeviz string.
pub fn to_treeviz_str(
    tree: &Tree,
    node: NodeId,
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let snapshot = snapshot_of(tree, node)?;
    let mut output = format!("⧉ {}\n", label(&snapshot));

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(
            child,
            "",
            i + 1 == child_count,
            options.show_line_numbers,
            &mut output,
        );
    }
    Ok(output)
}

pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with box connectors and icons"
    }

    fn serialize(
        &self,
        tree: &Tree,
        node: NodeId,
        options: &FormatOptions,
    ) -> Result<String, FormatError> {
        to_treeviz_str(tree, node, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        let mut tree = Tree::new("root");
        let root = tree.root();

        let a = tree.create_element("a");
        tree.set_line(a, 1).unwrap();
        tree.append_child(root, a).unwrap();
        let b = tree.create_element("b");
        tree.set_line(b, 2).unwrap();
        tree.append_child(a, b).unwrap();
        let text = tree.create_text("two\nlines\n");
        tree.append_child(b, text).unwrap();

        let c = tree.create_element("line");
        tree.set_attribute(c, "text", "a label long enough to be cut short")
            .unwrap();
        tree.set_line(c, 12).unwrap();
        tree.append_child(root, c).unwrap();
        tree
    }

    #[test]
    fn test_treeviz_connectors() {
        let tree = sample();
        let output = to_treeviz_str(&tree, tree.root(), &FormatOptions::default()).unwrap();

        insta::assert_snapshot!(output, @r###"
        ⧉ root
        ├─ ○ a
        │ └─ ○ b
        │   └─ ◦ two↵lines↵
        └─ ○ line text="a label long enough...
        "###);
    }

    #[test]
    fn test_treeviz_line_numbers() {
        let tree = sample();
        let options = FormatOptions {
            show_line_numbers: true,
            ..FormatOptions::default()
        };
        let output = to_treeviz_str(&tree, tree.root(), &options).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines[0], "⧉ root");
        assert_eq!(lines[1], "01 ├─ ○ a");
        assert_eq!(lines[3], "   │   └─ ◦ two↵lines↵");
        assert_eq!(lines[4], "12 └─ ○ line text=\"a label long enough...");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
