//! Raw body capture, explicit (`{` ... `}`) and implicit (line parser asks for sublines)

use indentree_parser::indentree::building::UnclosedBlock;
use indentree_parser::indentree::testing::assert_tree;
use indentree_parser::indentree::{
    build, BuildError, BuildStatus, DeclineAll, ElementLineParser, IndentTreeBuilder, LineOutcome,
    Tree,
};

/// Flags every line starting with `code` as wanting its sublines.
fn code_wants_sublines(tree: &mut Tree, text: &str) -> LineOutcome {
    if !text.starts_with("code") {
        return LineOutcome::Declined;
    }
    let node = tree.create_element("line");
    tree.set_attribute(node, "text", text)
        .expect("fresh element takes attributes");
    LineOutcome::with_sublines(node)
}

#[test]
fn test_explicit_block() {
    let source = "code something {\n   indented code\n   here\n}\n";
    let tree = build(source, &DeclineAll);

    assert_tree(&tree).child_count(1).child(0, |code| {
        code.attr("text", "code something")
            .child_count(1)
            .child(0, |body| body.name("body").line(2))
            .body_text("indented code\nhere\n")
    });
}

#[test]
fn test_implicit_block() {
    let source = "code something\n   indented code\n   here\n\nmore stuff later\n";
    let tree = build(source, &code_wants_sublines);

    assert_tree(&tree)
        .child_count(2)
        .child(0, |code| {
            code.attr("text", "code something")
                .body_text("indented code\nhere\n")
        })
        .child(1, |more| more.attr("text", "more stuff later").child_count(0));
}

#[test]
fn test_implicit_block_flushed_at_end_of_input() {
    let tree = build("@code lang=rust\n    fn main() {\n        run();\n    }\n", &ElementLineParser::new());

    assert_tree(&tree).child(0, |code| {
        code.name("code")
            .attr("lang", "rust")
            .body_text("fn main() {\n    run();\n}\n")
    });
}

#[test]
fn test_implicit_block_without_sublines_has_no_body() {
    let tree = build("@code\n@p next\n", &ElementLineParser::new());

    assert_tree(&tree)
        .child_count(2)
        .child(0, |code| code.name("code").no_body())
        .child(1, |p| p.name("p").text("next"));
}

#[test]
fn test_implicit_block_ends_at_opener_depth() {
    let source = "@section\n  @pre\n    keep  this\n  @p after\n";
    let tree = build(source, &ElementLineParser::new());

    assert_tree(&tree).child(0, |section| {
        section
            .child_count(2)
            .child(0, |pre| pre.body_text("keep  this\n"))
            .child(1, |p| p.name("p").text("after"))
    });
}

#[test]
fn test_explicit_brace_wins_over_sublines() {
    let tree = build("@code {\n  x\n}\nafter\n", &ElementLineParser::new());

    assert_tree(&tree)
        .child_count(2)
        .child(0, |code| code.body_text("x\n"))
        .child(1, |after| after.attr("text", "after"));
}

#[test]
fn test_inner_braces_stay_in_body() {
    let tree = build("fn {\n  if x {\n    y\n  }\n}\n", &DeclineAll);
    assert_tree(&tree).child(0, |f| f.body_text("if x {\n  y\n}\n"));
}

#[test]
fn test_flat_body_closed_at_opener_column() {
    let tree = build("block {\nx = 1\n}\nafter\n", &DeclineAll);

    assert_tree(&tree)
        .child_count(2)
        .child(0, |block| block.body_text("x = 1\n"))
        .child(1, |after| after.attr("text", "after"));
}

#[test]
fn test_interior_blank_lines_kept_trailing_dropped() {
    let tree = build("block {\n  a\n\n  b\n\n\n}\n", &DeclineAll);
    assert_tree(&tree).child(0, |block| block.body_text("a\n\nb\n"));
}

#[test]
fn test_body_is_not_comment_stripped() {
    let tree = build("block {\n  x # kept\n}\n", &DeclineAll);
    assert_tree(&tree).child(0, |block| block.body_text("x # kept\n"));
}

#[test]
fn test_empty_explicit_block_gets_empty_body() {
    let tree = build("block {\n}\n", &DeclineAll);

    assert_tree(&tree).child(0, |block| {
        block.child_count(1).child(0, |body| body.name("body")).body_text("")
    });
    let block = tree.children(tree.root())[0];
    let body = tree.children(block)[0];
    assert!(tree.children(body).is_empty());
}

#[test]
fn test_brace_only_line_nests_at_its_indentation() {
    let tree = build("a\n  b\n  {\n    raw\n  }\n", &DeclineAll);

    assert_tree(&tree).child_count(1).child(0, |a| {
        a.attr("text", "a")
            .child_count(2)
            .child(0, |b| b.attr("text", "b").no_body())
            .child(1, |brace| brace.attr("text", "").line(3).body_text("raw\n"))
    });
}

#[test]
fn test_lines_after_body_nest_under_opener() {
    let tree = build("a {\n  raw\n}\n  b\nc\n", &DeclineAll);

    assert_tree(&tree)
        .child_count(2)
        .child(0, |a| {
            a.child_count(2)
                .child(0, |body| body.name("body"))
                .child(1, |b| b.attr("text", "b"))
        })
        .child(1, |c| c.attr("text", "c"));
}

#[test]
fn test_back_indented_line_stops_the_build() {
    let source = "a\nblock {\n    one\n  two\n}\nafter\n";
    let output = IndentTreeBuilder::default().build_output(source, &DeclineAll);

    assert_eq!(
        output.report.status,
        BuildStatus::Partial(BuildError::BackIndented {
            line: 4,
            opened_at: 2,
            width: 2,
            shoulder: 4,
        })
    );
    assert_eq!(output.report.lines_processed, 4);

    // Everything before the bad line survives; the unfinished body does not
    assert_tree(&output.tree)
        .child_count(2)
        .child(0, |a| a.attr("text", "a"))
        .child(1, |block| block.attr("text", "block").no_body());
}

#[test]
fn test_unindented_line_inside_body_is_confusing() {
    let output = IndentTreeBuilder::default().build_output("block {\n    one\ntwo\n}\n", &DeclineAll);

    assert_eq!(
        output.report.error(),
        Some(&BuildError::ConfusingIndentation {
            line: 3,
            opened_at: 1,
            shoulder: 4,
        })
    );
    assert!(output.into_strict().is_err());
}

#[test]
fn test_unclosed_explicit_block_is_dropped() {
    let output = IndentTreeBuilder::default().build_output("a\nblock {\n  data\n", &DeclineAll);

    assert!(output.report.is_complete());
    let block = output.tree.children(output.tree.root())[1];
    assert_eq!(
        output.report.unclosed_block,
        Some(UnclosedBlock {
            owner: block,
            opened_at: 2,
        })
    );
    assert_tree(&output.tree).child(1, |block| block.no_body());

    assert_eq!(
        output.into_strict().unwrap_err(),
        BuildError::UnterminatedBlock { opened_at: 2 }
    );
}

#[test]
fn test_strict_accepts_complete_builds() {
    let output = IndentTreeBuilder::default().build_output("a {\n  b\n}\n", &DeclineAll);
    let tree = output.into_strict().unwrap();
    assert_tree(&tree).child(0, |a| a.body_text("b\n"));
}
