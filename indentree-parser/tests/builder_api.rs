//! Builder entry points and line parser contracts

use indentree_parser::indentree::formats::{FormatOptions, FormatRegistry};
use indentree_parser::indentree::loader::DocumentLoader;
use indentree_parser::indentree::testing::{assert_tree, NodeAssertion};
use indentree_parser::indentree::{
    BuildError, BuilderOptions, DeclineAll, ElementLineParser, IndentTreeBuilder, LineOutcome,
    LineParser, NodeId, Tree, TreeError,
};
use std::cell::Cell;

#[test]
fn test_build_into_appends_after_existing_children() {
    let mut tree = Tree::new("root");
    let root = tree.root();
    let existing = tree.create_element("existing");
    tree.append_child(root, existing).unwrap();

    let report = IndentTreeBuilder::default().build_into(&mut tree, root, "a\n  b\n", &DeclineAll);

    assert!(report.is_complete());
    assert_eq!(report.root, root);
    assert_tree(&tree)
        .child_count(2)
        .child(0, |n| n.name("existing"))
        .child(1, |a| a.attr("text", "a").child(0, |b| b.attr("text", "b")));
}

#[test]
fn test_build_into_nested_node() {
    let mut tree = Tree::new("root");
    let section = tree.create_element("section");
    tree.append_child(tree.root(), section).unwrap();

    IndentTreeBuilder::default().build_into(&mut tree, section, "  x\ny\n", &DeclineAll);

    NodeAssertion::at(&tree, section)
        .child_count(2)
        .child(0, |x| x.attr("text", "x"))
        .child(1, |y| y.attr("text", "y"));
    assert_eq!(tree.children(tree.root()), &[section]);
}

#[test]
fn test_parser_returning_the_root_stops_the_build() {
    let parser = |tree: &mut Tree, _text: &str| LineOutcome::node(tree.root());
    let output = IndentTreeBuilder::default().build_output("a\nb\n", &parser);

    assert_eq!(
        output.report.error(),
        Some(&BuildError::Tree {
            line: 1,
            source: TreeError::RootAsChild,
        })
    );
    assert_eq!(output.tree.len(), 1);
}

#[test]
fn test_parser_reusing_an_attached_node_stops_the_build() {
    let seen: Cell<Option<NodeId>> = Cell::new(None);
    let parser = |tree: &mut Tree, text: &str| {
        if let Some(node) = seen.get() {
            return LineOutcome::node(node);
        }
        let node = tree.create_element(text);
        seen.set(Some(node));
        LineOutcome::node(node)
    };

    let output = IndentTreeBuilder::default().build_output("first\nsecond\nthird\n", &parser);

    assert!(matches!(
        output.report.error(),
        Some(BuildError::Tree {
            line: 2,
            source: TreeError::AlreadyAttached { .. },
        })
    ));
    assert_eq!(output.report.lines_processed, 2);
    assert_tree(&output.tree).child_count(1).child(0, |n| n.name("first"));
}

#[test]
fn test_parser_subtrees_are_kept() {
    let tree = IndentTreeBuilder::default().build(
        "@p hello there\n  @em loud\n",
        &ElementLineParser::new(),
    );

    assert_tree(&tree).child(0, |p| {
        p.name("p")
            .text("hello there")
            .child_count(1)
            .child(0, |em| em.name("em").text("loud").line(2))
    });
}

#[test]
fn test_declined_element_lines_fall_back_to_default_node() {
    let tree = IndentTreeBuilder::default().build("hello world\n@ \n", &ElementLineParser::new());

    assert_tree(&tree)
        .child_count(2)
        .child(0, |n| n.name("line").attr("text", "hello world"))
        .child(1, |n| n.name("line").attr("text", "@"));
}

#[test]
fn test_custom_raw_tags() {
    let parser = ElementLineParser::with_raw_tags("^verbatim$").unwrap();
    let tree = IndentTreeBuilder::default().build(
        "@verbatim\n  *as is*\n@code\n  @p parsed\n",
        &parser,
    );

    assert_tree(&tree)
        .child_count(2)
        .child(0, |v| v.body_text("*as is*\n"))
        .child(1, |code| code.no_body().child(0, |p| p.name("p")));
}

#[test]
fn test_options_rename_synthesized_nodes() {
    let builder = IndentTreeBuilder::new(BuilderOptions {
        root_tag: "document".to_string(),
        line_tag: "para".to_string(),
        text_attribute: "content".to_string(),
        body_tag: "verbatim".to_string(),
        ..BuilderOptions::default()
    });
    let tree = builder.build("intro\nsnippet {\n  x\n}\n", &DeclineAll);

    assert_tree(&tree)
        .name("document")
        .child(0, |n| n.name("para").attr("content", "intro").no_attr("text"))
        .child(1, |n| n.body_text_in("verbatim", "x\n"));
}

#[test]
fn test_trait_objects_are_line_parsers() {
    let parsers: Vec<Box<dyn LineParser>> = vec![Box::new(DeclineAll), Box::new(ElementLineParser::new())];
    for parser in &parsers {
        let tree = IndentTreeBuilder::default().build("a\n  b\n", parser.as_ref());
        assert_eq!(tree.len(), 3);
    }
}

#[test]
fn test_builders_and_parsers_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<IndentTreeBuilder>();
    assert_send_sync::<ElementLineParser>();
    assert_send_sync::<DeclineAll>();
    assert_send_sync::<Tree>();

    let builder = IndentTreeBuilder::default();
    let parser = ElementLineParser::new();
    let sizes: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|n| {
                let builder = &builder;
                let parser = &parser;
                scope.spawn(move || {
                    let source = "@item\n".repeat(n);
                    builder.build(&source, parser).len()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sizes, vec![2, 3, 4, 5]);
}

#[test]
fn test_loader_build_and_serialize() {
    let output = DocumentLoader::from_string("@section title=Intro\n  Welcome\n")
        .build(&IndentTreeBuilder::default(), &ElementLineParser::new());
    let registry = FormatRegistry::with_defaults();
    let tag = registry
        .serialize(&output.tree, output.tree.root(), "tag", &FormatOptions::default())
        .unwrap();

    insta::assert_snapshot!(tag, @r###"
    <root>
      <section title="Intro">
        <line text="Welcome"/>
      </section>
    </root>
    "###);
}
