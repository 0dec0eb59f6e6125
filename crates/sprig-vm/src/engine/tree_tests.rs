//! Tests for tree access and rendering.

use sprig_core::{Grammar, Rule};
use sprig_table::Language;

use super::Parser;

fn sum_language() -> Language {
    let grammar = Grammar::new("sums")
        .rule(
            "expression",
            Rule::choice([Rule::sym("sum"), Rule::sym("variable")]),
        )
        .rule(
            "sum",
            Rule::prec_left(
                1,
                Rule::seq([
                    Rule::sym("expression"),
                    Rule::string("+"),
                    Rule::sym("expression"),
                ]),
            ),
        )
        .rule("variable", Rule::pattern("[a-z]+"))
        .extra(Rule::pattern("\\s"));
    sprig_compiler::compile(&grammar).unwrap()
}

#[test]
fn root_covers_surrounding_extras() {
    let language = sum_language();
    let parser = Parser::new(&language).unwrap();
    let tree = parser.parse("  a + b  ").unwrap();

    let root = tree.root();
    assert_eq!(tree.kind(root), "expression");
    assert_eq!(tree.text(root), "  a + b  ");

    let sum = tree
        .node(root)
        .children
        .iter()
        .copied()
        .find(|&child| tree.kind(child) == "sum")
        .unwrap();
    assert_eq!(tree.text(sum), "a + b");
    assert!(!tree.node(sum).extra);
}

#[test]
fn extras_are_marked() {
    let language = sum_language();
    let parser = Parser::new(&language).unwrap();
    let tree = parser.parse("a +b").unwrap();

    let extras: Vec<&str> = (0..tree.len() as u32)
        .map(super::NodeId)
        .filter(|&id| tree.node(id).extra)
        .map(|id| tree.text(id))
        .collect();
    assert_eq!(extras, vec![" "]);
}

#[test]
fn sexp_omits_anonymous_tokens() {
    let language = sum_language();
    let parser = Parser::new(&language).unwrap();
    let tree = parser.parse("a + b").unwrap();

    insta::assert_snapshot!(
        tree.to_sexp(),
        @"(expression (sum (expression (variable)) (expression (variable))))"
    );
}

#[test]
fn sexp_splices_hidden_nodes() {
    let grammar = Grammar::new("list")
        .rule("list", Rule::repeat(Rule::sym("item")))
        .rule("item", Rule::pattern("[a-z]+"))
        .extra(Rule::pattern("\\s+"));
    let language = sprig_compiler::compile(&grammar).unwrap();
    let parser = Parser::new(&language).unwrap();
    let tree = parser.parse("a b c").unwrap();

    insta::assert_snapshot!(tree.to_sexp(), @"(list (item) (item) (item))");
}

#[test]
fn empty_root() {
    let grammar = Grammar::new("blank_language").rule("first_rule", Rule::Blank);
    let language = sprig_compiler::compile(&grammar).unwrap();
    let parser = Parser::new(&language).unwrap();
    let tree = parser.parse("").unwrap();

    let root = tree.node(tree.root());
    assert_eq!((root.start, root.end), (0, 0));
    assert!(root.children.is_empty());
    insta::assert_snapshot!(tree.to_sexp(), @"(first_rule)");
}
