use sprig_table::{SymbolId, TokenKind, Visibility};

use crate::Error;

use super::SymbolTable;

#[test]
fn end_of_input_is_symbol_zero() {
    let table = SymbolTable::new();

    assert_eq!(table.len(), 1);
    assert_eq!(table.name(SymbolId::END), "end");
    assert!(table.is_terminal(SymbolId::END));
    assert_eq!(table.get(SymbolId::END).visibility, Visibility::Hidden);
}

#[test]
fn rules_are_numbered_in_declaration_order() {
    let mut table = SymbolTable::new();
    let expression = table.declare_rule("expression", None).unwrap();
    let number = table
        .declare_rule("number", Some((TokenKind::Pattern, "\\d+")))
        .unwrap();

    assert_eq!(expression, SymbolId(1));
    assert_eq!(number, SymbolId(2));
    assert_eq!(table.rule("number"), Some(number));
    assert!(!table.is_terminal(expression));
    assert!(table.is_terminal(number));
    assert_eq!(table.rule("missing"), None);
}

#[test]
fn duplicate_rule_is_rejected() {
    let mut table = SymbolTable::new();
    table.declare_rule("a", None).unwrap();

    let err = table.declare_rule("a", None).unwrap_err();
    assert!(matches!(err, Error::DuplicateRule(ref name) if name == "a"));
}

#[test]
fn anonymous_tokens_are_deduplicated() {
    let mut table = SymbolTable::new();
    let plus = table.intern_token(TokenKind::String, "+").unwrap();
    let again = table.intern_token(TokenKind::String, "+").unwrap();
    let pattern = table.intern_token(TokenKind::Pattern, "+").unwrap();

    assert_eq!(plus, again);
    assert_ne!(plus, pattern);
    assert_eq!(table.get(plus).visibility, Visibility::Anonymous);
}

#[test]
fn literal_labels_are_escaped() {
    let mut table = SymbolTable::new();
    let newline = table.intern_token(TokenKind::String, "\n").unwrap();
    let quoted = table.intern_token(TokenKind::String, "'hello'").unwrap();
    let digits = table.intern_token(TokenKind::Pattern, "\\d+").unwrap();

    insta::assert_snapshot!(table.label(newline), @r"'\n'");
    insta::assert_snapshot!(table.label(quoted), @r"'\'hello\''");
    insta::assert_snapshot!(table.label(digits), @r"/\d+/");
}

#[test]
fn helper_maps_back_to_its_rule() {
    let mut table = SymbolTable::new();
    let list = table.declare_rule("list", None).unwrap();
    let helper = table.add_auxiliary(list, "list_repeat1").unwrap();

    assert_eq!(table.rule_of(helper), list);
    assert_eq!(table.rule_of(list), list);
    assert_eq!(table.rule("list_repeat1"), None);
}

#[test]
fn extras_are_listed_in_id_order() {
    let mut table = SymbolTable::new();
    let comment = table
        .declare_rule("comment", Some((TokenKind::Pattern, "#.*")))
        .unwrap();
    let space = table.intern_token(TokenKind::Pattern, "\\s").unwrap();
    table.mark_extra(space);
    table.mark_extra(comment);

    let extras: Vec<SymbolId> = table.extras().collect();
    assert_eq!(extras, vec![comment, space]);
}
