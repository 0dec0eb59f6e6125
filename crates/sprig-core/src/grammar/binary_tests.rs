use super::*;

fn sample() -> Grammar {
    Grammar::new("test")
        .extra(Rule::pattern("\\s"))
        .rule("program", Rule::repeat(Rule::sym("statement")))
        .rule(
            "statement",
            Rule::prec_right(2, Rule::seq([Rule::sym("expression"), Rule::string(";")])),
        )
        .rule("expression", Rule::pattern("[a-z]+"))
        .conflict(["program", "statement"])
}

#[test]
fn snapshot_restores_grammar() {
    let grammar = sample();
    let binary = grammar.to_binary().unwrap();
    let decoded = Grammar::from_binary(&binary).unwrap();

    assert_eq!(grammar, decoded);
}

#[test]
fn snapshot_preserves_order() {
    let binary = sample().to_binary().unwrap();
    let decoded = Grammar::from_binary(&binary).unwrap();

    assert_eq!(decoded.rules[0].0, "program");
    assert_eq!(decoded.rules[1].0, "statement");
    assert_eq!(decoded.rules[2].0, "expression");
}

#[test]
fn truncated_snapshot_is_rejected() {
    let binary = sample().to_binary().unwrap();
    let err = Grammar::from_binary(&binary[..binary.len() / 2]).unwrap_err();

    assert!(matches!(err, GrammarError::Binary(_)));
}
