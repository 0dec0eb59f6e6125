use sprig_core::{Grammar, Rule};
use sprig_table::{Action, ProductionId, StateId, SymbolId};

use crate::automaton::Item;
use crate::normalize::normalize;
use crate::syntax::SyntaxGrammar;
use crate::test_utils::{arithmetic_grammar, math_operation_grammar};

use super::{Conflict, DECLARED_CONFLICT_TIE_BREAK, Reason, TieBreak, Verdict, resolve};

const SHIFT_TARGET: StateId = StateId(7);

fn symbol(grammar: &SyntaxGrammar, label: &str) -> SymbolId {
    grammar
        .symbols
        .iter()
        .map(|(id, _)| id)
        .find(|&id| grammar.label(id) == label)
        .unwrap()
}

/// Shift of `lookahead` continuing `shift_item` against reducing `reduce`.
fn shift_reduce(
    grammar: &SyntaxGrammar,
    lookahead: &str,
    shift_item: (u16, usize),
    reduce: u16,
) -> Conflict {
    Conflict {
        state: StateId(0),
        lookahead: symbol(grammar, lookahead),
        shift: Some(SHIFT_TARGET),
        shift_items: vec![Item::new(ProductionId(shift_item.0), shift_item.1)],
        reduces: vec![ProductionId(reduce)],
    }
}

fn reduce_reduce(grammar: &SyntaxGrammar, reduces: &[u16]) -> Conflict {
    Conflict {
        state: StateId(0),
        lookahead: SymbolId::END,
        shift: None,
        shift_items: Vec::new(),
        reduces: reduces.iter().map(|&p| ProductionId(p)).collect(),
    }
}

/// `root → a | b` where both `a` and `b` match `'x'`.
fn twin_grammar(a: Rule, b: Rule) -> Grammar {
    Grammar::new("test")
        .rule("root", Rule::choice([Rule::sym("a"), Rule::sym("b")]))
        .rule("a", a)
        .rule("b", b)
}

fn x() -> Rule {
    Rule::seq([Rule::string("x")])
}

#[test]
fn left_associativity_reduces() {
    let grammar = normalize(&math_operation_grammar("PREC_LEFT")).unwrap();
    let conflict = shift_reduce(&grammar, "'+'", (3, 1), 3);

    assert_eq!(
        resolve(&grammar, &conflict),
        Verdict::Resolved(Action::Reduce(ProductionId(3)), Reason::Associativity)
    );
}

#[test]
fn right_associativity_shifts() {
    let grammar = normalize(&math_operation_grammar("PREC_RIGHT")).unwrap();
    let conflict = shift_reduce(&grammar, "'+'", (3, 1), 3);

    assert_eq!(
        resolve(&grammar, &conflict),
        Verdict::Resolved(Action::Shift(SHIFT_TARGET), Reason::Associativity)
    );
}

#[test]
fn plain_precedence_tie_is_unresolved() {
    let grammar = normalize(&math_operation_grammar("PREC")).unwrap();
    let conflict = shift_reduce(&grammar, "'+'", (3, 1), 3);

    let Verdict::Unresolved(report) = resolve(&grammar, &conflict) else {
        panic!("expected an unresolved conflict");
    };
    assert_eq!(report.rules, vec!["math_operation"]);
    assert_eq!(report.resolutions.len(), 2);
}

#[test]
fn higher_reduce_precedence_wins() {
    // 6: sum → expression '+' expression, 7: product → expression '*' expression
    let grammar = normalize(&arithmetic_grammar()).unwrap();
    let conflict = shift_reduce(&grammar, "'+'", (6, 1), 7);

    assert_eq!(
        resolve(&grammar, &conflict),
        Verdict::Resolved(Action::Reduce(ProductionId(7)), Reason::Precedence)
    );
}

#[test]
fn higher_shift_precedence_wins() {
    let grammar = normalize(&arithmetic_grammar()).unwrap();
    let conflict = shift_reduce(&grammar, "'*'", (7, 1), 6);

    assert_eq!(
        resolve(&grammar, &conflict),
        Verdict::Resolved(Action::Shift(SHIFT_TARGET), Reason::Precedence)
    );
}

#[test]
fn declared_conflict_prefers_shift() {
    let grammar = math_operation_grammar("PREC").conflict(["math_operation"]);
    let grammar = normalize(&grammar).unwrap();
    let conflict = shift_reduce(&grammar, "'+'", (3, 1), 3);

    assert_eq!(
        resolve(&grammar, &conflict),
        Verdict::Resolved(Action::Shift(SHIFT_TARGET), Reason::Declared)
    );
}

#[test]
fn reduce_precedence_picks_one_reduction() {
    // 3: a → 'x', 4: b → 'x'
    let grammar = twin_grammar(Rule::prec(1, x()), Rule::prec(2, x()));
    let grammar = normalize(&grammar).unwrap();

    assert_eq!(
        resolve(&grammar, &reduce_reduce(&grammar, &[3, 4])),
        Verdict::Resolved(Action::Reduce(ProductionId(4)), Reason::Precedence)
    );
}

#[test]
fn declared_conflict_prefers_first_production() {
    let grammar = twin_grammar(x(), x()).conflict(["b", "a"]);
    let grammar = normalize(&grammar).unwrap();

    assert_eq!(
        resolve(&grammar, &reduce_reduce(&grammar, &[3, 4])),
        Verdict::Resolved(Action::Reduce(ProductionId(3)), Reason::Declared)
    );
}

#[test]
fn declaration_must_match_exactly() {
    let grammar = twin_grammar(x(), x()).conflict(["a"]);
    let grammar = normalize(&grammar).unwrap();

    let verdict = resolve(&grammar, &reduce_reduce(&grammar, &[3, 4]));
    assert!(matches!(verdict, Verdict::Unresolved(_)));
}

#[test]
fn tie_break_policy() {
    assert_eq!(
        DECLARED_CONFLICT_TIE_BREAK,
        TieBreak {
            prefer_shift: true,
            prefer_first_production: true,
        }
    );
}
