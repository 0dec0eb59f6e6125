use std::collections::BTreeSet;

use sprig_core::Associativity;
use sprig_table::{Action, SymbolId};

use crate::automaton::{FirstSets, Item, ItemSet};
use crate::syntax::SyntaxGrammar;

use super::{Conflict, ConflictReport, DECLARED_CONFLICT_TIE_BREAK, Reason, Verdict};

/// Items a shift of `lookahead` continues.
///
/// These are the items partway through their production whose next symbol
/// can begin with the lookahead. A shift that only starts new productions
/// falls back to the items at position 0.
pub fn shift_items(
    grammar: &SyntaxGrammar,
    first: &FirstSets,
    items: &ItemSet,
    lookahead: SymbolId,
) -> Vec<Item> {
    let starts_with = |item: &Item| {
        item.next_symbol(grammar)
            .is_some_and(|next| first.first(next).contains(&lookahead))
    };
    let inner: Vec<Item> = items
        .items()
        .filter(|item| item.position > 0 && starts_with(item))
        .collect();
    if !inner.is_empty() {
        return inner;
    }
    items
        .items()
        .filter(|item| item.position == 0 && starts_with(item))
        .collect()
}

pub fn resolve(grammar: &SyntaxGrammar, conflict: &Conflict) -> Verdict {
    let mut reduces = conflict.reduces.clone();
    let mut shift = conflict.shift;
    let mut reason = Reason::Precedence;
    let mut tied = false;

    let top = reduces
        .iter()
        .map(|&p| grammar.production(p).precedence.value)
        .max();
    if let Some(top) = top {
        reduces.retain(|&p| grammar.production(p).precedence.value == top);
    }

    if let (Some(_), Some(top)) = (shift, top) {
        let values: Vec<i32> = conflict
            .shift_items
            .iter()
            .map(|item| grammar.production(item.production).precedence.value)
            .collect();
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);

        if min > top || (min == top && max > top) {
            reduces.clear();
        } else if max < top || (max == top && min < top) {
            shift = None;
        } else {
            let all = |associativity: Associativity| {
                reduces
                    .iter()
                    .all(|&p| grammar.production(p).precedence.associativity == associativity)
            };
            if all(Associativity::Left) {
                shift = None;
                reason = Reason::Associativity;
            } else if all(Associativity::Right) {
                reduces.clear();
                reason = Reason::Associativity;
            } else {
                tied = true;
            }
        }
    }

    match (shift, reduces.as_slice()) {
        (Some(state), []) => return Verdict::Resolved(Action::Shift(state), reason),
        (None, &[production]) => return Verdict::Resolved(Action::Reduce(production), reason),
        _ => {}
    }

    let shift_items: &[Item] = if shift.is_some() {
        &conflict.shift_items
    } else {
        &[]
    };
    let involved: BTreeSet<SymbolId> = shift_items
        .iter()
        .map(|item| grammar.production(item.production).lhs)
        .chain(reduces.iter().map(|&p| grammar.production(p).lhs))
        .map(|lhs| grammar.symbols.rule_of(lhs))
        .collect();

    if grammar.expected_conflicts.contains(&involved) {
        let policy = DECLARED_CONFLICT_TIE_BREAK;
        let reduce = if policy.prefer_first_production {
            reduces.first()
        } else {
            reduces.last()
        };
        let action = match (shift, reduce) {
            (Some(state), None) => Some(Action::Shift(state)),
            (Some(state), Some(_)) if policy.prefer_shift => Some(Action::Shift(state)),
            (_, Some(&production)) => Some(Action::Reduce(production)),
            (None, None) => None,
        };
        if let Some(action) = action {
            return Verdict::Resolved(action, Reason::Declared);
        }
    }

    Verdict::Unresolved(ConflictReport::new(
        grammar,
        conflict.lookahead,
        shift_items,
        &reduces,
        tied,
    ))
}
