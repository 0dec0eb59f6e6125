//! Action and goto tables from a resolved automaton.


use std::collections::BTreeMap;

use sprig_table::{Action, ProductionId, StateId, SymbolId};

use crate::Error;
use crate::automaton::Automaton;
use crate::conflict::{self, Conflict, Verdict};
use crate::syntax::SyntaxGrammar;
use crate::trace::Tracer;

/// One state's row. Both maps iterate in symbol order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateRow {
    pub actions: BTreeMap<SymbolId, Action>,
    pub gotos: BTreeMap<SymbolId, StateId>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseTable {
    pub states: Vec<StateRow>,
}

impl ParseTable {
    pub fn action(&self, state: StateId, lookahead: SymbolId) -> Option<Action> {
        self.states[state.index()].actions.get(&lookahead).copied()
    }
}

/// Assign actions to every state, resolving conflicts as they appear.
/// Fails on the first conflict that cannot be resolved.
pub fn build(
    grammar: &SyntaxGrammar,
    automaton: &Automaton,
    tracer: &mut impl Tracer,
) -> Result<ParseTable, Error> {
    let extras: Vec<SymbolId> = grammar.symbols.extras().collect();
    let mut states = Vec::with_capacity(automaton.states.len());

    for state in &automaton.states {
        let mut candidates: BTreeMap<SymbolId, (Option<StateId>, Vec<ProductionId>)> =
            BTreeMap::new();
        let mut row = StateRow::default();

        for (item, lookahead) in state.items.iter() {
            match item.next_symbol(grammar) {
                None => {
                    for &symbol in lookahead {
                        candidates.entry(symbol).or_default().1.push(item.production);
                    }
                }
                Some(next) if grammar.symbols.is_terminal(next) => {
                    if let Some(&target) = state.transitions.get(&next) {
                        candidates.entry(next).or_default().0 = Some(target);
                    }
                }
                Some(_) => {}
            }
        }
        for (&symbol, &target) in &state.transitions {
            if !grammar.symbols.is_terminal(symbol) {
                row.gotos.insert(symbol, target);
            }
        }

        for (lookahead, (shift, mut reduces)) in candidates {
            reduces.sort();
            reduces.dedup();
            let action = match (shift, reduces.len()) {
                (Some(target), 0) => Action::Shift(target),
                (None, 1) => reduce_action(reduces[0]),
                _ => {
                    let conflict = Conflict {
                        state: state.id,
                        lookahead,
                        shift,
                        shift_items: match shift {
                            Some(_) => conflict::shift_items(
                                grammar,
                                &automaton.first,
                                &state.items,
                                lookahead,
                            ),
                            None => Vec::new(),
                        },
                        reduces,
                    };
                    let verdict = conflict::resolve(grammar, &conflict);
                    tracer.trace_conflict(grammar, &conflict, &verdict);
                    match verdict {
                        Verdict::Resolved(Action::Reduce(production), _) => {
                            reduce_action(production)
                        }
                        Verdict::Resolved(action, _) => action,
                        Verdict::Unresolved(report) => {
                            return Err(Error::UnresolvedConflict(Box::new(report)));
                        }
                    }
                }
            };
            row.actions.insert(lookahead, action);
        }

        for &extra in &extras {
            row.actions.entry(extra).or_insert(Action::ShiftExtra);
        }
        states.push(row);
    }

    Ok(ParseTable { states })
}

fn reduce_action(production: ProductionId) -> Action {
    if production == SyntaxGrammar::START_PRODUCTION {
        Action::Accept
    } else {
        Action::Reduce(production)
    }
}
