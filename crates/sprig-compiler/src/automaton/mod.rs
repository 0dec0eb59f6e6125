//! Canonical LR(1) automaton construction.
//!
//! States are keyed by their kernel items together with lookaheads, so two
//! item sets that differ only in lookahead stay separate states.

mod builder;
mod first;
mod item;


use std::collections::BTreeMap;

use sprig_table::{StateId, SymbolId};

pub use builder::build;
pub use first::FirstSets;
pub use item::{Item, ItemSet};

/// One automaton state: its closed item set and outgoing transitions.
#[derive(Clone, Debug)]
pub struct State {
    pub id: StateId,
    pub items: ItemSet,
    pub transitions: BTreeMap<SymbolId, StateId>,
}

#[derive(Debug)]
pub struct Automaton {
    /// States in discovery order; state 0 is the start state.
    pub states: Vec<State>,
    pub first: FirstSets,
}

impl Automaton {
    #[inline]
    pub fn state(&self, id: StateId) -> &State {
        &self.states[id.index()]
    }
}
