//! LR(1) items and item sets.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

use sprig_table::{ProductionId, SymbolId};

use crate::syntax::SyntaxGrammar;

/// A production with a cursor. Lookaheads live in the owning [`ItemSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub production: ProductionId,
    pub position: usize,
}

impl Item {
    pub fn new(production: ProductionId, position: usize) -> Self {
        Self {
            production,
            position,
        }
    }

    /// Symbol right after the cursor, `None` when the item is complete.
    pub fn next_symbol(&self, grammar: &SyntaxGrammar) -> Option<SymbolId> {
        grammar
            .production(self.production)
            .rhs
            .get(self.position)
            .copied()
    }

    pub fn is_complete(&self, grammar: &SyntaxGrammar) -> bool {
        self.next_symbol(grammar).is_none()
    }

    pub fn advance(&self) -> Self {
        Self::new(self.production, self.position + 1)
    }

    /// Render as `lhs → a • b`.
    pub fn display(&self, grammar: &SyntaxGrammar) -> String {
        let production = grammar.production(self.production);
        let mut parts = vec![grammar.label(production.lhs), "→".to_string()];
        for (i, &symbol) in production.rhs.iter().enumerate() {
            if i == self.position {
                parts.push("•".to_string());
            }
            parts.push(grammar.label(symbol));
        }
        if self.position == production.rhs.len() {
            parts.push("•".to_string());
        }
        parts.join(" ")
    }
}

/// Items with merged lookahead sets, ordered for deterministic iteration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ItemSet {
    entries: BTreeMap<Item, BTreeSet<SymbolId>>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` with `lookahead`. Returns true if anything was new.
    pub fn insert(&mut self, item: Item, lookahead: &BTreeSet<SymbolId>) -> bool {
        match self.entries.entry(item) {
            Entry::Vacant(entry) => {
                entry.insert(lookahead.clone());
                true
            }
            Entry::Occupied(mut entry) => {
                let set = entry.get_mut();
                let before = set.len();
                set.extend(lookahead.iter().copied());
                set.len() != before
            }
        }
    }

    pub fn lookahead(&self, item: &Item) -> Option<&BTreeSet<SymbolId>> {
        self.entries.get(item)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Item, &BTreeSet<SymbolId>)> {
        self.entries.iter()
    }

    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
