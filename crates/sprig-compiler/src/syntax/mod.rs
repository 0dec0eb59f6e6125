//! Normalized grammar: interned symbols and flattened productions.
//!
//! Identifiers are the table format's own (`SymbolId`, `ProductionId`), so
//! the automaton and the emitter share one numbering. Production 0 is always
//! the augmented start production `$start → <first rule>`.

mod symbols;

#[cfg(test)]
mod symbols_tests;

use std::collections::BTreeSet;

use sprig_core::{Associativity, Name};
use sprig_table::{ProductionId, SymbolId};

pub use symbols::{START_NAME, SymbolInfo, SymbolTable, TokenDef};

/// Precedence stamped on a production.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Precedence {
    pub value: i32,
    pub associativity: Associativity,
}

impl Precedence {
    pub fn new(value: i32, associativity: Associativity) -> Self {
        Self {
            value,
            associativity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Production {
    pub lhs: SymbolId,
    pub rhs: Vec<SymbolId>,
    pub precedence: Precedence,
}

/// Output of normalization, frozen before automaton construction.
#[derive(Debug)]
pub struct SyntaxGrammar {
    pub name: String,
    /// The language name in the symbol table's string pool.
    pub name_id: Name,
    pub symbols: SymbolTable,
    pub productions: Vec<Production>,
    /// Declared conflicts as sets of rule symbols.
    pub expected_conflicts: Vec<BTreeSet<SymbolId>>,
    by_lhs: Vec<Vec<ProductionId>>,
}

impl SyntaxGrammar {
    pub const START_PRODUCTION: ProductionId = ProductionId(0);

    pub(crate) fn new(
        name: String,
        name_id: Name,
        symbols: SymbolTable,
        productions: Vec<Production>,
        expected_conflicts: Vec<BTreeSet<SymbolId>>,
    ) -> Self {
        let mut by_lhs = vec![Vec::new(); symbols.len()];
        for (i, production) in productions.iter().enumerate() {
            by_lhs[production.lhs.index()].push(ProductionId(i as u16));
        }
        Self {
            name,
            name_id,
            symbols,
            productions,
            expected_conflicts,
            by_lhs,
        }
    }

    #[inline]
    pub fn production(&self, id: ProductionId) -> &Production {
        &self.productions[id.index()]
    }

    /// Productions whose left-hand side is `lhs`, in declaration order.
    #[inline]
    pub fn productions_of(&self, lhs: SymbolId) -> &[ProductionId] {
        &self.by_lhs[lhs.index()]
    }

    pub fn production_ids(&self) -> impl Iterator<Item = ProductionId> + '_ {
        (0..self.productions.len()).map(|i| ProductionId(i as u16))
    }

    /// The augmented start symbol.
    pub fn start_symbol(&self) -> SymbolId {
        self.production(Self::START_PRODUCTION).lhs
    }

    /// Display label of a symbol (`expression`, `'+'`, `/\d+/`).
    pub fn label(&self, id: SymbolId) -> String {
        self.symbols.label(id)
    }

    /// Render a production as `lhs → a b c`.
    pub fn display_production(&self, id: ProductionId) -> String {
        let production = self.production(id);
        let rhs: Vec<String> = production.rhs.iter().map(|&s| self.label(s)).collect();
        let rhs = if rhs.is_empty() {
            "ε".to_string()
        } else {
            rhs.join(" ")
        };
        format!("{} → {}", self.label(production.lhs), rhs)
    }
}
