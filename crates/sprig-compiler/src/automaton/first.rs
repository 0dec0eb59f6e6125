//! FIRST sets and nullability, computed to a fixed point.

use std::collections::BTreeSet;

use sprig_table::SymbolId;

use crate::syntax::SyntaxGrammar;

#[derive(Debug)]
pub struct FirstSets {
    first: Vec<BTreeSet<SymbolId>>,
    nullable: Vec<bool>,
}

impl FirstSets {
    pub fn compute(grammar: &SyntaxGrammar) -> Self {
        let count = grammar.symbols.len();
        let mut first = vec![BTreeSet::new(); count];
        let mut nullable = vec![false; count];
        for terminal in grammar.symbols.terminals() {
            first[terminal.index()].insert(terminal);
        }

        let mut changed = true;
        while changed {
            changed = false;
            for production in &grammar.productions {
                let lhs = production.lhs.index();
                let mut all_nullable = true;
                for &symbol in &production.rhs {
                    if symbol.index() != lhs {
                        let additions: Vec<SymbolId> = first[symbol.index()]
                            .difference(&first[lhs])
                            .copied()
                            .collect();
                        if !additions.is_empty() {
                            first[lhs].extend(additions);
                            changed = true;
                        }
                    }
                    if !nullable[symbol.index()] {
                        all_nullable = false;
                        break;
                    }
                }
                if all_nullable && !nullable[lhs] {
                    nullable[lhs] = true;
                    changed = true;
                }
            }
        }

        Self { first, nullable }
    }

    /// Terminals that can begin a string derived from `symbol`.
    #[inline]
    pub fn first(&self, symbol: SymbolId) -> &BTreeSet<SymbolId> {
        &self.first[symbol.index()]
    }

    #[inline]
    pub fn is_nullable(&self, symbol: SymbolId) -> bool {
        self.nullable[symbol.index()]
    }

    /// FIRST of `symbols` followed by any terminal in `follow`.
    pub fn first_of_sequence(
        &self,
        symbols: &[SymbolId],
        follow: &BTreeSet<SymbolId>,
    ) -> BTreeSet<SymbolId> {
        let mut out = BTreeSet::new();
        for &symbol in symbols {
            out.extend(self.first(symbol).iter().copied());
            if !self.is_nullable(symbol) {
                return out;
            }
        }
        out.extend(follow.iter().copied());
        out
    }
}
