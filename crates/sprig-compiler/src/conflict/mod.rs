//! Conflict resolution.
//!
//! A conflict is a state and lookahead with more than one candidate action.
//! Candidates are narrowed by precedence, then associativity, then by an
//! explicit conflict declaration. Whatever is left is reported.

mod report;
mod resolve;

#[cfg(test)]
mod resolve_tests;

use sprig_table::{Action, ProductionId, StateId, SymbolId};

pub use report::ConflictReport;
pub use resolve::{resolve, shift_items};

use crate::automaton::Item;

/// Competing actions on one lookahead in one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub state: StateId,
    pub lookahead: SymbolId,
    /// Shift target, when shifting the lookahead is a candidate.
    pub shift: Option<StateId>,
    /// Items the shift would continue. See [`shift_items`].
    pub shift_items: Vec<Item>,
    /// Candidate reductions, sorted by production.
    pub reduces: Vec<ProductionId>,
}

/// Which protocol step settled a conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    Precedence,
    Associativity,
    /// The involved rules were listed in the grammar's `conflicts`.
    Declared,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Resolved(Action, Reason),
    Unresolved(ConflictReport),
}

/// Fixed policy for conflicts the grammar declares as intended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TieBreak {
    /// Shift wins over any reduction.
    pub prefer_shift: bool,
    /// Among reductions, the lowest production id wins; otherwise the highest.
    pub prefer_first_production: bool,
}

pub const DECLARED_CONFLICT_TIE_BREAK: TieBreak = TieBreak {
    prefer_shift: true,
    prefer_first_production: true,
};
