//! Parse actions and their table encoding.

use super::ids::{ProductionId, StateId, SymbolId};

/// What the parser does on a lookahead terminal.
///
/// A missing table entry means a syntax error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Consume the token and move to a state.
    Shift(StateId),
    /// Consume an extra token without changing state.
    ShiftExtra,
    /// Pop the production's children and push its left-hand side.
    Reduce(ProductionId),
    /// Input is complete.
    Accept,
}

const KIND_SHIFT: u8 = 1;
const KIND_SHIFT_EXTRA: u8 = 2;
const KIND_REDUCE: u8 = 3;
const KIND_ACCEPT: u8 = 4;

/// Action entry (8 bytes).
///
/// Layout: lookahead u16 | kind u8 | pad u8 | payload u16 | pad u16
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionEntry {
    pub lookahead: SymbolId,
    pub action: Action,
}

impl ActionEntry {
    pub fn new(lookahead: SymbolId, action: Action) -> Self {
        Self { lookahead, action }
    }

    pub fn to_bytes(&self) -> [u8; 8] {
        let (kind, payload) = match self.action {
            Action::Shift(state) => (KIND_SHIFT, state.0),
            Action::ShiftExtra => (KIND_SHIFT_EXTRA, 0),
            Action::Reduce(production) => (KIND_REDUCE, production.0),
            Action::Accept => (KIND_ACCEPT, 0),
        };
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&self.lookahead.0.to_le_bytes());
        bytes[2] = kind;
        bytes[4..6].copy_from_slice(&payload.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Option<Self> {
        let payload = u16::from_le_bytes([bytes[4], bytes[5]]);
        let action = match bytes[2] {
            KIND_SHIFT => Action::Shift(StateId(payload)),
            KIND_SHIFT_EXTRA => Action::ShiftExtra,
            KIND_REDUCE => Action::Reduce(ProductionId(payload)),
            KIND_ACCEPT => Action::Accept,
            _ => return None,
        };
        Some(Self {
            lookahead: SymbolId(u16::from_le_bytes([bytes[0], bytes[1]])),
            action,
        })
    }
}
