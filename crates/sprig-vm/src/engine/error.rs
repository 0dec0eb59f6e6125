//! Errors that can occur while parsing input.

use sprig_table::{ProductionId, StateId, SymbolId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// No token valid in the current state matches at this position.
    #[error("unexpected character {character:?} at byte {position}")]
    UnexpectedCharacter { position: usize, character: char },

    /// A token was recognized but the current state has no action for it.
    #[error("unexpected `{token}` at byte {position}")]
    UnexpectedToken { position: usize, token: String },

    /// The table has no goto for a reduced symbol.
    #[error("no goto from state {} on symbol {}", .state.0, .symbol.0)]
    MissingGoto { state: StateId, symbol: SymbolId },

    /// A reduction needed more entries than the stack holds.
    #[error("stack underflow while reducing production {}", .production.0)]
    StackUnderflow { production: ProductionId },

    /// A pattern token could not be compiled into a matcher.
    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Execution fuel exhausted (too many driver steps).
    #[error("runtime execution limit exceeded")]
    ExecFuelExhausted,
}
