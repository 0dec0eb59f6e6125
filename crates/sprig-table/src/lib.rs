//! Compiled-language format for Sprig.
//!
//! This crate contains:
//! - The binary layout (header, sections, entry encodings)
//! - [`Language`], a validated view over compiled bytes
//! - [`dump`], a human-readable listing of a compiled language

#![allow(clippy::comparison_chain)]

mod action;
mod constants;
pub mod dump;
mod format;
mod header;
mod ids;
mod language;
mod sections;

#[cfg(test)]
mod language_tests;
#[cfg(test)]
mod sections_tests;
#[cfg(test)]
pub(crate) mod test_utils;

pub use action::{Action, ActionEntry};
pub use constants::{
    ACTION_SIZE, END_NAME, GOTO_SIZE, MAGIC, PRODUCTION_SIZE, SECTION_ALIGN, STATE_SIZE,
    SYMBOL_SIZE, VERSION,
};
pub use dump::{dump, width_for_count};
pub use format::{escape_literal, symbol_label};
pub use header::{Header, SectionOffsets};
pub use ids::{ProductionId, StateId, StringId, SymbolId};
pub use language::{Language, LanguageError};
pub use sections::{
    GotoEntry, ProductionEntry, StateEntry, SymbolEntry, Token, TokenKind, Visibility,
};
