//! Sprig grammar compiler.
//!
//! Turns a grammar description into a compiled parse table:
//! - `normalize` - rule expansion into a symbol table and flat productions
//! - `automaton` - canonical LR(1) state construction
//! - `conflict` - precedence, associativity and declared-conflict resolution
//! - `table` - action and goto assignment
//! - `emit` - binary emission of the compiled language
//! - `trace` - construction tracing

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod automaton;
pub mod conflict;
pub mod emit;
pub mod normalize;
pub mod syntax;
pub mod table;
pub mod trace;

#[cfg(test)]
pub mod test_utils;

use sprig_core::{Grammar, GrammarError};
use sprig_table::{Language, LanguageError};

pub use conflict::{ConflictReport, DECLARED_CONFLICT_TIE_BREAK, TieBreak};
pub use trace::{NoopTracer, PrintTracer, Tracer};

/// Errors that can occur while compiling a grammar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid grammar description: {0}")]
    Grammar(#[from] GrammarError),

    #[error("grammar has no rules")]
    EmptyGrammar,

    #[error("rule `{0}` is declared more than once")]
    DuplicateRule(String),

    #[error("undefined symbol `{0}`")]
    UndefinedSymbol(String),

    /// An extra that is not a string, a pattern or a token rule.
    #[error("extra `{0}` is not a token")]
    NonTokenExtra(String),

    #[error("invalid pattern /{pattern}/: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Displays as the full multi-line conflict diagnostic.
    #[error("{0}")]
    UnresolvedConflict(Box<ConflictReport>),

    #[error("grammar has too many {what} ({count})")]
    TooLarge { what: &'static str, count: usize },

    /// The emitted bytes did not load back.
    #[error("emitted language is invalid: {0}")]
    Artifact(#[from] LanguageError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Either a usable language or the reason there is none.
pub type CompileResult = Result<Language>;

pub fn compile(grammar: &Grammar) -> CompileResult {
    compile_traced(grammar, &mut NoopTracer)
}

/// Parse a JSON grammar description and compile it.
pub fn compile_json(json: &str) -> CompileResult {
    let grammar = Grammar::from_json(json)?;
    compile(&grammar)
}

pub fn compile_traced(grammar: &Grammar, tracer: &mut impl Tracer) -> CompileResult {
    let syntax = normalize::normalize(grammar)?;
    let automaton = automaton::build(&syntax, tracer)?;
    let table = table::build(&syntax, &automaton, tracer)?;
    let bytes = emit::emit(&syntax, &table)?;
    Ok(Language::from_bytes(bytes)?)
}
