//! Reference parse engine for compiled Sprig languages.
//!
//! This crate runs the action and goto tables produced by the compiler over
//! input text: a context-aware lexer feeds an LR driver that builds a
//! syntax tree.

pub mod engine;

pub use engine::{
    Lexeme, Lexer, NodeId, NoopTracer, ParseLimits, Parser, PrintTracer, RuntimeError,
    SyntaxNode, Tracer, Tree,
};
