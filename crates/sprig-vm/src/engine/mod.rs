//! Parse engine: lexing, the LR driver and the resulting tree.

mod error;
mod lexer;
mod parser;
mod trace;
mod tree;

#[cfg(test)]
mod tree_tests;

pub use error::RuntimeError;
pub use lexer::{Lexeme, Lexer};
pub use parser::{ParseLimits, Parser};
pub use trace::{NoopTracer, PrintTracer, Tracer};
pub use tree::{NodeId, SyntaxNode, Tree};
