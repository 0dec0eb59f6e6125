//! Grammar description types.
//!
//! A grammar is an ordered set of named rule trees plus extras and declared
//! conflicts. It is loaded from the `grammar.json` format and can be cached
//! as a compact binary snapshot.

mod binary;
mod json;
mod types;

#[cfg(test)]
mod binary_tests;

pub use json::GrammarError;
pub use types::{Associativity, Grammar, Rule};
