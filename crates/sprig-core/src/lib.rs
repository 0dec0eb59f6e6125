#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for Sprig.
//!
//! - [`grammar`]: the grammar description consumed by the compiler
//! - [`Interner`]: string interning shared by the compiler and the table format
//! - [`Colors`]: terminal palette for dumps and traces

pub mod colors;
pub mod grammar;
pub mod interner;


pub use colors::Colors;
pub use grammar::{Associativity, Grammar, GrammarError, Rule};
pub use interner::{Interner, Name};
