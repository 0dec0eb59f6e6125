//! Compiled-language emission.
//!
//! Serializes the symbol table, productions and parse table into the
//! sectioned binary format read by `sprig_table::Language`.

mod emitter;


pub use emitter::emit;
