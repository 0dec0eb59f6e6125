//! Table format constants.

/// Magic bytes identifying a compiled Sprig language.
pub const MAGIC: [u8; 4] = *b"SPRG";

/// Current format version.
pub const VERSION: u32 = 1;

/// Section alignment in bytes.
pub const SECTION_ALIGN: usize = 64;

/// Bytes per symbol entry.
pub const SYMBOL_SIZE: usize = 8;

/// Bytes per production entry.
pub const PRODUCTION_SIZE: usize = 8;

/// Bytes per state entry (the table carries one extra sentinel entry).
pub const STATE_SIZE: usize = 8;

/// Bytes per action entry.
pub const ACTION_SIZE: usize = 8;

/// Bytes per goto entry.
pub const GOTO_SIZE: usize = 4;

/// Name of the end-of-input terminal, always symbol 0.
pub const END_NAME: &str = "end";
