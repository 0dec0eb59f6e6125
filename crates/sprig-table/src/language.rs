//! Compiled language with validated storage.
//!
//! [`Language`] owns the artifact bytes and decodes entries lazily. All
//! structural checks happen once in [`Language::from_bytes`], so lookups
//! afterwards only index into sections known to be in bounds.

use std::io;
use std::path::Path;

use super::action::{Action, ActionEntry};
use super::constants::{
    ACTION_SIZE, GOTO_SIZE, PRODUCTION_SIZE, STATE_SIZE, SYMBOL_SIZE, VERSION,
};
use super::header::{Header, SectionOffsets};
use super::ids::{ProductionId, StateId, StringId, SymbolId};
use super::sections::{GotoEntry, ProductionEntry, StateEntry, SymbolEntry};

#[inline]
fn read_u16_le(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32_le(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn array<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&bytes[offset..offset + N]);
    out
}

/// Language load error.
#[derive(Debug, thiserror::Error)]
pub enum LanguageError {
    #[error("invalid magic: expected SPRG")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum 64)")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, computed {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("malformed {section} section at entry {index}")]
    Malformed { section: &'static str, index: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

fn malformed(section: &'static str, index: usize) -> LanguageError {
    LanguageError::Malformed { section, index }
}

/// A compiled language: symbol metadata plus action and goto tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    storage: Vec<u8>,
    header: Header,
    offsets: SectionOffsets,
}

impl Language {
    /// Load a language from owned bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, LanguageError> {
        let header = Header::from_bytes(&bytes).ok_or(LanguageError::FileTooSmall(bytes.len()))?;

        if !header.validate_magic() {
            return Err(LanguageError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(LanguageError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len() {
            return Err(LanguageError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }
        let actual = crc32fast::hash(&bytes[64..]);
        if actual != header.checksum {
            return Err(LanguageError::ChecksumMismatch {
                expected: header.checksum,
                actual,
            });
        }

        let offsets = header.compute_offsets();
        if offsets.end as usize > bytes.len() {
            return Err(malformed("layout", 0));
        }

        let language = Self {
            storage: bytes,
            header,
            offsets,
        };
        language.validate()?;
        Ok(language)
    }

    /// Load a language from a file path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LanguageError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn offsets(&self) -> &SectionOffsets {
        &self.offsets
    }

    /// Raw artifact bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.storage
    }

    /// The grammar's declared name.
    pub fn name(&self) -> &str {
        self.string(self.header.name)
    }

    pub fn string_count(&self) -> usize {
        self.header.str_table_count as usize
    }

    /// Get a string by its ID.
    pub fn string(&self, id: StringId) -> &str {
        let (start, end) = self.string_range(id.index());
        let blob = self.offsets.str_blob as usize;
        std::str::from_utf8(&self.storage[blob + start..blob + end]).unwrap_or_default()
    }

    fn string_range(&self, idx: usize) -> (usize, usize) {
        let table = self.offsets.str_table as usize;
        let start = read_u32_le(&self.storage, table + idx * 4) as usize;
        let end = read_u32_le(&self.storage, table + (idx + 1) * 4) as usize;
        (start, end)
    }

    pub fn symbol_count(&self) -> usize {
        self.header.symbols_count as usize
    }

    /// Decode a symbol entry.
    ///
    /// # Panics
    /// Panics if `id` is out of range.
    pub fn symbol(&self, id: SymbolId) -> SymbolEntry {
        assert!(id.index() < self.symbol_count(), "symbol index out of bounds");
        self.decode_symbol(id.index())
            .unwrap_or_else(|| unreachable!("symbol entries are validated on load"))
    }

    fn decode_symbol(&self, idx: usize) -> Option<SymbolEntry> {
        let offset = self.offsets.symbols as usize + idx * SYMBOL_SIZE;
        SymbolEntry::from_bytes(array(&self.storage, offset))
    }

    pub fn symbol_name(&self, id: SymbolId) -> &str {
        self.string(self.symbol(id).name)
    }

    /// All symbols in id order.
    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, SymbolEntry)> + '_ {
        (0..self.header.symbols_count).map(|i| (SymbolId(i), self.symbol(SymbolId(i))))
    }

    /// Terminals allowed between any two symbols.
    pub fn extras(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols()
            .filter(|(_, entry)| entry.extra)
            .map(|(id, _)| id)
    }

    pub fn production_count(&self) -> usize {
        self.header.productions_count as usize
    }

    /// # Panics
    /// Panics if `id` is out of range.
    pub fn production(&self, id: ProductionId) -> ProductionEntry {
        assert!(
            id.index() < self.production_count(),
            "production index out of bounds"
        );
        let offset = self.offsets.productions as usize + id.index() * PRODUCTION_SIZE;
        ProductionEntry::from_bytes(array(&self.storage, offset))
    }

    /// Right-hand side symbols of a production.
    pub fn production_rhs(&self, id: ProductionId) -> impl Iterator<Item = SymbolId> + '_ {
        let entry = self.production(id);
        let base = self.offsets.production_symbols as usize;
        let start = entry.rhs_start as usize;
        (start..start + entry.rhs_len as usize)
            .map(move |i| SymbolId(read_u16_le(&self.storage, base + i * 2)))
    }

    pub fn state_count(&self) -> usize {
        self.header.states_count as usize
    }

    fn state_entry(&self, idx: usize) -> StateEntry {
        let offset = self.offsets.states as usize + idx * STATE_SIZE;
        StateEntry::from_bytes(array(&self.storage, offset))
    }

    fn state_ranges(&self, state: StateId) -> (StateEntry, StateEntry) {
        assert!(state.index() < self.state_count(), "state index out of bounds");
        (self.state_entry(state.index()), self.state_entry(state.index() + 1))
    }

    fn action_at(&self, idx: usize) -> Option<ActionEntry> {
        let offset = self.offsets.actions as usize + idx * ACTION_SIZE;
        ActionEntry::from_bytes(array(&self.storage, offset))
    }

    fn goto_at(&self, idx: usize) -> GotoEntry {
        let offset = self.offsets.gotos as usize + idx * GOTO_SIZE;
        GotoEntry::from_bytes(array(&self.storage, offset))
    }

    /// Actions of a state, sorted by lookahead.
    pub fn actions(&self, state: StateId) -> impl Iterator<Item = ActionEntry> + '_ {
        let (this, next) = self.state_ranges(state);
        (this.actions_start as usize..next.actions_start as usize)
            .filter_map(|i| self.action_at(i))
    }

    /// Look up the action for a lookahead terminal. `None` is a syntax error.
    pub fn action(&self, state: StateId, lookahead: SymbolId) -> Option<Action> {
        let (this, next) = self.state_ranges(state);
        let (mut lo, mut hi) = (this.actions_start as usize, next.actions_start as usize);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = self.action_at(mid)?;
            if entry.lookahead == lookahead {
                return Some(entry.action);
            } else if entry.lookahead < lookahead {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        None
    }

    /// Gotos of a state, sorted by nonterminal.
    pub fn gotos(&self, state: StateId) -> impl Iterator<Item = GotoEntry> + '_ {
        let (this, next) = self.state_ranges(state);
        (this.gotos_start as usize..next.gotos_start as usize).map(|i| self.goto_at(i))
    }

    /// Look up the state to enter after reducing to `symbol`.
    pub fn goto(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        let (this, next) = self.state_ranges(state);
        let (mut lo, mut hi) = (this.gotos_start as usize, next.gotos_start as usize);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let entry = self.goto_at(mid);
            if entry.symbol == symbol {
                return Some(entry.state);
            } else if entry.symbol < symbol {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        None
    }

    /// Structural checks run once on load.
    fn validate(&self) -> Result<(), LanguageError> {
        let h = &self.header;
        let strings = h.str_table_count as usize;
        let symbols = h.symbols_count as usize;
        let productions = h.productions_count as usize;
        let states = h.states_count as usize;
        let rhs_total = h.production_symbols_count as usize;

        let mut prev_end = 0;
        for i in 0..strings {
            let (start, end) = self.string_range(i);
            if start != prev_end || end < start || end > h.str_blob_size as usize {
                return Err(malformed("string table", i));
            }
            let blob = self.offsets.str_blob as usize;
            if std::str::from_utf8(&self.storage[blob + start..blob + end]).is_err() {
                return Err(malformed("string blob", i));
            }
            prev_end = end;
        }
        if h.name.index() >= strings {
            return Err(malformed("header", 0));
        }

        let string_ok = |id: StringId| id.index() < strings;
        for i in 0..symbols {
            let entry = self.decode_symbol(i).ok_or(malformed("symbols", i))?;
            let token_ok = entry.token.is_none_or(|t| string_ok(t.text));
            if !string_ok(entry.name) || !token_ok {
                return Err(malformed("symbols", i));
            }
        }

        for i in 0..productions {
            let entry = self.production(ProductionId(i as u16));
            let end = entry.rhs_start as usize + entry.rhs_len as usize;
            if entry.lhs.index() >= symbols || end > rhs_total {
                return Err(malformed("productions", i));
            }
        }
        let base = self.offsets.production_symbols as usize;
        for i in 0..rhs_total {
            if read_u16_le(&self.storage, base + i * 2) as usize >= symbols {
                return Err(malformed("production symbols", i));
            }
        }

        let first = self.state_entry(0);
        if first.actions_start != 0 || first.gotos_start != 0 {
            return Err(malformed("states", 0));
        }
        for i in 0..states {
            let (this, next) = (self.state_entry(i), self.state_entry(i + 1));
            if next.actions_start < this.actions_start || next.gotos_start < this.gotos_start {
                return Err(malformed("states", i));
            }
        }
        let last = self.state_entry(states);
        if last.actions_start != h.actions_count || last.gotos_start != h.gotos_count {
            return Err(malformed("states", states));
        }

        for i in 0..h.actions_count as usize {
            let entry = self.action_at(i).ok_or(malformed("actions", i))?;
            let target_ok = match entry.action {
                Action::Shift(s) => s.index() < states,
                Action::Reduce(p) => p.index() < productions,
                Action::ShiftExtra | Action::Accept => true,
            };
            if entry.lookahead.index() >= symbols || !target_ok {
                return Err(malformed("actions", i));
            }
        }
        for i in 0..h.gotos_count as usize {
            let entry = self.goto_at(i);
            if entry.symbol.index() >= symbols || entry.state.index() >= states {
                return Err(malformed("gotos", i));
            }
        }

        Ok(())
    }
}
