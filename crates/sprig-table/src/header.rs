//! Compiled-language header (64 bytes).
//!
//! Section order: Header → StringBlob → StringTable → Symbols → Productions →
//! ProductionSymbols → States → Actions → Gotos

use super::constants::{
    ACTION_SIZE, GOTO_SIZE, MAGIC, PRODUCTION_SIZE, SECTION_ALIGN, STATE_SIZE, SYMBOL_SIZE,
    VERSION,
};
use super::ids::StringId;

/// File header - first 64 bytes of a compiled language.
///
/// Layout:
/// - 0-31: identity and sizes (magic, version, checksum, total_size, str_blob_size,
///   production_symbols_count, actions_count, gotos_count)
/// - 32-41: counts and the language name (5 × u16)
/// - 42-63: reserved
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct Header {
    /// Magic bytes: b"SPRG"
    pub magic: [u8; 4],
    pub version: u32,
    /// CRC32 checksum of everything after the header
    pub checksum: u32,
    /// Total file size in bytes
    pub total_size: u32,
    pub str_blob_size: u32,
    pub production_symbols_count: u32,
    pub actions_count: u32,
    pub gotos_count: u32,

    pub str_table_count: u16,
    pub symbols_count: u16,
    pub productions_count: u16,
    pub states_count: u16,
    /// Language name.
    pub name: StringId,

    pub _reserved: [u8; 22],
}

const _: () = assert!(std::mem::size_of::<Header>() == 64);

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            checksum: 0,
            total_size: 0,
            str_blob_size: 0,
            production_symbols_count: 0,
            actions_count: 0,
            gotos_count: 0,
            str_table_count: 0,
            symbols_count: 0,
            productions_count: 0,
            states_count: 0,
            name: StringId(0),
            _reserved: [0; 22],
        }
    }
}

/// Section offsets derived from header counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SectionOffsets {
    pub str_blob: u32,
    pub str_table: u32,
    pub symbols: u32,
    pub productions: u32,
    pub production_symbols: u32,
    pub states: u32,
    pub actions: u32,
    pub gotos: u32,
    /// First byte past the last section, padded to alignment.
    pub end: u32,
}

impl Header {
    /// Decode header from the first 64 bytes.
    ///
    /// Returns `None` if fewer than 64 bytes are given.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: &[u8; 64] = bytes.get(..64)?.try_into().ok()?;
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        let mut reserved = [0u8; 22];
        reserved.copy_from_slice(&bytes[42..64]);

        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u32_at(4),
            checksum: u32_at(8),
            total_size: u32_at(12),
            str_blob_size: u32_at(16),
            production_symbols_count: u32_at(20),
            actions_count: u32_at(24),
            gotos_count: u32_at(28),
            str_table_count: u16_at(32),
            symbols_count: u16_at(34),
            productions_count: u16_at(36),
            states_count: u16_at(38),
            name: StringId(u16_at(40)),
            _reserved: reserved,
        })
    }

    /// Encode header to 64 bytes.
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; 64];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.checksum.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.total_size.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.str_blob_size.to_le_bytes());
        bytes[20..24].copy_from_slice(&self.production_symbols_count.to_le_bytes());
        bytes[24..28].copy_from_slice(&self.actions_count.to_le_bytes());
        bytes[28..32].copy_from_slice(&self.gotos_count.to_le_bytes());
        bytes[32..34].copy_from_slice(&self.str_table_count.to_le_bytes());
        bytes[34..36].copy_from_slice(&self.symbols_count.to_le_bytes());
        bytes[36..38].copy_from_slice(&self.productions_count.to_le_bytes());
        bytes[38..40].copy_from_slice(&self.states_count.to_le_bytes());
        bytes[40..42].copy_from_slice(&self.name.0.to_le_bytes());
        bytes[42..64].copy_from_slice(&self._reserved);
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Compute section offsets from counts and blob size.
    ///
    /// Every section starts on a 64-byte boundary. Arithmetic is done in
    /// u64 so hostile counts cannot wrap around.
    pub fn compute_offsets(&self) -> SectionOffsets {
        let str_blob = SECTION_ALIGN as u64;
        let str_table = align_up(str_blob + self.str_blob_size as u64);
        let symbols = align_up(str_table + (self.str_table_count as u64 + 1) * 4);
        let productions = align_up(symbols + self.symbols_count as u64 * SYMBOL_SIZE as u64);
        let production_symbols =
            align_up(productions + self.productions_count as u64 * PRODUCTION_SIZE as u64);
        let states = align_up(production_symbols + self.production_symbols_count as u64 * 2);
        let actions = align_up(states + (self.states_count as u64 + 1) * STATE_SIZE as u64);
        let gotos = align_up(actions + self.actions_count as u64 * ACTION_SIZE as u64);
        let end = align_up(gotos + self.gotos_count as u64 * GOTO_SIZE as u64);

        let clamp = |v: u64| u32::try_from(v).unwrap_or(u32::MAX);
        SectionOffsets {
            str_blob: clamp(str_blob),
            str_table: clamp(str_table),
            symbols: clamp(symbols),
            productions: clamp(productions),
            production_symbols: clamp(production_symbols),
            states: clamp(states),
            actions: clamp(actions),
            gotos: clamp(gotos),
            end: clamp(end),
        }
    }
}

/// Round up to the next multiple of the section alignment.
fn align_up(value: u64) -> u64 {
    let align = SECTION_ALIGN as u64;
    (value + align - 1) & !(align - 1)
}
