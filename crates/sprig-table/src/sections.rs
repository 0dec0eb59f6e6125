//! Fixed-size section entries.
//!
//! Each entry knows its own little-endian encoding. Decoding returns `None`
//! for bytes that do not describe a valid entry.

use super::ids::{StateId, StringId, SymbolId};

/// How a symbol shows up in a syntax tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Visibility {
    /// Named rule or named token: appears as a named node.
    Named = 0,
    /// Literal token: appears as an unnamed leaf.
    Anonymous = 1,
    /// Underscore rules and generated helpers: children are spliced into the parent.
    Hidden = 2,
}

impl Visibility {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Named),
            1 => Some(Self::Anonymous),
            2 => Some(Self::Hidden),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Named => "named",
            Self::Anonymous => "anonymous",
            Self::Hidden => "hidden",
        }
    }
}

/// How a terminal is recognized in input text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    /// Exact text.
    String = 1,
    /// Regular expression.
    Pattern = 2,
}

impl TokenKind {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            1 => Some(Self::String),
            2 => Some(Self::Pattern),
            _ => None,
        }
    }
}

/// Lexical definition of a terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub text: StringId,
}

/// Symbol entry (8 bytes).
///
/// Layout: name u16 | flags u8 | visibility u8 | token kind u8 | pad u8 | token text u16
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SymbolEntry {
    pub name: StringId,
    pub terminal: bool,
    pub extra: bool,
    pub visibility: Visibility,
    /// `None` for nonterminals and for end of input.
    pub token: Option<Token>,
}

const FLAG_TERMINAL: u8 = 1 << 0;
const FLAG_EXTRA: u8 = 1 << 1;

impl SymbolEntry {
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&self.name.0.to_le_bytes());
        let mut flags = 0;
        if self.terminal {
            flags |= FLAG_TERMINAL;
        }
        if self.extra {
            flags |= FLAG_EXTRA;
        }
        bytes[2] = flags;
        bytes[3] = self.visibility as u8;
        if let Some(token) = self.token {
            bytes[4] = token.kind as u8;
            bytes[6..8].copy_from_slice(&token.text.0.to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Option<Self> {
        let flags = bytes[2];
        if flags & !(FLAG_TERMINAL | FLAG_EXTRA) != 0 {
            return None;
        }
        let token = match bytes[4] {
            0 => None,
            kind => Some(Token {
                kind: TokenKind::from_u8(kind)?,
                text: StringId(u16::from_le_bytes([bytes[6], bytes[7]])),
            }),
        };
        let terminal = flags & FLAG_TERMINAL != 0;
        if token.is_some() && !terminal {
            return None;
        }
        Some(Self {
            name: StringId(u16::from_le_bytes([bytes[0], bytes[1]])),
            terminal,
            extra: flags & FLAG_EXTRA != 0,
            visibility: Visibility::from_u8(bytes[3])?,
            token,
        })
    }
}

/// Production entry (8 bytes).
///
/// Layout: lhs u16 | rhs_len u16 | rhs_start u32 (index into ProductionSymbols)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductionEntry {
    pub lhs: SymbolId,
    pub rhs_len: u16,
    pub rhs_start: u32,
}

impl ProductionEntry {
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..2].copy_from_slice(&self.lhs.0.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.rhs_len.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.rhs_start.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self {
            lhs: SymbolId(u16::from_le_bytes([bytes[0], bytes[1]])),
            rhs_len: u16::from_le_bytes([bytes[2], bytes[3]]),
            rhs_start: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }
}

/// State entry (8 bytes): where the state's actions and gotos begin.
///
/// A state's ranges end where the next entry's begin; the States section
/// carries one sentinel entry after the last state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateEntry {
    pub actions_start: u32,
    pub gotos_start: u32,
}

impl StateEntry {
    pub fn to_bytes(&self) -> [u8; 8] {
        let mut bytes = [0u8; 8];
        bytes[0..4].copy_from_slice(&self.actions_start.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.gotos_start.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; 8]) -> Self {
        Self {
            actions_start: u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]),
            gotos_start: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }
}

/// Goto entry (4 bytes): symbol u16 | target state u16
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GotoEntry {
    pub symbol: SymbolId,
    pub state: StateId,
}

impl GotoEntry {
    pub fn to_bytes(&self) -> [u8; 4] {
        let mut bytes = [0u8; 4];
        bytes[0..2].copy_from_slice(&self.symbol.0.to_le_bytes());
        bytes[2..4].copy_from_slice(&self.state.0.to_le_bytes());
        bytes
    }

    pub fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            symbol: SymbolId(u16::from_le_bytes([bytes[0], bytes[1]])),
            state: StateId(u16::from_le_bytes([bytes[2], bytes[3]])),
        }
    }
}
