//! Hand assembly of small compiled languages for loader tests.

use sprig_core::Interner;

use crate::{
    ActionEntry, GotoEntry, Header, ProductionEntry, SECTION_ALIGN, StateEntry, StringId,
    SymbolEntry, SymbolId,
};

#[derive(Default)]
pub struct TableWriter {
    pub strings: Interner,
    pub symbols: Vec<SymbolEntry>,
    pub productions: Vec<(SymbolId, Vec<SymbolId>)>,
    pub states: Vec<(Vec<ActionEntry>, Vec<GotoEntry>)>,
    pub name: &'static str,
}

impl TableWriter {
    pub fn string(&mut self, s: &str) -> StringId {
        StringId(self.strings.intern(s).as_u32() as u16)
    }

    pub fn build(mut self) -> Vec<u8> {
        let name = self.string(self.name);
        let (str_blob, offsets) = self.strings.to_blob();
        let str_table: Vec<u8> = offsets.iter().flat_map(|o| o.to_le_bytes()).collect();
        let symbols: Vec<u8> = self.symbols.iter().flat_map(|s| s.to_bytes()).collect();

        let mut productions = Vec::new();
        let mut rhs = Vec::new();
        for (lhs, symbols) in &self.productions {
            let entry = ProductionEntry {
                lhs: *lhs,
                rhs_len: symbols.len() as u16,
                rhs_start: (rhs.len() / 2) as u32,
            };
            productions.extend_from_slice(&entry.to_bytes());
            rhs.extend(symbols.iter().flat_map(|s| s.0.to_le_bytes()));
        }

        let mut states = Vec::new();
        let mut actions = Vec::new();
        let mut gotos = Vec::new();
        let (mut action_count, mut goto_count) = (0u32, 0u32);
        for (state_actions, state_gotos) in &self.states {
            let entry = StateEntry {
                actions_start: action_count,
                gotos_start: goto_count,
            };
            states.extend_from_slice(&entry.to_bytes());
            for a in state_actions {
                actions.extend_from_slice(&a.to_bytes());
            }
            for g in state_gotos {
                gotos.extend_from_slice(&g.to_bytes());
            }
            action_count += state_actions.len() as u32;
            goto_count += state_gotos.len() as u32;
        }
        let sentinel = StateEntry {
            actions_start: action_count,
            gotos_start: goto_count,
        };
        states.extend_from_slice(&sentinel.to_bytes());

        let mut output = vec![0u8; 64];
        for section in [&str_blob, &str_table, &symbols, &productions, &rhs, &states, &actions, &gotos] {
            pad(&mut output);
            output.extend_from_slice(section);
        }
        pad(&mut output);

        let mut header = Header {
            total_size: output.len() as u32,
            str_blob_size: str_blob.len() as u32,
            production_symbols_count: (rhs.len() / 2) as u32,
            actions_count: action_count,
            gotos_count: goto_count,
            str_table_count: self.strings.len() as u16,
            symbols_count: self.symbols.len() as u16,
            productions_count: self.productions.len() as u16,
            states_count: self.states.len() as u16,
            name,
            ..Default::default()
        };
        header.checksum = crc32fast::hash(&output[64..]);
        output[..64].copy_from_slice(&header.to_bytes());
        output
    }
}

fn pad(buf: &mut Vec<u8>) {
    let rem = buf.len() % SECTION_ALIGN;
    if rem != 0 {
        buf.resize(buf.len() + SECTION_ALIGN - rem, 0);
    }
}

/// `greeting → 'hi'`, with whitespace as an extra.
///
/// Symbols: 0 end, 1 greeting, 2 'hi', 3 /\s+/, 4 $start.
/// Productions: 0 $start → greeting, 1 greeting → 'hi'.
pub fn greeting_language() -> Vec<u8> {
    use crate::{Action, ProductionId, StateId, Token, TokenKind, Visibility};

    let mut w = TableWriter {
        name: "greeting",
        ..Default::default()
    };
    let end = w.string("end");
    let greeting = w.string("greeting");
    let hi = w.string("hi");
    let ws = w.string("\\s+");
    let start = w.string("$start");

    let terminal = |name, visibility, token, extra| SymbolEntry {
        name,
        terminal: true,
        extra,
        visibility,
        token,
    };
    let rule = |name, visibility| SymbolEntry {
        name,
        terminal: false,
        extra: false,
        visibility,
        token: None,
    };
    w.symbols = vec![
        terminal(end, Visibility::Hidden, None, false),
        rule(greeting, Visibility::Named),
        terminal(
            hi,
            Visibility::Anonymous,
            Some(Token { kind: TokenKind::String, text: hi }),
            false,
        ),
        terminal(
            ws,
            Visibility::Anonymous,
            Some(Token { kind: TokenKind::Pattern, text: ws }),
            true,
        ),
        rule(start, Visibility::Hidden),
    ];
    w.productions = vec![
        (SymbolId(4), vec![SymbolId(1)]),
        (SymbolId(1), vec![SymbolId(2)]),
    ];
    let extra = ActionEntry::new(SymbolId(3), Action::ShiftExtra);
    w.states = vec![
        (
            vec![ActionEntry::new(SymbolId(2), Action::Shift(StateId(2))), extra],
            vec![GotoEntry { symbol: SymbolId(1), state: StateId(1) }],
        ),
        (vec![ActionEntry::new(SymbolId::END, Action::Accept), extra], vec![]),
        (
            vec![
                ActionEntry::new(SymbolId::END, Action::Reduce(ProductionId(1))),
                extra,
            ],
            vec![],
        ),
    ];
    w.build()
}
