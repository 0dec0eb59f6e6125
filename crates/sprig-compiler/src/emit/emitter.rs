//! Section assembly and header generation.

use sprig_core::Name;
use sprig_table::{
    ActionEntry, GotoEntry, Header, ProductionEntry, SECTION_ALIGN, StateEntry, StringId,
    SymbolEntry, Token,
};

use crate::Error;
use crate::syntax::SyntaxGrammar;
use crate::table::ParseTable;

/// Emit the compiled language for a normalized grammar and its table.
pub fn emit(grammar: &SyntaxGrammar, table: &ParseTable) -> Result<Vec<u8>, Error> {
    let interner = grammar.symbols.interner();
    if interner.len() > u16::MAX as usize {
        return Err(Error::TooLarge {
            what: "strings",
            count: interner.len(),
        });
    }

    if table.states.len() > u16::MAX as usize {
        return Err(Error::TooLarge {
            what: "states",
            count: table.states.len(),
        });
    }

    let (str_blob, str_offsets) = interner.to_blob();
    let str_table: Vec<u8> = str_offsets.iter().flat_map(|o| o.to_le_bytes()).collect();
    let symbols = emit_symbols(grammar);
    let (productions, production_symbols, rhs_count) = emit_productions(grammar)?;
    let (states, actions, gotos, actions_count, gotos_count) = emit_states(table)?;

    // Header → StringBlob → StringTable → Symbols → Productions →
    // ProductionSymbols → States → Actions → Gotos
    let mut output = vec![0u8; 64];
    emit_section(&mut output, &str_blob);
    emit_section(&mut output, &str_table);
    emit_section(&mut output, &symbols);
    emit_section(&mut output, &productions);
    emit_section(&mut output, &production_symbols);
    emit_section(&mut output, &states);
    emit_section(&mut output, &actions);
    emit_section(&mut output, &gotos);
    pad_to_section(&mut output);

    let total_size = u32::try_from(output.len()).map_err(|_| Error::TooLarge {
        what: "bytes",
        count: output.len(),
    })?;
    let mut header = Header {
        total_size,
        str_blob_size: str_blob.len() as u32,
        production_symbols_count: rhs_count,
        actions_count,
        gotos_count,
        str_table_count: interner.len() as u16,
        symbols_count: grammar.symbols.len() as u16,
        productions_count: grammar.productions.len() as u16,
        states_count: table.states.len() as u16,
        name: string_id(grammar.name_id),
        ..Default::default()
    };
    header.checksum = crc32fast::hash(&output[64..]);
    output[..64].copy_from_slice(&header.to_bytes());

    Ok(output)
}

#[inline]
fn string_id(name: Name) -> StringId {
    StringId(name.as_u32() as u16)
}

/// Pad a buffer to the section alignment boundary.
fn pad_to_section(buf: &mut Vec<u8>) {
    let rem = buf.len() % SECTION_ALIGN;
    if rem != 0 {
        let padding = SECTION_ALIGN - rem;
        buf.resize(buf.len() + padding, 0);
    }
}

fn emit_section(output: &mut Vec<u8>, data: &[u8]) {
    pad_to_section(output);
    output.extend_from_slice(data);
}

fn emit_symbols(grammar: &SyntaxGrammar) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(grammar.symbols.len() * 8);
    for (_, info) in grammar.symbols.iter() {
        let entry = SymbolEntry {
            name: string_id(info.name),
            terminal: info.terminal,
            extra: info.extra,
            visibility: info.visibility,
            token: info.token.map(|t| Token {
                kind: t.kind,
                text: string_id(t.text),
            }),
        };
        bytes.extend_from_slice(&entry.to_bytes());
    }
    bytes
}

/// Production entries and the flattened right-hand sides they index into.
fn emit_productions(grammar: &SyntaxGrammar) -> Result<(Vec<u8>, Vec<u8>, u32), Error> {
    let mut entries = Vec::with_capacity(grammar.productions.len() * 8);
    let mut rhs = Vec::new();
    let mut count = 0u32;
    for production in &grammar.productions {
        let rhs_len = u16::try_from(production.rhs.len()).map_err(|_| Error::TooLarge {
            what: "production symbols",
            count: production.rhs.len(),
        })?;
        let entry = ProductionEntry {
            lhs: production.lhs,
            rhs_len,
            rhs_start: count,
        };
        entries.extend_from_slice(&entry.to_bytes());
        for symbol in &production.rhs {
            rhs.extend_from_slice(&symbol.0.to_le_bytes());
        }
        count += rhs_len as u32;
    }
    Ok((entries, rhs, count))
}

type StateSections = (Vec<u8>, Vec<u8>, Vec<u8>, u32, u32);

/// State ranges (plus a closing sentinel), actions and gotos.
fn emit_states(table: &ParseTable) -> Result<StateSections, Error> {
    let mut states = Vec::with_capacity((table.states.len() + 1) * 8);
    let mut actions = Vec::new();
    let mut gotos = Vec::new();
    let (mut actions_count, mut gotos_count) = (0usize, 0usize);

    for row in &table.states {
        let entry = StateEntry {
            actions_start: actions_count as u32,
            gotos_start: gotos_count as u32,
        };
        states.extend_from_slice(&entry.to_bytes());
        for (&lookahead, &action) in &row.actions {
            actions.extend_from_slice(&ActionEntry::new(lookahead, action).to_bytes());
        }
        for (&symbol, &state) in &row.gotos {
            gotos.extend_from_slice(&GotoEntry { symbol, state }.to_bytes());
        }
        actions_count += row.actions.len();
        gotos_count += row.gotos.len();
    }

    let too_large = |what: &'static str, count: usize| Error::TooLarge { what, count };
    let actions_count =
        u32::try_from(actions_count).map_err(|_| too_large("actions", actions_count))?;
    let gotos_count = u32::try_from(gotos_count).map_err(|_| too_large("gotos", gotos_count))?;
    let sentinel = StateEntry {
        actions_start: actions_count,
        gotos_start: gotos_count,
    };
    states.extend_from_slice(&sentinel.to_bytes());

    Ok((states, actions, gotos, actions_count, gotos_count))
}
