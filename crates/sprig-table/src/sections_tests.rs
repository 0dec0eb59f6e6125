use super::*;

#[test]
fn symbol_entry_roundtrip() {
    let entry = SymbolEntry {
        name: StringId(7),
        terminal: true,
        extra: true,
        visibility: Visibility::Anonymous,
        token: Some(Token {
            kind: TokenKind::Pattern,
            text: StringId(9),
        }),
    };

    let bytes = entry.to_bytes();
    assert_eq!(bytes, [7, 0, 0b11, 1, 2, 0, 9, 0]);
    assert_eq!(SymbolEntry::from_bytes(bytes), Some(entry));
}

#[test]
fn nonterminal_entry_has_no_token() {
    let entry = SymbolEntry {
        name: StringId(1),
        terminal: false,
        extra: false,
        visibility: Visibility::Hidden,
        token: None,
    };

    assert_eq!(SymbolEntry::from_bytes(entry.to_bytes()), Some(entry));
}

#[test]
fn invalid_symbol_bytes_are_rejected() {
    // unknown visibility
    assert_eq!(SymbolEntry::from_bytes([0, 0, 1, 9, 0, 0, 0, 0]), None);
    // unknown token kind
    assert_eq!(SymbolEntry::from_bytes([0, 0, 1, 0, 5, 0, 0, 0]), None);
    // token on a nonterminal
    assert_eq!(SymbolEntry::from_bytes([0, 0, 0, 0, 1, 0, 0, 0]), None);
    // unknown flag bits
    assert_eq!(SymbolEntry::from_bytes([0, 0, 0x80, 0, 0, 0, 0, 0]), None);
}

#[test]
fn production_entry_roundtrip() {
    let entry = ProductionEntry {
        lhs: SymbolId(3),
        rhs_len: 2,
        rhs_start: 70_000,
    };

    assert_eq!(ProductionEntry::from_bytes(entry.to_bytes()), entry);
}

#[test]
fn state_and_goto_entries_roundtrip() {
    let state = StateEntry {
        actions_start: 12,
        gotos_start: 4,
    };
    let goto = GotoEntry {
        symbol: SymbolId(5),
        state: StateId(6),
    };

    assert_eq!(StateEntry::from_bytes(state.to_bytes()), state);
    assert_eq!(GotoEntry::from_bytes(goto.to_bytes()), goto);
}
