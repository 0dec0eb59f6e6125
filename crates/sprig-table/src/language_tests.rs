//! Tests for loading and querying compiled languages.

use std::io::Write;

use crate::test_utils::greeting_language;
use crate::*;

#[test]
fn loads_valid_language() {
    let language = Language::from_bytes(greeting_language()).unwrap();

    assert_eq!(language.name(), "greeting");
    assert_eq!(language.symbol_count(), 5);
    assert_eq!(language.production_count(), 2);
    assert_eq!(language.state_count(), 3);
    assert_eq!(language.bytes().len() % SECTION_ALIGN, 0);
}

#[test]
fn symbol_metadata() {
    let language = Language::from_bytes(greeting_language()).unwrap();

    assert_eq!(language.symbol_name(SymbolId::END), "end");
    assert_eq!(language.symbol_name(SymbolId(1)), "greeting");

    let hi = language.symbol(SymbolId(2));
    assert!(hi.terminal);
    assert_eq!(hi.visibility, Visibility::Anonymous);
    let token = hi.token.unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(language.string(token.text), "hi");

    let extras: Vec<_> = language.extras().collect();
    assert_eq!(extras, vec![SymbolId(3)]);
}

#[test]
fn productions_keep_rhs() {
    let language = Language::from_bytes(greeting_language()).unwrap();

    let start = language.production(ProductionId(0));
    assert_eq!(start.lhs, SymbolId(4));
    let rhs: Vec<_> = language.production_rhs(ProductionId(0)).collect();
    assert_eq!(rhs, vec![SymbolId(1)]);

    let rhs: Vec<_> = language.production_rhs(ProductionId(1)).collect();
    assert_eq!(rhs, vec![SymbolId(2)]);
}

#[test]
fn action_and_goto_lookup() {
    let language = Language::from_bytes(greeting_language()).unwrap();

    assert_eq!(
        language.action(StateId::START, SymbolId(2)),
        Some(Action::Shift(StateId(2)))
    );
    assert_eq!(
        language.action(StateId::START, SymbolId(3)),
        Some(Action::ShiftExtra)
    );
    assert_eq!(language.action(StateId::START, SymbolId::END), None);
    assert_eq!(language.action(StateId(1), SymbolId::END), Some(Action::Accept));
    assert_eq!(
        language.action(StateId(2), SymbolId::END),
        Some(Action::Reduce(ProductionId(1)))
    );

    assert_eq!(language.goto(StateId::START, SymbolId(1)), Some(StateId(1)));
    assert_eq!(language.goto(StateId(1), SymbolId(1)), None);

    let lookaheads: Vec<_> = language.actions(StateId::START).map(|a| a.lookahead).collect();
    assert_eq!(lookaheads, vec![SymbolId(2), SymbolId(3)]);
    assert_eq!(language.gotos(StateId(2)).count(), 0);
}

#[test]
fn rejects_short_input() {
    let err = Language::from_bytes(vec![0; 10]).unwrap_err();
    assert!(matches!(err, LanguageError::FileTooSmall(10)));
}

#[test]
fn rejects_bad_magic() {
    let mut bytes = greeting_language();
    bytes[0] = b'X';
    let err = Language::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, LanguageError::InvalidMagic));
    insta::assert_snapshot!(err.to_string(), @"invalid magic: expected SPRG");
}

#[test]
fn rejects_unknown_version() {
    let mut bytes = greeting_language();
    bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
    let err = Language::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, LanguageError::UnsupportedVersion(99)));
}

#[test]
fn rejects_truncated_file() {
    let mut bytes = greeting_language();
    bytes.truncate(bytes.len() - 64);
    let err = Language::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, LanguageError::SizeMismatch { .. }));
}

#[test]
fn rejects_corrupted_body() {
    let mut bytes = greeting_language();
    let last = bytes.len() - 1;
    bytes[last] ^= 0xFF;
    let err = Language::from_bytes(bytes).unwrap_err();
    assert!(matches!(err, LanguageError::ChecksumMismatch { .. }));
}

#[test]
fn rejects_out_of_range_shift_target() {
    let mut bytes = greeting_language();
    let language = Language::from_bytes(bytes.clone()).unwrap();

    // First action of state 0 shifts to state 2; point it past the last state.
    let payload = language.offsets().actions as usize + 4;
    bytes[payload..payload + 2].copy_from_slice(&7u16.to_le_bytes());
    let checksum = crc32fast::hash(&bytes[64..]);
    bytes[8..12].copy_from_slice(&checksum.to_le_bytes());

    let err = Language::from_bytes(bytes).unwrap_err();
    assert!(matches!(
        err,
        LanguageError::Malformed {
            section: "actions",
            index: 0
        }
    ));
}

#[test]
fn loads_from_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&greeting_language()).unwrap();

    let language = Language::from_path(file.path()).unwrap();
    assert_eq!(language.name(), "greeting");
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Language::from_path(dir.path().join("missing.sprig")).unwrap_err();
    assert!(matches!(err, LanguageError::Io(_)));
}
