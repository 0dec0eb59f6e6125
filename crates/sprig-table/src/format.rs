//! Formatting helpers shared by dumps, traces and diagnostics.

use super::sections::{TokenKind, Visibility};

/// Minimum width needed to display numbers up to `count - 1`.
pub fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        (count - 1).ilog10() as usize + 1
    }
}

/// How a symbol is written in dumps and conflict reports.
///
/// Literal tokens are quoted (`'+'`), anonymous patterns are slashed
/// (`/\d+/`), everything else uses its name.
pub fn symbol_label(name: &str, visibility: Visibility, token: Option<TokenKind>) -> String {
    match (visibility, token) {
        (Visibility::Anonymous, Some(TokenKind::String)) => format!("'{}'", escape_literal(name)),
        (Visibility::Anonymous, Some(TokenKind::Pattern)) => format!("/{name}/"),
        _ => name.to_string(),
    }
}

/// Escape control characters and quotes in literal token text.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out
}
