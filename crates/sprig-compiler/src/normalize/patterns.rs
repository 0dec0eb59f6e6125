//! Compile-time validation of token patterns.

use regex_syntax::ast;
use regex_syntax::hir::translate::TranslatorBuilder;

use crate::Error;

/// Check that a pattern parses and translates.
///
/// Octal escapes are disabled so `\1`-`\9` read as (unsupported)
/// backreferences instead of silently matching control characters.
pub fn validate_pattern(pattern: &str) -> Result<(), Error> {
    let invalid = |message: String| Error::InvalidPattern {
        pattern: pattern.to_string(),
        message,
    };

    if pattern.is_empty() {
        return Err(invalid("empty pattern".to_string()));
    }

    let parsed = ast::parse::ParserBuilder::new()
        .octal(false)
        .build()
        .parse(pattern)
        .map_err(|e| invalid(e.kind().to_string()))?;

    TranslatorBuilder::new()
        .build()
        .translate(pattern, &parsed)
        .map_err(|e| invalid(e.kind().to_string()))?;

    Ok(())
}
