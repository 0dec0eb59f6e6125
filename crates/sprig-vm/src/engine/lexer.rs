//! Context-aware longest-match lexer.
//!
//! Only terminals the current state has an action for are tried. Pattern
//! tokens are compiled once into anchored dense DFAs.

use regex_automata::dfa::{Automaton, StartKind, dense};
use regex_automata::{Anchored, Input, MatchKind};
use sprig_table::{Language, SymbolId, TokenKind};

use super::error::RuntimeError;

/// A recognized token and its byte range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lexeme {
    pub symbol: SymbolId,
    pub start: usize,
    pub end: usize,
}

impl Lexeme {
    fn end_of_input(position: usize) -> Self {
        Self {
            symbol: SymbolId::END,
            start: position,
            end: position,
        }
    }
}

enum Matcher {
    Literal(String),
    Pattern(dense::DFA<Vec<u32>>),
}

impl Matcher {
    /// Length of the longest match starting at `position`.
    fn longest(&self, text: &str, position: usize) -> Option<usize> {
        match self {
            Self::Literal(literal) => text[position..]
                .starts_with(literal.as_str())
                .then_some(literal.len()),
            Self::Pattern(dfa) => {
                let input = Input::new(text)
                    .span(position..text.len())
                    .anchored(Anchored::Yes);
                dfa.try_search_fwd(&input)
                    .ok()
                    .flatten()
                    .map(|m| m.offset() - position)
            }
        }
    }
}

/// Matchers for every terminal of a language, indexed by symbol.
pub struct Lexer {
    matchers: Vec<Option<Matcher>>,
}

impl Lexer {
    pub fn new(language: &Language) -> Result<Self, RuntimeError> {
        let mut matchers = Vec::with_capacity(language.symbol_count());
        for (_, entry) in language.symbols() {
            let Some(token) = entry.token else {
                matchers.push(None);
                continue;
            };
            let text = language.string(token.text);
            let matcher = match token.kind {
                TokenKind::String => Matcher::Literal(text.to_string()),
                TokenKind::Pattern => Matcher::Pattern(compile_pattern(text)?),
            };
            matchers.push(Some(matcher));
        }
        Ok(Self { matchers })
    }

    /// Recognize the next token at `position`, trying only `candidates`.
    ///
    /// The longest match wins. Equal lengths prefer literal tokens, then the
    /// lower symbol id. Empty matches never count.
    pub fn lex(
        &self,
        text: &str,
        position: usize,
        candidates: impl IntoIterator<Item = SymbolId>,
    ) -> Result<Lexeme, RuntimeError> {
        let Some(character) = text[position..].chars().next() else {
            return Ok(Lexeme::end_of_input(position));
        };

        let mut best: Option<(usize, bool, SymbolId)> = None;
        for symbol in candidates {
            let Some(Some(matcher)) = self.matchers.get(symbol.index()) else {
                continue;
            };
            let Some(len) = matcher.longest(text, position).filter(|&len| len > 0) else {
                continue;
            };
            let literal = matches!(matcher, Matcher::Literal(_));
            let better = match best {
                None => true,
                Some((best_len, best_literal, best_symbol)) => {
                    (len, literal, std::cmp::Reverse(symbol))
                        > (best_len, best_literal, std::cmp::Reverse(best_symbol))
                }
            };
            if better {
                best = Some((len, literal, symbol));
            }
        }

        match best {
            Some((len, _, symbol)) => Ok(Lexeme {
                symbol,
                start: position,
                end: position + len,
            }),
            None => Err(RuntimeError::UnexpectedCharacter {
                position,
                character,
            }),
        }
    }
}

fn compile_pattern(pattern: &str) -> Result<dense::DFA<Vec<u32>>, RuntimeError> {
    dense::DFA::builder()
        .configure(
            dense::DFA::config()
                .start_kind(StartKind::Anchored)
                .match_kind(MatchKind::All),
        )
        .build(pattern)
        .map_err(|e| RuntimeError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
