//! Rule normalization: grammar description → symbol table + productions.
//!
//! Steps, in order:
//! 1. Declare every rule (literal or pattern bodies become named tokens)
//! 2. Expand nonterminal rule trees into flat productions
//! 3. Mark extras
//! 4. Resolve declared conflicts to symbol sets
//! 5. Add the augmented start production

mod expand;
mod patterns;


use std::collections::BTreeSet;

use sprig_core::{Grammar, Rule};
use sprig_table::{SymbolId, TokenKind};

use crate::Error;
use crate::syntax::{Precedence, Production, SymbolTable, SyntaxGrammar};

use expand::Expander;
pub use patterns::validate_pattern;

pub fn normalize(grammar: &Grammar) -> Result<SyntaxGrammar, Error> {
    let Some((first_name, _)) = grammar.rules.first() else {
        return Err(Error::EmptyGrammar);
    };

    let mut symbols = SymbolTable::new();
    for (name, body) in &grammar.rules {
        let token = match body {
            Rule::String(text) => Some((TokenKind::String, text.as_str())),
            Rule::Pattern(text) => {
                validate_pattern(text)?;
                Some((TokenKind::Pattern, text.as_str()))
            }
            _ => None,
        };
        symbols.declare_rule(name, token)?;
    }

    let mut productions = Vec::new();
    for (name, body) in &grammar.rules {
        if body.is_token() {
            continue;
        }
        let Some(lhs) = symbols.rule(name) else {
            return Err(Error::UndefinedSymbol(name.clone()));
        };
        let mut expander = Expander::new(&mut symbols, &mut productions, lhs, name);
        let alternatives = expander.expand_rule(body)?;
        productions.extend(alternatives.into_iter().map(|alt| Production {
            lhs,
            rhs: alt.symbols,
            precedence: alt.precedence.unwrap_or_default(),
        }));
    }

    for extra in &grammar.extras {
        let id = extra_symbol(&mut symbols, extra)?;
        symbols.mark_extra(id);
    }

    let expected_conflicts = grammar
        .conflicts
        .iter()
        .map(|names| {
            names
                .iter()
                .map(|name| {
                    symbols
                        .rule(name)
                        .ok_or_else(|| Error::UndefinedSymbol(name.clone()))
                })
                .collect::<Result<BTreeSet<SymbolId>, Error>>()
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let first = symbols
        .rule(first_name)
        .ok_or_else(|| Error::UndefinedSymbol(first_name.clone()))?;
    let start = symbols.add_start(first)?;
    productions.insert(
        0,
        Production {
            lhs: start,
            rhs: vec![first],
            precedence: Precedence::default(),
        },
    );
    if productions.len() > u16::MAX as usize {
        return Err(Error::TooLarge {
            what: "productions",
            count: productions.len(),
        });
    }

    let name_id = symbols.intern_string(&grammar.name);
    Ok(SyntaxGrammar::new(
        grammar.name.clone(),
        name_id,
        symbols,
        productions,
        expected_conflicts,
    ))
}

fn extra_symbol(symbols: &mut SymbolTable, extra: &Rule) -> Result<SymbolId, Error> {
    match extra {
        Rule::String(text) => symbols.intern_token(TokenKind::String, text),
        Rule::Pattern(text) => {
            validate_pattern(text)?;
            symbols.intern_token(TokenKind::Pattern, text)
        }
        Rule::Symbol(name) => {
            let id = symbols
                .rule(name)
                .ok_or_else(|| Error::UndefinedSymbol(name.clone()))?;
            if !symbols.is_terminal(id) {
                return Err(Error::NonTokenExtra(name.clone()));
            }
            Ok(id)
        }
        other => Err(Error::NonTokenExtra(other.kind_name().to_string())),
    }
}
