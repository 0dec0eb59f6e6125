//! Rule-tree expansion into flat alternatives.
//!
//! `CHOICE` yields one alternative per member, `SEQ` concatenates the
//! cartesian product of its members, and `PREC` stamps every alternative
//! that has no stamp yet (innermost wins). Repetitions become hidden helper
//! rules with left-recursive productions.

use sprig_core::Rule;
use sprig_table::{SymbolId, TokenKind};

use crate::Error;
use crate::syntax::{Precedence, Production, SymbolTable};

use super::validate_pattern;

/// One flattened right-hand side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Alternative {
    pub symbols: Vec<SymbolId>,
    /// Stamp from the innermost enclosing `PREC`, if any.
    pub precedence: Option<Precedence>,
}

impl Alternative {
    fn empty() -> Self {
        Self {
            symbols: Vec::new(),
            precedence: None,
        }
    }

    fn single(symbol: SymbolId) -> Self {
        Self {
            symbols: vec![symbol],
            precedence: None,
        }
    }

    /// Concatenate; the rightmost stamped side keeps its stamp.
    fn concat(&self, next: &Alternative) -> Self {
        let mut symbols = Vec::with_capacity(self.symbols.len() + next.symbols.len());
        symbols.extend_from_slice(&self.symbols);
        symbols.extend_from_slice(&next.symbols);
        Self {
            symbols,
            precedence: next.precedence.or(self.precedence),
        }
    }
}

pub(crate) struct Expander<'a> {
    symbols: &'a mut SymbolTable,
    productions: &'a mut Vec<Production>,
    rule: SymbolId,
    rule_name: &'a str,
    repeats: usize,
}

impl<'a> Expander<'a> {
    pub fn new(
        symbols: &'a mut SymbolTable,
        productions: &'a mut Vec<Production>,
        rule: SymbolId,
        rule_name: &'a str,
    ) -> Self {
        Self {
            symbols,
            productions,
            rule,
            rule_name,
            repeats: 0,
        }
    }

    /// Expand a rule body. Helper productions for repetitions are appended
    /// to the shared production list as they are created.
    pub fn expand_rule(&mut self, body: &Rule) -> Result<Vec<Alternative>, Error> {
        let alternatives = self.expand(body)?;
        Ok(dedup(alternatives))
    }

    fn expand(&mut self, rule: &Rule) -> Result<Vec<Alternative>, Error> {
        match rule {
            Rule::Blank => Ok(vec![Alternative::empty()]),
            Rule::String(text) => {
                let id = self.symbols.intern_token(TokenKind::String, text)?;
                Ok(vec![Alternative::single(id)])
            }
            Rule::Pattern(text) => {
                validate_pattern(text)?;
                let id = self.symbols.intern_token(TokenKind::Pattern, text)?;
                Ok(vec![Alternative::single(id)])
            }
            Rule::Symbol(name) => {
                let id = self
                    .symbols
                    .rule(name)
                    .ok_or_else(|| Error::UndefinedSymbol(name.clone()))?;
                Ok(vec![Alternative::single(id)])
            }
            Rule::Seq(members) => {
                let mut acc = vec![Alternative::empty()];
                for member in members {
                    let next = self.expand(member)?;
                    acc = acc
                        .iter()
                        .flat_map(|left| next.iter().map(|right| left.concat(right)))
                        .collect();
                }
                Ok(acc)
            }
            Rule::Choice(members) => {
                let mut acc = Vec::new();
                for member in members {
                    acc.extend(self.expand(member)?);
                }
                Ok(dedup(acc))
            }
            Rule::Repeat(content) => {
                let mut acc = self.expand_repeat1(content)?;
                acc.push(Alternative::empty());
                Ok(acc)
            }
            Rule::Repeat1(content) => self.expand_repeat1(content),
            Rule::Prec {
                associativity,
                value,
                content,
            } => {
                let stamp = Precedence::new(*value, *associativity);
                let mut acc = self.expand(content)?;
                for alt in &mut acc {
                    alt.precedence.get_or_insert(stamp);
                }
                Ok(acc)
            }
        }
    }

    /// `helper → helper x | x`, referenced as a single symbol.
    fn expand_repeat1(&mut self, content: &Rule) -> Result<Vec<Alternative>, Error> {
        self.repeats += 1;
        let name = format!("{}_repeat{}", self.rule_name, self.repeats);
        let helper = self.symbols.add_auxiliary(self.rule, &name)?;

        let inner = dedup(self.expand(content)?);
        for alt in &inner {
            let mut rhs = Vec::with_capacity(alt.symbols.len() + 1);
            rhs.push(helper);
            rhs.extend_from_slice(&alt.symbols);
            self.productions.push(Production {
                lhs: helper,
                rhs,
                precedence: alt.precedence.unwrap_or_default(),
            });
        }
        for alt in inner {
            self.productions.push(Production {
                lhs: helper,
                rhs: alt.symbols,
                precedence: alt.precedence.unwrap_or_default(),
            });
        }

        Ok(vec![Alternative::single(helper)])
    }
}

/// Drop repeated alternatives, keeping first occurrences.
fn dedup(alternatives: Vec<Alternative>) -> Vec<Alternative> {
    let mut out: Vec<Alternative> = Vec::with_capacity(alternatives.len());
    for alt in alternatives {
        if !out.contains(&alt) {
            out.push(alt);
        }
    }
    out
}
