//! Symbol table: interns rule names and tokens into table identifiers.
//!
//! Symbol 0 is end of input. Rules get ids in declaration order, then
//! anonymous tokens and generated helpers in discovery order.

use std::collections::HashMap;

use sprig_core::{Interner, Name};
use sprig_table::{END_NAME, SymbolId, TokenKind, Visibility, symbol_label};

use crate::Error;

/// Name of the augmented start symbol.
pub const START_NAME: &str = "$start";

/// Lexical definition of a terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TokenDef {
    pub kind: TokenKind,
    pub text: Name,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolInfo {
    pub name: Name,
    pub terminal: bool,
    pub visibility: Visibility,
    pub extra: bool,
    /// `None` for nonterminals and end of input.
    pub token: Option<TokenDef>,
    /// Rule a generated helper (or `$start`) stands for.
    pub origin: Option<SymbolId>,
}

#[derive(Debug)]
pub struct SymbolTable {
    interner: Interner,
    symbols: Vec<SymbolInfo>,
    rules: HashMap<String, SymbolId>,
    anonymous: HashMap<TokenDef, SymbolId>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut interner = Interner::new();
        let end = SymbolInfo {
            name: interner.intern(END_NAME),
            terminal: true,
            visibility: Visibility::Hidden,
            extra: false,
            token: None,
            origin: None,
        };
        Self {
            interner,
            symbols: vec![end],
            rules: HashMap::new(),
            anonymous: HashMap::new(),
        }
    }

    fn push(&mut self, info: SymbolInfo) -> Result<SymbolId, Error> {
        let id = u16::try_from(self.symbols.len()).map_err(|_| Error::TooLarge {
            what: "symbols",
            count: self.symbols.len() + 1,
        })?;
        self.symbols.push(info);
        Ok(SymbolId(id))
    }

    /// Declare a named rule. A rule whose body is a single literal or
    /// pattern becomes a named terminal.
    pub fn declare_rule(
        &mut self,
        name: &str,
        token: Option<(TokenKind, &str)>,
    ) -> Result<SymbolId, Error> {
        if self.rules.contains_key(name) {
            return Err(Error::DuplicateRule(name.to_string()));
        }
        let visibility = if name.starts_with('_') {
            Visibility::Hidden
        } else {
            Visibility::Named
        };
        let token = token.map(|(kind, text)| TokenDef {
            kind,
            text: self.interner.intern(text),
        });
        let info = SymbolInfo {
            name: self.interner.intern(name),
            terminal: token.is_some(),
            visibility,
            extra: false,
            token,
            origin: None,
        };
        let id = self.push(info)?;
        self.rules.insert(name.to_string(), id);
        Ok(id)
    }

    /// Look up a declared rule by name.
    pub fn rule(&self, name: &str) -> Option<SymbolId> {
        self.rules.get(name).copied()
    }

    /// Intern an anonymous terminal. Identical text of the same kind
    /// always yields the same symbol.
    pub fn intern_token(&mut self, kind: TokenKind, text: &str) -> Result<SymbolId, Error> {
        let token = TokenDef {
            kind,
            text: self.interner.intern(text),
        };
        if let Some(&id) = self.anonymous.get(&token) {
            return Ok(id);
        }
        let id = self.push(SymbolInfo {
            name: token.text,
            terminal: true,
            visibility: Visibility::Anonymous,
            extra: false,
            token: Some(token),
            origin: None,
        })?;
        self.anonymous.insert(token, id);
        Ok(id)
    }

    /// Add a hidden helper nonterminal generated while expanding `origin`.
    pub fn add_auxiliary(&mut self, origin: SymbolId, name: &str) -> Result<SymbolId, Error> {
        let name = self.interner.intern(name);
        self.push(SymbolInfo {
            name,
            terminal: false,
            visibility: Visibility::Hidden,
            extra: false,
            token: None,
            origin: Some(origin),
        })
    }

    /// Add the augmented start symbol. Conflicts through it are attributed
    /// to the rule it derives.
    pub fn add_start(&mut self, first: SymbolId) -> Result<SymbolId, Error> {
        let name = self.interner.intern(START_NAME);
        self.push(SymbolInfo {
            name,
            terminal: false,
            visibility: Visibility::Hidden,
            extra: false,
            token: None,
            origin: Some(first),
        })
    }

    pub fn mark_extra(&mut self, id: SymbolId) {
        self.symbols[id.index()].extra = true;
    }

    /// Intern a string that is not a symbol (the language name).
    pub fn intern_string(&mut self, s: &str) -> Name {
        self.interner.intern(s)
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> &SymbolInfo {
        &self.symbols[id.index()]
    }

    pub fn name(&self, id: SymbolId) -> &str {
        self.interner.resolve(self.get(id).name)
    }

    #[inline]
    pub fn is_terminal(&self, id: SymbolId) -> bool {
        self.get(id).terminal
    }

    /// The rule a symbol belongs to: itself, or the rule a helper was
    /// generated for.
    pub fn rule_of(&self, id: SymbolId) -> SymbolId {
        self.get(id).origin.unwrap_or(id)
    }

    pub fn label(&self, id: SymbolId) -> String {
        let info = self.get(id);
        symbol_label(
            self.interner.resolve(info.name),
            info.visibility,
            info.token.map(|t| t.kind),
        )
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolInfo)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, info)| (SymbolId(i as u16), info))
    }

    pub fn terminals(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.iter().filter(|(_, info)| info.terminal).map(|(id, _)| id)
    }

    pub fn extras(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.iter().filter(|(_, info)| info.extra).map(|(id, _)| id)
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }
}
