//! JSON deserialization for grammar.json files.
//!
//! Rules are internally tagged by their `type` field.

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Associativity, Grammar, Rule};

/// Error during grammar loading.
#[derive(Debug)]
pub enum GrammarError {
    Json(serde_json::Error),
    Binary(postcard::Error),
}

impl std::fmt::Display for GrammarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Binary(e) => write!(f, "binary decode error: {e}"),
        }
    }
}

impl std::error::Error for GrammarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Binary(e) => Some(e),
        }
    }
}

impl Grammar {
    /// Parse grammar from JSON string.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        let raw: RawGrammar = serde_json::from_str(json).map_err(GrammarError::Json)?;
        Ok(raw.into())
    }
}

#[derive(Debug, Deserialize)]
struct RawGrammar {
    name: String,
    rules: IndexMap<String, RawRule>,
    #[serde(default)]
    extras: Vec<RawRule>,
    #[serde(default)]
    conflicts: Vec<Vec<String>>,
}

impl From<RawGrammar> for Grammar {
    fn from(raw: RawGrammar) -> Self {
        // IndexMap keeps document order, so the start rule stays first.
        Self {
            name: raw.name,
            rules: raw.rules.into_iter().map(|(k, v)| (k, v.into())).collect(),
            extras: raw.extras.into_iter().map(Into::into).collect(),
            conflicts: raw.conflicts,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
#[allow(clippy::upper_case_acronyms, non_camel_case_types)]
enum RawRule {
    BLANK,
    STRING { value: String },
    PATTERN { value: String },
    SYMBOL { name: String },
    SEQ { members: Vec<RawRule> },
    CHOICE { members: Vec<RawRule> },
    REPEAT { content: Box<RawRule> },
    REPEAT1 { content: Box<RawRule> },
    PREC { value: i32, content: Box<RawRule> },
    PREC_LEFT { value: i32, content: Box<RawRule> },
    PREC_RIGHT { value: i32, content: Box<RawRule> },
}

impl From<RawRule> for Rule {
    fn from(raw: RawRule) -> Self {
        #[allow(clippy::boxed_local)] // Fields are Box<RawRule>, output needs Box<Rule>
        fn conv(content: Box<RawRule>) -> Box<Rule> {
            Box::new(Rule::from(*content))
        }

        fn members(raw: Vec<RawRule>) -> Vec<Rule> {
            raw.into_iter().map(Into::into).collect()
        }

        match raw {
            RawRule::BLANK => Rule::Blank,
            RawRule::STRING { value } => Rule::String(value),
            RawRule::PATTERN { value } => Rule::Pattern(value),
            RawRule::SYMBOL { name } => Rule::Symbol(name),
            RawRule::SEQ { members: m } => Rule::Seq(members(m)),
            RawRule::CHOICE { members: m } => Rule::Choice(members(m)),
            RawRule::REPEAT { content } => Rule::Repeat(conv(content)),
            RawRule::REPEAT1 { content } => Rule::Repeat1(conv(content)),
            RawRule::PREC { value, content } => Rule::Prec {
                associativity: Associativity::None,
                value,
                content: conv(content),
            },
            RawRule::PREC_LEFT { value, content } => Rule::Prec {
                associativity: Associativity::Left,
                value,
                content: conv(content),
            },
            RawRule::PREC_RIGHT { value, content } => Rule::Prec {
                associativity: Associativity::Right,
                value,
                content: conv(content),
            },
        }
    }
}
