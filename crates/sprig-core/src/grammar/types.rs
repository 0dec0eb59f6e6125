//! Grammar type definitions.

use serde::{Deserialize, Serialize};

/// Complete grammar description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    /// Language name, carried into the compiled artifact.
    pub name: String,
    /// Rules in declaration order. The first rule is the start symbol.
    pub rules: Vec<(String, Rule)>,
    /// Tokens allowed between any two symbols (whitespace, comments).
    #[serde(default)]
    pub extras: Vec<Rule>,
    /// Rule-name sets whose mutual ambiguity is intentional.
    #[serde(default)]
    pub conflicts: Vec<Vec<String>>,
}

/// Grammar rule variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Epsilon (empty match).
    Blank,
    /// Literal token.
    String(String),
    /// Regex token.
    Pattern(String),
    /// Reference to another rule.
    Symbol(String),
    /// Sequence of rules (must match in order).
    Seq(Vec<Rule>),
    /// Alternation.
    Choice(Vec<Rule>),
    /// Zero or more repetitions.
    Repeat(Box<Rule>),
    /// One or more repetitions.
    Repeat1(Box<Rule>),
    /// Precedence rank with optional associativity.
    Prec {
        associativity: Associativity,
        value: i32,
        content: Box<Rule>,
    },
}

/// Direction used to break ties between equal precedence ranks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Associativity {
    #[default]
    None,
    Left,
    Right,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
            extras: Vec::new(),
            conflicts: Vec::new(),
        }
    }

    /// Append a rule. Declaration order is significant.
    pub fn rule(mut self, name: impl Into<String>, rule: Rule) -> Self {
        self.rules.push((name.into(), rule));
        self
    }

    pub fn extra(mut self, rule: Rule) -> Self {
        self.extras.push(rule);
        self
    }

    pub fn conflict<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.conflicts.push(names.into_iter().map(Into::into).collect());
        self
    }

    /// Look up a rule body by name.
    pub fn find_rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }
}

impl Rule {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        Self::Pattern(value.into())
    }

    pub fn sym(name: impl Into<String>) -> Self {
        Self::Symbol(name.into())
    }

    pub fn seq(members: impl IntoIterator<Item = Rule>) -> Self {
        Self::Seq(members.into_iter().collect())
    }

    pub fn choice(members: impl IntoIterator<Item = Rule>) -> Self {
        Self::Choice(members.into_iter().collect())
    }

    pub fn repeat(content: Rule) -> Self {
        Self::Repeat(Box::new(content))
    }

    pub fn repeat1(content: Rule) -> Self {
        Self::Repeat1(Box::new(content))
    }

    pub fn prec(value: i32, content: Rule) -> Self {
        Self::with_precedence(Associativity::None, value, content)
    }

    pub fn prec_left(value: i32, content: Rule) -> Self {
        Self::with_precedence(Associativity::Left, value, content)
    }

    pub fn prec_right(value: i32, content: Rule) -> Self {
        Self::with_precedence(Associativity::Right, value, content)
    }

    fn with_precedence(associativity: Associativity, value: i32, content: Rule) -> Self {
        Self::Prec {
            associativity,
            value,
            content: Box::new(content),
        }
    }

    /// Terminal rules become tokens when they form a whole rule body.
    pub fn is_token(&self) -> bool {
        matches!(self, Self::String(_) | Self::Pattern(_))
    }

    /// Short tag used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Blank => "BLANK",
            Self::String(_) => "STRING",
            Self::Pattern(_) => "PATTERN",
            Self::Symbol(_) => "SYMBOL",
            Self::Seq(_) => "SEQ",
            Self::Choice(_) => "CHOICE",
            Self::Repeat(_) => "REPEAT",
            Self::Repeat1(_) => "REPEAT1",
            Self::Prec {
                associativity: Associativity::None,
                ..
            } => "PREC",
            Self::Prec {
                associativity: Associativity::Left,
                ..
            } => "PREC_LEFT",
            Self::Prec {
                associativity: Associativity::Right,
                ..
            } => "PREC_RIGHT",
        }
    }
}
