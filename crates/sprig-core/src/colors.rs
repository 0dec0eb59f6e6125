//! ANSI color codes for dumps and traces.
//!
//! - Symbol: rule and token names
//! - Literal: token text
//! - Dim: indices, arrows, lookahead sets
//! - Reset: return to default

/// ANSI color palette.
///
/// Uses only standard 16-color ANSI codes so it reads on light and dark themes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub symbol: &'static str,
    pub literal: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        symbol: "\x1b[34m",
        literal: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        symbol: "",
        literal: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.symbol.is_empty()
    }

    /// Wrap a rule or token name.
    pub fn symbol(&self, text: &str) -> String {
        format!("{}{text}{}", self.symbol, self.reset)
    }

    /// Wrap token text.
    pub fn literal(&self, text: &str) -> String {
        format!("{}{text}{}", self.literal, self.reset)
    }

    /// Wrap secondary information.
    pub fn dim(&self, text: &str) -> String {
        format!("{}{text}{}", self.dim, self.reset)
    }
}
