//! Tracing hooks for the parse driver.
//!
//! [`NoopTracer`] methods are empty and `#[inline(always)]`, so an untraced
//! parse carries no tracing cost.

use sprig_core::Colors;
use sprig_table::dump::label;
use sprig_table::{Language, ProductionId, StateId};

use super::lexer::Lexeme;

pub trait Tracer {
    /// Called after a token is recognized.
    fn trace_lex(&mut self, lexeme: &Lexeme);

    /// Called when a token is shifted onto the stack.
    fn trace_shift(&mut self, lexeme: &Lexeme, next: StateId);

    /// Called when an extra token is shifted in place.
    fn trace_extra(&mut self, lexeme: &Lexeme);

    /// Called after a reduction and its goto.
    fn trace_reduce(&mut self, production: ProductionId, goto: StateId);

    fn trace_accept(&mut self);
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_lex(&mut self, _lexeme: &Lexeme) {}

    #[inline(always)]
    fn trace_shift(&mut self, _lexeme: &Lexeme, _next: StateId) {}

    #[inline(always)]
    fn trace_extra(&mut self, _lexeme: &Lexeme) {}

    #[inline(always)]
    fn trace_reduce(&mut self, _production: ProductionId, _goto: StateId) {}

    #[inline(always)]
    fn trace_accept(&mut self) {}
}

/// Tracer that collects one line per driver step.
pub struct PrintTracer<'a> {
    language: &'a Language,
    source: &'a str,
    lines: Vec<String>,
    colors: Colors,
}

impl<'a> PrintTracer<'a> {
    pub fn new(language: &'a Language, source: &'a str, colors: Colors) -> Self {
        Self {
            language,
            source,
            lines: Vec::new(),
            colors,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn output(&self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }

    fn token(&self, lexeme: &Lexeme) -> String {
        self.colors.symbol(&label(self.language, lexeme.symbol))
    }
}

impl Tracer for PrintTracer<'_> {
    fn trace_lex(&mut self, lexeme: &Lexeme) {
        let text = &self.source[lexeme.start..lexeme.end];
        let text = self.colors.literal(&format!("{text:?}"));
        let token = self.token(lexeme);
        self.lines.push(format!("lex     {token} {text}"));
    }

    fn trace_shift(&mut self, lexeme: &Lexeme, next: StateId) {
        let token = self.token(lexeme);
        self.lines.push(format!("shift   {token} {}", self.colors.dim(&format!("→ {}", next.0))));
    }

    fn trace_extra(&mut self, lexeme: &Lexeme) {
        let token = self.token(lexeme);
        self.lines.push(format!("extra   {token}"));
    }

    fn trace_reduce(&mut self, production: ProductionId, goto: StateId) {
        let entry = self.language.production(production);
        let lhs = self.colors.symbol(&label(self.language, entry.lhs));
        let rhs: Vec<String> = self
            .language
            .production_rhs(production)
            .map(|s| label(self.language, s))
            .collect();
        let rhs = if rhs.is_empty() { "ε".to_string() } else { rhs.join(" ") };
        self.lines.push(format!(
            "reduce  {lhs} → {rhs} {}",
            self.colors.dim(&format!("→ {}", goto.0))
        ));
    }

    fn trace_accept(&mut self) {
        self.lines.push("accept".to_string());
    }
}
