//! Tracing hooks for automaton construction and conflict resolution.
//!
//! [`NoopTracer`] compiles away entirely; [`PrintTracer`] collects
//! formatted lines for debugging a grammar.

use sprig_core::Colors;
use sprig_table::{Action, SymbolId};

use crate::automaton::State;
use crate::conflict::{Conflict, Reason, Verdict};
use crate::syntax::SyntaxGrammar;

pub trait Tracer {
    /// Called once a state's transitions are known.
    fn trace_state(&mut self, grammar: &SyntaxGrammar, state: &State);

    /// Called after the resolver has ruled on a conflict.
    fn trace_conflict(
        &mut self,
        grammar: &SyntaxGrammar,
        conflict: &Conflict,
        verdict: &Verdict,
    );
}

/// No-op tracer that gets optimized away completely.
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_state(&mut self, _grammar: &SyntaxGrammar, _state: &State) {}

    #[inline(always)]
    fn trace_conflict(
        &mut self,
        _grammar: &SyntaxGrammar,
        _conflict: &Conflict,
        _verdict: &Verdict,
    ) {
    }
}

/// Tracer that collects a readable log.
#[derive(Default)]
pub struct PrintTracer {
    lines: Vec<String>,
    colors: Colors,
}

impl PrintTracer {
    pub fn new(colors: Colors) -> Self {
        Self {
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

    fn symbol(&self, grammar: &SyntaxGrammar, id: SymbolId) -> String {
        self.colors.symbol(&grammar.label(id))
    }

    fn action(&self, action: Action) -> String {
        match action {
            Action::Shift(state) => format!("shift {}", state.0),
            Action::ShiftExtra => "extra".to_string(),
            Action::Reduce(production) => format!("reduce {}", production.0),
            Action::Accept => "accept".to_string(),
        }
    }
}

impl Tracer for PrintTracer {
    fn trace_state(&mut self, grammar: &SyntaxGrammar, state: &State) {
        self.lines.push(format!("state {}", state.id.0));
        for (item, lookahead) in state.items.iter() {
            let lookahead: Vec<String> = lookahead.iter().map(|&s| grammar.label(s)).collect();
            let lookahead = self.colors.dim(&format!("[{}]", lookahead.join(" ")));
            self.lines
                .push(format!("  {}  {lookahead}", item.display(grammar)));
        }
        for (&symbol, target) in &state.transitions {
            let symbol = self.symbol(grammar, symbol);
            let arrow = self.colors.dim("→");
            self.lines.push(format!("  {symbol} {arrow} {}", target.0));
        }
    }

    fn trace_conflict(
        &mut self,
        grammar: &SyntaxGrammar,
        conflict: &Conflict,
        verdict: &Verdict,
    ) {
        let lookahead = self.symbol(grammar, conflict.lookahead);
        let outcome = match verdict {
            Verdict::Resolved(action, reason) => {
                let reason = match reason {
                    Reason::Precedence => "precedence",
                    Reason::Associativity => "associativity",
                    Reason::Declared => "declared conflict",
                };
                format!("{} by {reason}", self.action(*action))
            }
            Verdict::Unresolved(report) => format!("unresolved: {}", report.rules.join(" ")),
        };
        self.lines.push(format!(
            "conflict in state {} on {lookahead}: {outcome}",
            conflict.state.0
        ));
    }
}
