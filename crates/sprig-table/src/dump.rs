//! Human-readable dump of a compiled language.
//!
//! Sections: `[language]` summary, `[symbols]`, `[productions]`, `[states]`.

use std::fmt::Write as _;

use sprig_core::Colors;

use super::action::Action;
use super::format::symbol_label;
use super::ids::{ProductionId, StateId, SymbolId};
use super::language::Language;

pub use super::format::width_for_count;

/// Generate a human-readable dump of a compiled language.
pub fn dump(language: &Language, colors: Colors) -> String {
    let mut out = String::new();
    let labels: Vec<String> = language
        .symbols()
        .map(|(id, _)| label(language, id))
        .collect();

    dump_summary(&mut out, language);
    dump_symbols(&mut out, language, &labels, colors);
    dump_productions(&mut out, language, &labels, colors);
    dump_states(&mut out, language, &labels, colors);

    out
}

/// Display label of a symbol, as used in dumps and traces.
pub fn label(language: &Language, id: SymbolId) -> String {
    let entry = language.symbol(id);
    symbol_label(
        language.string(entry.name),
        entry.visibility,
        entry.token.map(|t| t.kind),
    )
}

fn dump_summary(out: &mut String, language: &Language) {
    out.push_str("[language]\n");
    writeln!(out, "name = {}", language.name()).unwrap();
    writeln!(out, "symbols = {}", language.symbol_count()).unwrap();
    writeln!(out, "productions = {}", language.production_count()).unwrap();
    writeln!(out, "states = {}", language.state_count()).unwrap();
    out.push('\n');
}

fn dump_symbols(out: &mut String, language: &Language, labels: &[String], c: Colors) {
    out.push_str("[symbols]\n");
    let w = width_for_count(language.symbol_count());
    let lw = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    for (id, entry) in language.symbols() {
        let kind = if entry.terminal { "token" } else { "rule" };
        let extra = if entry.extra { " extra" } else { "" };
        writeln!(
            out,
            "{}{:>w$}{}  {}{:<lw$}{}  {kind} {}{extra}",
            c.dim,
            id.0,
            c.reset,
            c.symbol,
            labels[id.index()],
            c.reset,
            entry.visibility.as_str(),
        )
        .unwrap();
    }
    out.push('\n');
}

fn dump_productions(out: &mut String, language: &Language, labels: &[String], c: Colors) {
    out.push_str("[productions]\n");
    let w = width_for_count(language.production_count());

    for i in 0..language.production_count() {
        let id = ProductionId(i as u16);
        let lhs = &labels[language.production(id).lhs.index()];
        let rhs: Vec<&str> = language
            .production_rhs(id)
            .map(|s| labels[s.index()].as_str())
            .collect();
        let rhs = if rhs.is_empty() {
            "ε".to_string()
        } else {
            rhs.join(" ")
        };
        writeln!(out, "{}{i:>w$}{}  {lhs} → {rhs}", c.dim, c.reset).unwrap();
    }
    out.push('\n');
}

fn dump_states(out: &mut String, language: &Language, labels: &[String], c: Colors) {
    out.push_str("[states]\n");

    for i in 0..language.state_count() {
        let state = StateId(i as u16);
        writeln!(out, "state {i}").unwrap();
        for entry in language.actions(state) {
            let action = match entry.action {
                Action::Shift(s) => format!("shift {}", s.0),
                Action::ShiftExtra => "extra".to_string(),
                Action::Reduce(p) => format!("reduce {}", p.0),
                Action::Accept => "accept".to_string(),
            };
            let la = &labels[entry.lookahead.index()];
            writeln!(out, "  {}  {}{action}{}", c.symbol(la), c.dim, c.reset).unwrap();
        }
        for entry in language.gotos(state) {
            let sym = &labels[entry.symbol.index()];
            writeln!(out, "  {}  {}goto {}{}", c.symbol(sym), c.dim, entry.state.0, c.reset)
                .unwrap();
        }
    }
}
