//! Human-readable description of an unresolved conflict.

use std::collections::BTreeSet;
use std::fmt;

use sprig_table::{ProductionId, SymbolId};

use crate::automaton::Item;
use crate::syntax::SyntaxGrammar;

const SEP: &str = "  ";

/// Rendered conflict: the symbol sequence leading to the decision point,
/// one interpretation per candidate, and the remedies that apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConflictReport {
    pub sequence: String,
    pub interpretations: Vec<String>,
    pub resolutions: Vec<String>,
    /// Implicated rules, in declaration order.
    pub rules: Vec<String>,
}

impl ConflictReport {
    /// `tied` marks a shift/reduce tie that associativity could settle.
    pub fn new(
        grammar: &SyntaxGrammar,
        lookahead: SymbolId,
        shift_items: &[Item],
        reduces: &[ProductionId],
        tied: bool,
    ) -> Self {
        let label = |id: SymbolId| grammar.label(id);
        let lookahead = label(lookahead);

        // The candidate that has consumed the most symbols started earliest;
        // its consumed symbols are the shared left context.
        let consumed = reduces
            .iter()
            .map(|&p| (p, grammar.production(p).rhs.len()))
            .chain(shift_items.iter().map(|item| (item.production, item.position)));
        let mut earliest: Option<(ProductionId, usize)> = None;
        for (production, count) in consumed {
            if earliest.is_none_or(|(_, best)| count > best) {
                earliest = Some((production, count));
            }
        }
        let prefix: Vec<String> = earliest
            .map(|(p, count)| {
                grammar.production(p).rhs[..count]
                    .iter()
                    .map(|&s| label(s))
                    .collect()
            })
            .unwrap_or_default();
        let depth = prefix.len();

        let mut sequence = prefix.clone();
        sequence.extend(["•".to_string(), lookahead.clone(), "…".to_string()]);

        let mut interpretations = Vec::new();
        for &p in reduces {
            let production = grammar.production(p);
            let mut group = vec![label(production.lhs)];
            group.extend(production.rhs.iter().map(|&s| label(s)));

            let mut line = prefix[..depth - production.rhs.len()].to_vec();
            line.push(format!("({})", group.join(SEP)));
            line.extend(["•".to_string(), lookahead.clone(), "…".to_string()]);
            interpretations.push(line.join(SEP));
        }
        for item in shift_items {
            let production = grammar.production(item.production);
            let mut group = vec![label(production.lhs)];
            group.extend(production.rhs[..item.position].iter().map(|&s| label(s)));
            group.push("•".to_string());
            group.extend(production.rhs[item.position..].iter().map(|&s| label(s)));

            let mut line = prefix[..depth - item.position].to_vec();
            line.push(format!("({})", group.join(SEP)));
            interpretations.push(line.join(SEP));
        }

        let rule_of = |lhs: SymbolId| grammar.symbols.rule_of(lhs);
        let reduce_rules: BTreeSet<SymbolId> = reduces
            .iter()
            .map(|&p| rule_of(grammar.production(p).lhs))
            .collect();
        let involved: BTreeSet<SymbolId> = shift_items
            .iter()
            .map(|item| rule_of(grammar.production(item.production).lhs))
            .chain(reduce_rules.iter().copied())
            .collect();
        let names =
            |set: &BTreeSet<SymbolId>| -> Vec<String> { set.iter().map(|&s| label(s)).collect() };
        let rules = names(&involved);

        let mut resolutions = Vec::new();
        if involved.len() > 1 {
            resolutions.push(format!(
                "Use different precedences in the rules:{SEP}{}",
                rules.join(SEP)
            ));
        }
        if tied {
            resolutions.push(format!(
                "Specify left or right associativity in the rules:{SEP}{}",
                names(&reduce_rules).join(SEP)
            ));
        }
        resolutions.push(format!(
            "Add a conflict for the rules:{SEP}{}",
            rules.join(SEP)
        ));

        Self {
            sequence: sequence.join(SEP),
            interpretations,
            resolutions,
            rules,
        }
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let block = |lines: &[String]| {
            lines
                .iter()
                .map(|line| format!("{SEP}{line}"))
                .collect::<Vec<_>>()
                .join("\n\n")
        };
        writeln!(f, "Unresolved conflict for symbol sequence:")?;
        writeln!(f)?;
        writeln!(f, "{SEP}{}", self.sequence)?;
        writeln!(f)?;
        writeln!(f, "Possible interpretations:")?;
        writeln!(f)?;
        writeln!(f, "{}", block(&self.interpretations))?;
        writeln!(f)?;
        writeln!(f, "Possible resolutions:")?;
        writeln!(f)?;
        writeln!(f, "{}", block(&self.resolutions))
    }
}
