//! Table-driven LR parse loop.
//!
//! The stack holds one entry per shifted token or reduced rule. Extras are
//! shifted in place and never count toward a production's length; a reduce
//! keeps interleaved extras as children and carries trailing ones over to
//! the goto state.

use sprig_table::dump::label;
use sprig_table::{Action, Language, ProductionId, StateId};

use super::error::RuntimeError;
use super::lexer::{Lexeme, Lexer};
use super::trace::{NoopTracer, Tracer};
use super::tree::{NodeId, SyntaxNode, Tree};

/// Resource limits for a single parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseLimits {
    /// Maximum driver steps (default: 1,000,000).
    pub exec_fuel: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            exec_fuel: 1_000_000,
        }
    }
}

impl ParseLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exec_fuel(mut self, fuel: u32) -> Self {
        self.exec_fuel = fuel;
        self
    }

    pub fn get_exec_fuel(&self) -> u32 {
        self.exec_fuel
    }
}

/// Parser for one compiled language.
pub struct Parser<'l> {
    language: &'l Language,
    lexer: Lexer,
    limits: ParseLimits,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    state: StateId,
    /// `None` only for the bottom entry.
    node: Option<NodeId>,
    extra: bool,
}

impl<'l> Parser<'l> {
    pub fn new(language: &'l Language) -> Result<Self, RuntimeError> {
        Ok(Self {
            language,
            lexer: Lexer::new(language)?,
            limits: ParseLimits::default(),
        })
    }

    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> ParseLimits {
        self.limits
    }

    pub fn language(&self) -> &'l Language {
        self.language
    }

    /// Parse `source` into a tree.
    pub fn parse(&self, source: &str) -> Result<Tree<'l>, RuntimeError> {
        self.parse_traced(source, &mut NoopTracer)
    }

    /// Parse with a tracer observing every driver step.
    pub fn parse_traced<T: Tracer>(
        &self,
        source: &str,
        tracer: &mut T,
    ) -> Result<Tree<'l>, RuntimeError> {
        let mut run = Run {
            language: self.language,
            nodes: Vec::new(),
            stack: vec![Entry {
                state: StateId::START,
                node: None,
                extra: false,
            }],
        };
        let mut fuel = self.limits.exec_fuel;
        let mut lexeme = self.next_lexeme(source, 0, StateId::START, tracer)?;

        loop {
            if fuel == 0 {
                return Err(RuntimeError::ExecFuelExhausted);
            }
            fuel -= 1;

            let state = run.top_state();
            let Some(action) = self.language.action(state, lexeme.symbol) else {
                return Err(RuntimeError::UnexpectedToken {
                    position: lexeme.start,
                    token: label(self.language, lexeme.symbol),
                });
            };

            match action {
                Action::Shift(next) => {
                    run.push_leaf(&lexeme, next, false);
                    tracer.trace_shift(&lexeme, next);
                    lexeme = self.next_lexeme(source, lexeme.end, next, tracer)?;
                }
                Action::ShiftExtra => {
                    run.push_leaf(&lexeme, state, true);
                    tracer.trace_extra(&lexeme);
                    lexeme = self.next_lexeme(source, lexeme.end, state, tracer)?;
                }
                Action::Reduce(production) => {
                    let goto = run.reduce(production)?;
                    tracer.trace_reduce(production, goto);
                }
                Action::Accept => {
                    tracer.trace_accept();
                    let root = run.accept()?;
                    return Ok(Tree::new(
                        self.language,
                        source.to_string(),
                        run.nodes,
                        root,
                    ));
                }
            }
        }
    }

    fn next_lexeme<T: Tracer>(
        &self,
        source: &str,
        position: usize,
        state: StateId,
        tracer: &mut T,
    ) -> Result<Lexeme, RuntimeError> {
        let candidates = self.language.actions(state).map(|entry| entry.lookahead);
        let lexeme = self.lexer.lex(source, position, candidates)?;
        tracer.trace_lex(&lexeme);
        Ok(lexeme)
    }
}

/// Mutable state of one parse.
struct Run<'l> {
    language: &'l Language,
    nodes: Vec<SyntaxNode>,
    stack: Vec<Entry>,
}

impl Run<'_> {
    fn top_state(&self) -> StateId {
        self.stack.last().map_or(StateId::START, |entry| entry.state)
    }

    fn alloc(&mut self, node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn push_leaf(&mut self, lexeme: &Lexeme, state: StateId, extra: bool) {
        let node = self.alloc(SyntaxNode {
            symbol: lexeme.symbol,
            start: lexeme.start,
            end: lexeme.end,
            children: Vec::new(),
            extra,
        });
        self.stack.push(Entry {
            state,
            node: Some(node),
            extra,
        });
    }

    /// Extras on top of the stack, in stack order.
    fn pop_trailing_extras(&mut self) -> Vec<Entry> {
        let mut trailing = Vec::new();
        while self.stack.last().is_some_and(|entry| entry.extra) {
            trailing.extend(self.stack.pop());
        }
        trailing.reverse();
        trailing
    }

    fn reduce(&mut self, production: ProductionId) -> Result<StateId, RuntimeError> {
        let entry = self.language.production(production);
        let trailing = self.pop_trailing_extras();

        let mut children = Vec::new();
        let mut remaining = entry.rhs_len;
        while remaining > 0 {
            // The bottom entry has no node and is never popped.
            if self.stack.len() <= 1 {
                return Err(RuntimeError::StackUnderflow { production });
            }
            let Some(popped) = self.stack.pop() else {
                return Err(RuntimeError::StackUnderflow { production });
            };
            children.extend(popped.node);
            if !popped.extra {
                remaining -= 1;
            }
        }
        children.reverse();

        let (start, end) = match (children.first(), children.last()) {
            (Some(&first), Some(&last)) => {
                (self.nodes[first.index()].start, self.nodes[last.index()].end)
            }
            _ => {
                // Empty rules sit right after whatever precedes them.
                let at = self
                    .stack
                    .last()
                    .and_then(|entry| entry.node)
                    .map_or(0, |node| self.nodes[node.index()].end);
                (at, at)
            }
        };

        let state = self.top_state();
        let goto = self
            .language
            .goto(state, entry.lhs)
            .ok_or(RuntimeError::MissingGoto {
                state,
                symbol: entry.lhs,
            })?;

        let node = self.alloc(SyntaxNode {
            symbol: entry.lhs,
            start,
            end,
            children,
            extra: false,
        });
        self.stack.push(Entry {
            state: goto,
            node: Some(node),
            extra: false,
        });
        for extra in trailing {
            self.stack.push(Entry {
                state: goto,
                ..extra
            });
        }
        Ok(goto)
    }

    /// Finish the parse, folding leftover extras into the root.
    fn accept(&mut self) -> Result<NodeId, RuntimeError> {
        let entries: Vec<Entry> = self.stack.drain(1..).collect();
        let Some(root) = entries
            .iter()
            .rev()
            .find(|entry| !entry.extra)
            .and_then(|entry| entry.node)
        else {
            return Err(RuntimeError::StackUnderflow {
                production: ProductionId(0),
            });
        };

        let mut leading = Vec::new();
        let mut trailing = Vec::new();
        let mut seen_root = false;
        for entry in &entries {
            match entry.node {
                Some(node) if node == root => seen_root = true,
                Some(node) if seen_root => trailing.push(node),
                Some(node) => leading.push(node),
                None => {}
            }
        }
        if leading.is_empty() && trailing.is_empty() {
            return Ok(root);
        }

        let start = leading
            .first()
            .map_or(self.nodes[root.index()].start, |n| {
                self.nodes[n.index()].start
            });
        let end = trailing
            .last()
            .map_or(self.nodes[root.index()].end, |n| self.nodes[n.index()].end);
        let node = &mut self.nodes[root.index()];
        let mut children = leading;
        children.append(&mut node.children);
        children.extend(trailing);
        node.children = children;
        node.start = start;
        node.end = end;
        Ok(root)
    }
}
