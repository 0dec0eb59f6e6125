//! Breadth-first discovery of LR(1) states.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use sprig_table::{StateId, SymbolId};

use crate::Error;
use crate::syntax::SyntaxGrammar;
use crate::trace::Tracer;

use super::{Automaton, FirstSets, Item, ItemSet, State};

/// Build the state graph, starting from `$start → • <first rule>` with
/// end-of-input lookahead.
pub fn build(grammar: &SyntaxGrammar, tracer: &mut impl Tracer) -> Result<Automaton, Error> {
    let first = FirstSets::compute(grammar);
    let mut builder = Builder {
        grammar,
        first: &first,
        states: Vec::new(),
        by_kernel: HashMap::new(),
        queue: VecDeque::new(),
    };

    let mut kernel = ItemSet::new();
    kernel.insert(
        Item::new(SyntaxGrammar::START_PRODUCTION, 0),
        &BTreeSet::from([SymbolId::END]),
    );
    builder.state_for(kernel)?;

    while let Some(id) = builder.queue.pop_front() {
        for (symbol, kernel) in builder.successors(id) {
            let target = builder.state_for(kernel)?;
            builder.states[id.index()].transitions.insert(symbol, target);
        }
        tracer.trace_state(grammar, &builder.states[id.index()]);
    }

    let states = builder.states;
    Ok(Automaton { states, first })
}

/// Id for a new state after `count` existing ones. The state count itself
/// must fit the table header, so the last usable id is `u16::MAX - 1`.
pub(super) fn next_state_id(count: usize) -> Result<StateId, Error> {
    if count >= u16::MAX as usize {
        return Err(Error::TooLarge {
            what: "states",
            count: count + 1,
        });
    }
    Ok(StateId(count as u16))
}

struct Builder<'a> {
    grammar: &'a SyntaxGrammar,
    first: &'a FirstSets,
    states: Vec<State>,
    by_kernel: HashMap<ItemSet, StateId>,
    queue: VecDeque<StateId>,
}

impl Builder<'_> {
    /// Existing state for a kernel, or a new queued one.
    fn state_for(&mut self, kernel: ItemSet) -> Result<StateId, Error> {
        if let Some(&id) = self.by_kernel.get(&kernel) {
            return Ok(id);
        }
        let id = next_state_id(self.states.len())?;
        let items = self.closure(&kernel);
        self.by_kernel.insert(kernel, id);
        self.states.push(State {
            id,
            items,
            transitions: BTreeMap::new(),
        });
        self.queue.push_back(id);
        Ok(id)
    }

    /// Add `B → • γ` for every item `A → α • B β`, with lookahead
    /// FIRST(β a). Items are revisited when their lookahead grows.
    fn closure(&self, kernel: &ItemSet) -> ItemSet {
        let mut set = kernel.clone();
        let mut pending: VecDeque<Item> = set.items().collect();

        while let Some(item) = pending.pop_front() {
            let production = self.grammar.production(item.production);
            let Some(&next) = production.rhs.get(item.position) else {
                continue;
            };
            if self.grammar.symbols.is_terminal(next) {
                continue;
            }
            let Some(follow) = set.lookahead(&item) else {
                continue;
            };
            let lookahead = self
                .first
                .first_of_sequence(&production.rhs[item.position + 1..], follow);
            for &id in self.grammar.productions_of(next) {
                let added = Item::new(id, 0);
                if set.insert(added, &lookahead) {
                    pending.push_back(added);
                }
            }
        }

        set
    }

    /// Kernels reached from a state, grouped by the symbol crossed.
    fn successors(&self, id: StateId) -> BTreeMap<SymbolId, ItemSet> {
        let mut out: BTreeMap<SymbolId, ItemSet> = BTreeMap::new();
        for (item, lookahead) in self.states[id.index()].items.iter() {
            if let Some(symbol) = item.next_symbol(self.grammar) {
                out.entry(symbol)
                    .or_default()
                    .insert(item.advance(), lookahead);
            }
        }
        out
    }
}
