use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::{Grammar, Item, ItemSet, RuleId, SymbolId};

use super::StateId;

/// A node of the LR(0) automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub id: StateId,
    pub items: ItemSet,
    /// Symbol on the incoming edges, `None` for the initial state.
    pub accessing: Option<SymbolId>,
    /// Outgoing edges, shifts and gotos alike.
    pub edges: BTreeMap<SymbolId, StateId>,
}

impl State {
    fn new(id: StateId, items: ItemSet, accessing: Option<SymbolId>) -> Self {
        Self {
            id,
            items,
            accessing,
            edges: BTreeMap::default(),
        }
    }

    /// Target of the edge labelled `symbol`, if any.
    pub fn goto(&self, symbol: SymbolId) -> Option<StateId> {
        self.edges.get(&symbol).copied()
    }

    /// Rules reducible in this state (A -> w •), in ascending order.
    pub fn reductions<'a>(
        &'a self,
        grammar: &'a Grammar,
    ) -> impl Iterator<Item = RuleId> + 'a {
        self.items
            .iter_exhausted_items(grammar)
            .map(|item| item.rule)
    }

    /// Returns true if the state holds `$accept -> S • $end`.
    pub fn accepts(&self) -> bool {
        self.items.kernel().contains(&Item::new(0, 1))
    }
}

/// The canonical collection of LR(0) item sets.
///
/// States are numbered in breadth-first discovery order, so building the
/// automaton twice from the same grammar yields the same numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<State>,
}

impl Automaton {
    pub fn build(grammar: &Grammar) -> Self {
        let mut initial = ItemSet::start();
        initial.close(grammar);

        let mut states = vec![State::new(0, initial, None)];
        let mut ids =
            HashMap::<Vec<Item>, StateId>::from_iter([(states[0].items.kernel().to_vec(), 0)]);
        let mut queue = VecDeque::from_iter([0]);

        while let Some(from) = queue.pop_front() {
            for symbol in states[from].items.next_symbols(grammar) {
                // $end is never shifted, the state gets an accept action instead.
                if symbol == grammar.eos() {
                    continue;
                }

                let Some(set) = states[from].items.goto(symbol, grammar) else {
                    continue;
                };

                let to = match ids.get(set.kernel()) {
                    Some(&to) => to,
                    None => {
                        let to = states.len();
                        ids.insert(set.kernel().to_vec(), to);
                        states.push(State::new(to, set, Some(symbol)));
                        queue.push_back(to);
                        log::trace!(
                            "state {}: new state {} on {}",
                            from,
                            to,
                            grammar.name(symbol)
                        );
                        to
                    }
                };

                states[from].edges.insert(symbol, to);
            }
        }

        log::debug!("LR(0) automaton: {} states", states.len());

        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn state(&self, id: StateId) -> &State {
        &self.states[id]
    }

    /// Follows the edge labelled `symbol` out of `from`.
    pub fn goto(&self, from: StateId, symbol: SymbolId) -> Option<StateId> {
        self.states.get(from).and_then(|state| state.goto(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::Automaton;
    use crate::fixtures::{fixture_expr_grammar, fixture_nullable_grammar};
    use crate::Item;

    #[test]
    fn test_001_initial_state() {
        let grammar = fixture_expr_grammar();
        let automaton = Automaton::build(&grammar);

        let initial = automaton.state(0);
        assert_eq!(initial.items.kernel(), &[Item::new(0, 0)]);
        assert_eq!(initial.accessing, None);
        assert!(initial.goto(grammar.symbol_id("S").unwrap()).is_some());
        assert!(initial.goto(grammar.symbol_id("'+'").unwrap()).is_none());
    }

    #[test]
    fn test_002_expr_automaton() {
        let grammar = fixture_expr_grammar();
        let automaton = Automaton::build(&grammar);

        // 0: start, S, E, id, E +, E *, E + E, E * E
        assert_eq!(automaton.len(), 8);

        let accepting = automaton
            .states()
            .iter()
            .filter(|state| state.accepts())
            .map(|state| state.id)
            .collect::<Vec<_>>();

        assert_eq!(accepting, vec![automaton.goto(0, grammar.start()).unwrap()]);
    }

    #[test]
    fn test_003_states_are_unique() {
        let grammar = fixture_nullable_grammar();
        let automaton = Automaton::build(&grammar);

        for (i, a) in automaton.states().iter().enumerate() {
            assert_eq!(a.id, i);
            for b in automaton.states()[i + 1..].iter() {
                assert_ne!(a.items.kernel(), b.items.kernel());
            }
        }
    }

    #[test]
    fn test_004_deterministic() {
        let grammar = fixture_expr_grammar();
        assert_eq!(Automaton::build(&grammar), Automaton::build(&grammar));
    }

    #[test]
    fn test_005_empty_rule_reduction() {
        let grammar = fixture_nullable_grammar();
        let automaton = Automaton::build(&grammar);

        // S -> • A B c : A -> • is reducible in the initial state.
        let a = grammar.symbol_id("A").unwrap();
        let empty_a = grammar
            .rules_of(a)
            .iter()
            .copied()
            .find(|&rule| grammar.rule(rule).is_empty())
            .unwrap();

        assert!(automaton.state(0).reductions(&grammar).any(|rule| rule == empty_a));
    }
}
