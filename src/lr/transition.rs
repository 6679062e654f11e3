use crate::{Grammar, SymbolId};

use super::{Automaton, State, StateId};

/// An edge of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub from: StateId,
    pub symbol: SymbolId,
    pub to: StateId,
}

impl State {
    /// Outgoing edges of the state, in symbol order.
    pub fn iter_transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.edges.iter().map(|(&symbol, &to)| Transition {
            from: self.id,
            symbol,
            to,
        })
    }

    /// Edges labelled by a terminal.
    pub fn iter_shifts<'a>(
        &'a self,
        grammar: &'a Grammar,
    ) -> impl Iterator<Item = Transition> + 'a {
        self.iter_transitions()
            .filter(move |t| grammar.is_terminal(t.symbol))
    }

    /// Edges labelled by a non-terminal.
    pub fn iter_gotos<'a>(
        &'a self,
        grammar: &'a Grammar,
    ) -> impl Iterator<Item = Transition> + 'a {
        self.iter_transitions()
            .filter(move |t| !grammar.is_terminal(t.symbol))
    }
}

impl Automaton {
    /// Iterate over every edge, by source state then symbol.
    pub fn iter_transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.states().iter().flat_map(State::iter_transitions)
    }

    /// Iterate over every edge labelled by a non-terminal.
    pub fn iter_gotos<'a>(
        &'a self,
        grammar: &'a Grammar,
    ) -> impl Iterator<Item = Transition> + 'a {
        self.states()
            .iter()
            .flat_map(move |state| state.iter_gotos(grammar))
    }
}
