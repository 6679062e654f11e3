use crate::{Config, Grammar, MachineType, RuleId, SymbolId};

use super::{
    conflict::resolve, Action, Automaton, Conflict, ErrorId, GotoColumn, Lookaheads, RowInfo,
    State, StateId,
};

/// Two different error names registered on the same table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNameConflict {
    pub state: StateId,
    pub terminal: SymbolId,
    pub kept: String,
    pub rejected: String,
}

/// LR parse tables.
///
/// Action rows are indexed by terminal slot (see [`Grammar::slot`]), goto rows
/// by non-terminal symbol. Conflicts, unused rules and error names are
/// collected along the way and never abort the construction.
#[derive(Debug, Clone)]
pub struct Tables<'g> {
    grammar: &'g Grammar,
    config: Config,
    automaton: Automaton,
    lookaheads: Lookaheads,
    actions: Vec<Vec<Action>>,
    gotos: Vec<Vec<Option<StateId>>>,
    rows: Vec<RowInfo>,
    conflicts: Vec<Conflict>,
    unused: Vec<bool>,
    error_names: Vec<String>,
    error_conflicts: Vec<ErrorNameConflict>,
}

impl<'g> Tables<'g> {
    /// Builds the automaton, the lookahead machine selected by `config`,
    /// then the action and goto tables.
    pub fn build(grammar: &'g Grammar, config: Config) -> Self {
        let automaton = Automaton::build(grammar);
        let lookaheads = Lookaheads::build(config.machine, grammar, &automaton);

        let mut conflicts = Vec::default();
        let mut actions = Vec::with_capacity(automaton.len());
        let mut gotos = Vec::with_capacity(automaton.len());

        for state in automaton.states() {
            actions.push(action_row(grammar, state, &lookaheads, &mut conflicts));
            gotos.push(goto_row(grammar, state));
        }

        let mut used = vec![false; grammar.nb_rules()];
        used[0] = true;
        for action in actions.iter().flatten() {
            if let Action::Reduce(rule) = *action {
                used[rule] = true;
            }
        }

        let rows = actions.iter().map(|row| RowInfo::new(row)).collect();

        let tables = Self {
            grammar,
            config,
            automaton,
            lookaheads,
            actions,
            gotos,
            rows,
            conflicts,
            unused: used.into_iter().map(|used| !used).collect(),
            error_names: Vec::default(),
            error_conflicts: Vec::default(),
        };

        log::debug!("{} tables: {}", tables.machine(), tables.summary());

        tables
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn machine(&self) -> MachineType {
        self.config.machine
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    pub fn lookaheads(&self) -> &Lookaheads {
        &self.lookaheads
    }

    pub fn nb_states(&self) -> usize {
        self.actions.len()
    }

    pub fn nb_terminals(&self) -> usize {
        self.grammar.nb_terminals()
    }

    pub fn nb_non_terminals(&self) -> usize {
        self.grammar.nb_non_terminals()
    }

    /// Action row of a state, indexed by terminal slot.
    pub fn actions(&self, state: StateId) -> &[Action] {
        &self.actions[state]
    }

    /// Action of a cell. Non-terminals have no action cell and read as an error.
    pub fn action(&self, state: StateId, terminal: SymbolId) -> Action {
        if !self.grammar.is_terminal(terminal) {
            return Action::Error(None);
        }
        self.actions[state][self.grammar.slot(terminal)]
    }

    /// Argument column of an action row (target state, rule or error name).
    pub fn arguments(&self, state: StateId) -> Vec<Option<usize>> {
        self.actions[state].iter().map(Action::argument).collect()
    }

    /// Goto row of a state, indexed by non-terminal.
    pub fn gotos(&self, state: StateId) -> &[Option<StateId>] {
        &self.gotos[state]
    }

    pub fn goto(&self, state: StateId, non_terminal: SymbolId) -> Option<StateId> {
        self.gotos
            .get(state)
            .and_then(|row| row.get(non_terminal))
            .copied()
            .flatten()
    }

    /// Goto targets of a non-terminal, compacted around the most frequent one.
    pub fn goto_column(&self, non_terminal: SymbolId) -> GotoColumn {
        GotoColumn::new(&self.gotos, non_terminal)
    }

    /// Default action and sort index of a state's action row.
    pub fn row(&self, state: StateId) -> &RowInfo {
        &self.rows[state]
    }

    /// Terminals having an action other than an error in the state.
    pub fn expected(&self, state: StateId) -> impl Iterator<Item = SymbolId> + '_ {
        self.actions[state]
            .iter()
            .enumerate()
            .filter(|(_, action)| !action.is_error())
            .map(|(slot, _)| self.grammar.terminal_at(slot))
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    pub fn conflicts_of(&self, state: StateId) -> impl Iterator<Item = &Conflict> {
        self.conflicts
            .iter()
            .filter(move |conflict| conflict.state == state)
    }

    pub fn nb_shift_reduce(&self) -> usize {
        self.conflicts.iter().filter(|c| c.is_shift_reduce()).count()
    }

    pub fn nb_reduce_reduce(&self) -> usize {
        self.conflicts.iter().filter(|c| c.is_reduce_reduce()).count()
    }

    /// Returns true if the rule is never reduced by any state.
    pub fn is_unused(&self, rule: RuleId) -> bool {
        self.unused[rule]
    }

    pub fn unused_rules(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.unused
            .iter()
            .enumerate()
            .filter(|(_, &unused)| unused)
            .map(|(rule, _)| rule)
    }

    pub fn nb_unused_rules(&self) -> usize {
        self.unused.iter().filter(|&&unused| unused).count()
    }

    pub fn error_names(&self) -> &[String] {
        &self.error_names
    }

    pub fn error_name(&self, id: ErrorId) -> Option<&str> {
        self.error_names.get(id).map(String::as_str)
    }

    pub fn error_conflicts(&self) -> &[ErrorNameConflict] {
        &self.error_conflicts
    }

    /// Returns true if the terminal cell holds no action.
    pub fn error_at(&self, state: StateId, terminal: SymbolId) -> bool {
        self.grammar.is_terminal(terminal) && self.action(state, terminal).is_error()
    }

    /// Registers a named error on an empty cell.
    ///
    /// Returns the name previously registered on the cell if it differs from
    /// `name`; the first registration is kept. Cells holding an action are
    /// left untouched, and so are non-terminals.
    pub fn error_set(&mut self, state: StateId, terminal: SymbolId, name: &str) -> Option<String> {
        if !self.grammar.is_terminal(terminal) {
            return None;
        }

        let slot = self.grammar.slot(terminal);

        match self.actions[state][slot] {
            Action::Error(None) => {
                let id = self.intern_error_name(name);
                self.actions[state][slot] = Action::Error(Some(id));
                self.rows[state] = RowInfo::new(&self.actions[state]);
                None
            }
            Action::Error(Some(id)) if self.error_names[id] != name => {
                let kept = self.error_names[id].clone();
                log::warn!(
                    "state {}: error {} on {} already registered as {}",
                    state,
                    name,
                    self.grammar.name(terminal),
                    kept
                );
                self.error_conflicts.push(ErrorNameConflict {
                    state,
                    terminal,
                    kept: kept.clone(),
                    rejected: name.to_owned(),
                });
                Some(kept)
            }
            _ => None,
        }
    }

    fn intern_error_name(&mut self, name: &str) -> ErrorId {
        match self.error_names.iter().position(|known| known == name) {
            Some(id) => id,
            None => {
                self.error_names.push(name.to_owned());
                self.error_names.len() - 1
            }
        }
    }
}

fn action_row(
    grammar: &Grammar,
    state: &State,
    lookaheads: &Lookaheads,
    conflicts: &mut Vec<Conflict>,
) -> Vec<Action> {
    let mut row = vec![Action::default(); grammar.nb_terminals()];

    for shift in state.iter_shifts(grammar) {
        row[grammar.slot(shift.symbol)] = Action::Shift(shift.to);
    }

    if state.accepts() {
        row[grammar.slot(grammar.eos())] = Action::Accept;
    }

    for (rule, lookahead) in lookaheads.iter(state.id) {
        let rule = grammar.rule(rule);

        for terminal in lookahead.iter() {
            let slot = grammar.slot(terminal);
            let (action, conflict) = resolve(row[slot], rule, grammar.symbol(terminal));

            log::trace!(
                "state {}: {} on {} -> {:?}",
                state.id,
                rule.display(grammar),
                grammar.name(terminal),
                action
            );

            row[slot] = action;

            if let Some(kind) = conflict {
                let conflict = Conflict {
                    state: state.id,
                    terminal,
                    kind,
                };
                log::warn!("{}", conflict.display(grammar));
                conflicts.push(conflict);
            }
        }
    }

    row
}

fn goto_row(grammar: &Grammar, state: &State) -> Vec<Option<StateId>> {
    let mut row = vec![None; grammar.nb_non_terminals()];

    for goto in state.iter_gotos(grammar) {
        row[goto.symbol] = Some(goto.to);
    }

    row
}
