use crate::{RuleId, SymbolId};

use super::{Action, ErrorId, StateId, Tables};

/// Outcome of a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Accept,
    Error(Option<ErrorId>),
    /// The terminal was consumed, the new state was pushed.
    Shift(StateId),
    /// The non-terminal was consumed, the new state was pushed.
    Goto(StateId),
    /// `rule` was reduced and `goto` pushed; the symbol is still pending.
    Reduce { rule: RuleId, goto: StateId },
}

impl Tables<'_> {
    /// Performs one transition of the LR automaton.
    ///
    /// `stack` holds the states visited so far, its top is the current state
    /// (an empty stack stands for the initial state). On `Shift`, `Goto` and
    /// `Reduce` the stack is updated; on `Accept` and `Error` it is left as is.
    pub fn step(&self, stack: &mut Vec<StateId>, symbol: SymbolId) -> Step {
        let grammar = self.grammar();
        let state = stack.last().copied().unwrap_or_default();

        if !grammar.is_terminal(symbol) {
            return match self.goto(state, symbol) {
                Some(to) => {
                    stack.push(to);
                    Step::Goto(to)
                }
                None => Step::Error(None),
            };
        }

        match self.action(state, symbol) {
            Action::Accept => Step::Accept,
            Action::Error(name) => Step::Error(name),
            Action::Shift(to) => {
                stack.push(to);
                Step::Shift(to)
            }
            Action::Reduce(rule) => {
                let reduced = grammar.rule(rule);
                let base = stack.len().saturating_sub(reduced.len());
                let from = base.checked_sub(1).map(|top| stack[top]).unwrap_or_default();

                match self.goto(from, reduced.lhs) {
                    Some(to) => {
                        stack.truncate(base);
                        stack.push(to);
                        Step::Reduce { rule, goto: to }
                    }
                    None => Step::Error(None),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Step;
    use crate::fixtures::fixture_expr_grammar;
    use crate::lr::{Action, Tables};
    use crate::Config;

    #[test]
    fn test_001_shift_reduce_accept() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());
        let id = grammar.symbol_id("id").unwrap();
        let eos = grammar.eos();

        let mut stack = vec![0];

        let Step::Shift(after_id) = tables.step(&mut stack, id) else {
            panic!("expected a shift");
        };
        assert_eq!(stack, vec![0, after_id]);

        // E -> id, then S -> E, on $end.
        assert!(matches!(tables.step(&mut stack, eos), Step::Reduce { rule: 4, .. }));
        assert!(matches!(tables.step(&mut stack, eos), Step::Reduce { rule: 1, .. }));
        assert_eq!(tables.step(&mut stack, eos), Step::Accept);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn test_002_error_leaves_stack() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());
        let plus = grammar.symbol_id("'+'").unwrap();

        let mut stack = vec![0];
        assert_eq!(tables.step(&mut stack, plus), Step::Error(None));
        assert_eq!(stack, vec![0]);
    }

    #[test]
    fn test_003_goto_on_non_terminal() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());
        let e = grammar.symbol_id("E").unwrap();

        let mut stack = Vec::new();
        let Step::Goto(to) = tables.step(&mut stack, e) else {
            panic!("expected a goto");
        };
        assert_eq!(stack, vec![to]);
        assert_eq!(tables.goto(0, e), Some(to));
    }

    #[test]
    fn test_004_missing_goto_leaves_stack() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());
        let id = grammar.symbol_id("id").unwrap();
        let s = grammar.symbol_id("S").unwrap();

        // E -> id reduces on $end, but the accepting state has no goto on E.
        let accepting = tables.goto(0, s).unwrap();
        let after_id = tables.automaton().goto(0, id).unwrap();

        let mut stack = vec![0, accepting, after_id];
        assert_eq!(tables.step(&mut stack, grammar.eos()), Step::Error(None));
        assert_eq!(stack, vec![0, accepting, after_id]);
    }

    #[test]
    fn test_005_non_terminal_cells_are_not_actions() {
        let grammar = fixture_expr_grammar();
        let mut tables = Tables::build(&grammar, Config::default());
        let e = grammar.symbol_id("E").unwrap();

        assert_eq!(tables.action(0, e), Action::Error(None));
        assert!(!tables.error_at(0, e));
        assert_eq!(tables.error_set(0, e, "never"), None);
        assert!(tables.error_names().is_empty());
    }
}
