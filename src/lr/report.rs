//! Human readable renderings of the tables.
use std::fmt::Write;

use prettytable::{Cell, Row, Table as PtTable};

use crate::{Grammar, Item, RuleId};

use super::{Action, StateId, Tables};

/// Construction statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub states: usize,
    pub shift_reduce: usize,
    pub reduce_reduce: usize,
    pub unused_rules: usize,
    pub error_names: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} states, {} shift/reduce, {} reduce/reduce, {} unused rule{}",
            self.states,
            self.shift_reduce,
            self.reduce_reduce,
            self.unused_rules,
            if self.unused_rules == 1 { "" } else { "s" }
        )?;

        if self.error_names > 0 {
            write!(f, ", {} error names", self.error_names)?;
        }

        Ok(())
    }
}

fn describe(grammar: &Grammar, tables: &Tables, action: Action) -> String {
    match action {
        Action::Error(None) => "error".to_owned(),
        Action::Error(Some(id)) => {
            format!("error ({})", tables.error_name(id).unwrap_or_default())
        }
        Action::Shift(to) => format!("shift, and go to state {}", to),
        Action::Reduce(rule) => format!(
            "reduce using rule {} ({})",
            rule,
            grammar.rule(rule).display(grammar)
        ),
        Action::Accept => "accept".to_owned(),
    }
}

fn write_item(out: &mut String, grammar: &Grammar, item: &Item) {
    let _ = writeln!(out, "    {:>4}  {}", item.rule, item.display(grammar));
}

impl Tables<'_> {
    pub fn summary(&self) -> Summary {
        Summary {
            states: self.nb_states(),
            shift_reduce: self.nb_shift_reduce(),
            reduce_reduce: self.nb_reduce_reduce(),
            unused_rules: self.nb_unused_rules(),
            error_names: self.error_names().len(),
        }
    }

    /// Dumps one state: kernel then closure items, explicit actions, the
    /// default action, gotos and the conflicts found in the state.
    pub fn state_report(&self, state: StateId) -> String {
        let grammar = self.grammar();
        let node = self.automaton().state(state);
        let items = &node.items;
        let row = self.actions(state);
        let info = self.row(state);
        let mut out = String::new();

        match node.accessing {
            Some(symbol) => {
                let _ = writeln!(out, "state {} (on {})\n", state, grammar.name(symbol));
            }
            None => {
                let _ = writeln!(out, "state {}\n", state);
            }
        }

        for item in items.kernel() {
            write_item(&mut out, grammar, item);
        }
        if !items.closure_items().is_empty() {
            out.push('\n');
            for item in items.closure_items() {
                write_item(&mut out, grammar, item);
            }
        }
        out.push('\n');

        for slot in info.explicit_slots(row) {
            if row[slot] == Action::Error(None) {
                continue;
            }
            let _ = writeln!(
                out,
                "    {:<12} {}",
                grammar.name(grammar.terminal_at(slot)),
                describe(grammar, self, row[slot])
            );
        }

        let _ = writeln!(
            out,
            "    {:<12} {}",
            "$default",
            describe(grammar, self, info.default().unwrap_or_default())
        );

        let gotos = self
            .gotos(state)
            .iter()
            .enumerate()
            .filter_map(|(nt, to)| to.map(|to| (nt, to)))
            .collect::<Vec<_>>();

        if !gotos.is_empty() {
            out.push('\n');
            for (nt, to) in gotos {
                let _ = writeln!(out, "    {:<12} go to state {}", grammar.name(nt), to);
            }
        }

        let conflicts = self.conflicts_of(state).collect::<Vec<_>>();
        if !conflicts.is_empty() {
            out.push('\n');
            for conflict in conflicts {
                let _ = writeln!(out, "    {}", conflict.display(grammar));
            }
        }

        out
    }

    /// Full text dump: grammar, optional derived sets, every state, then the
    /// unused rules and the summary line.
    pub fn report(&self) -> String {
        let grammar = self.grammar();
        let mut out = String::new();

        let _ = writeln!(out, "Grammar\n\n{}", grammar);

        if self.config().report_sets {
            self.write_sets(&mut out);
        }

        for state in 0..self.nb_states() {
            out.push_str(&self.state_report(state));
            out.push('\n');
        }

        let unused = self.unused_rules().collect::<Vec<RuleId>>();
        if !unused.is_empty() {
            let _ = writeln!(out, "Rules never reduced\n");
            for rule in unused {
                let _ = writeln!(out, "{:>4}  {}", rule, grammar.rule(rule).display(grammar));
            }
            out.push('\n');
        }

        for conflict in self.error_conflicts() {
            let _ = writeln!(
                out,
                "state {}: error {} on {} conflicts with {}",
                conflict.state,
                conflict.rejected,
                grammar.name(conflict.terminal),
                conflict.kept
            );
        }

        let _ = writeln!(out, "{}: {}", self.machine(), self.summary());

        out
    }

    fn write_sets(&self, out: &mut String) {
        let grammar = self.grammar();

        let nullable = grammar
            .non_terminals()
            .filter(|&nt| grammar.is_nullable(nt))
            .map(|nt| grammar.name(nt))
            .collect::<Vec<_>>();
        let _ = writeln!(out, "Nullable: {}\n", nullable.join(" "));

        for nt in grammar.non_terminals() {
            let _ = writeln!(
                out,
                "First({}): {}",
                grammar.name(nt),
                grammar.names(grammar.first(nt))
            );
        }
        out.push('\n');

        for nt in grammar.non_terminals() {
            let _ = writeln!(
                out,
                "Follow({}): {}",
                grammar.name(nt),
                grammar.names(grammar.follow(nt))
            );
        }
        out.push('\n');
    }

    /// The whole action and goto matrix, one row per state.
    pub fn matrix(&self) -> PtTable {
        let grammar = self.grammar();
        let mut table = PtTable::new();

        table.add_row(Row::new(
            ["#"]
                .into_iter()
                .chain(grammar.terminals().map(|sym| grammar.name(sym)))
                .chain(grammar.non_terminals().map(|sym| grammar.name(sym)))
                .map(Cell::new)
                .collect(),
        ));

        for state in 0..self.nb_states() {
            table.add_row(Row::new(
                [state.to_string()]
                    .into_iter()
                    .chain(self.actions(state).iter().map(ToString::to_string))
                    .chain(
                        self.gotos(state)
                            .iter()
                            .map(|to| to.map(|to| to.to_string()).unwrap_or_default()),
                    )
                    .map(|text| Cell::new(&text))
                    .collect(),
            ));
        }

        table
    }
}

impl std::fmt::Display for Tables<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::Summary;
    use crate::fixtures::{fixture_expr_grammar, fixture_nullable_grammar};
    use crate::lr::Tables;
    use crate::Config;

    #[test]
    fn test_001_summary_line() {
        let summary = Summary {
            states: 12,
            shift_reduce: 0,
            reduce_reduce: 1,
            unused_rules: 1,
            error_names: 0,
        };

        assert_eq!(
            summary.to_string(),
            "12 states, 0 shift/reduce, 1 reduce/reduce, 1 unused rule"
        );
    }

    #[test]
    fn test_002_state_dump() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());

        let text = tables.state_report(0);
        let kernel = text.find("$accept -> • S $end").unwrap();
        let closure = text.find("E -> • id").unwrap();

        assert!(text.starts_with("state 0"));
        assert!(kernel < closure);
        assert!(text.contains("shift, and go to state"));
        assert!(text.contains("$default"));
        assert!(text.contains("go to state"));

        let id = grammar.symbol_id("id").unwrap();
        let after_id = tables.automaton().goto(0, id).unwrap();
        let text = tables.state_report(after_id);

        assert!(text.starts_with(&format!("state {} (on id)\n", after_id)));
        assert!(text.contains("reduce using rule 4 (E -> id)"));
    }

    #[test]
    fn test_003_report_with_sets() {
        let grammar = fixture_nullable_grammar();
        let tables = Tables::build(&grammar, Config::default().report_sets(true));

        let report = tables.report();
        assert!(report.contains("Nullable: A B"));
        assert!(report.contains("Follow(A): b c"));
        assert!(report.ends_with(&format!("LALR(1): {}\n", tables.summary())));

        let plain = Tables::build(&grammar, Config::default()).report();
        assert!(!plain.contains("Nullable"));
    }

    #[test]
    fn test_004_matrix() {
        let grammar = fixture_expr_grammar();
        let tables = Tables::build(&grammar, Config::default());

        let matrix = tables.matrix();
        assert_eq!(matrix.len(), tables.nb_states() + 1);
        assert!(tables.to_string().contains("acc"));
    }
}
