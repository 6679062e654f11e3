use crate::{Fixity, Grammar, Resolution, Rule, RuleId, Symbol, SymbolId};

use super::{Action, StateId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    /// A reduction lost to a shift (or to the accept action) for lack of precedence.
    ShiftReduce { shift: Action, rule: RuleId },
    /// Two reductions on the same terminal; the earlier rule is kept.
    ReduceReduce { kept: RuleId, dropped: RuleId },
}

/// An unresolved choice in one action table cell.
///
/// Conflicts never change the tables: one action is always picked, the
/// record only serves diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Conflict {
    pub state: StateId,
    pub terminal: SymbolId,
    pub kind: ConflictKind,
}

impl Conflict {
    pub fn is_shift_reduce(&self) -> bool {
        matches!(self.kind, ConflictKind::ShiftReduce { .. })
    }

    pub fn is_reduce_reduce(&self) -> bool {
        matches!(self.kind, ConflictKind::ReduceReduce { .. })
    }

    pub fn display<'g>(&'g self, grammar: &'g Grammar) -> ConflictDisplay<'g> {
        ConflictDisplay {
            conflict: self,
            grammar,
        }
    }
}

pub struct ConflictDisplay<'g> {
    conflict: &'g Conflict,
    grammar: &'g Grammar,
}

impl std::fmt::Display for ConflictDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let terminal = self.grammar.name(self.conflict.terminal);

        match self.conflict.kind {
            ConflictKind::ShiftReduce { shift, rule } => {
                let kept = match shift {
                    Action::Shift(to) => format!("shift {}", to),
                    _ => "accept".to_owned(),
                };
                write!(
                    f,
                    "state {}: shift/reduce conflict on {}, {} kept over reduce {} ({})",
                    self.conflict.state,
                    terminal,
                    kept,
                    rule,
                    self.grammar.rule(rule).display(self.grammar)
                )
            }
            ConflictKind::ReduceReduce { kept, dropped } => write!(
                f,
                "state {}: reduce/reduce conflict on {}, reduce {} ({}) kept over reduce {} ({})",
                self.conflict.state,
                terminal,
                kept,
                self.grammar.rule(kept).display(self.grammar),
                dropped,
                self.grammar.rule(dropped).display(self.grammar)
            ),
        }
    }
}

/// Merges a reduce candidate into an action cell.
///
/// Returns the action the cell ends up with, and the conflict to record if
/// the choice could not be settled by precedence.
///
/// - an empty cell takes the reduction;
/// - against a shift, the rule and terminal fixities decide; without a
///   decision the shift is kept;
/// - against another reduction, the lower rule wins.
pub(crate) fn resolve(
    current: Action,
    rule: &Rule,
    terminal: &Symbol,
) -> (Action, Option<ConflictKind>) {
    match current {
        Action::Error(_) => (Action::Reduce(rule.id), None),
        Action::Shift(_) | Action::Accept => match Fixity::which(rule.fixity, terminal.fixity) {
            Resolution::Reduce => (Action::Reduce(rule.id), None),
            Resolution::Shift => (current, None),
            Resolution::Unresolved => (
                current,
                Some(ConflictKind::ShiftReduce {
                    shift: current,
                    rule: rule.id,
                }),
            ),
        },
        Action::Reduce(other) => {
            let (kept, dropped) = if other <= rule.id {
                (other, rule.id)
            } else {
                (rule.id, other)
            };

            (
                Action::Reduce(kept),
                Some(ConflictKind::ReduceReduce { kept, dropped }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve, ConflictKind};
    use crate::lr::Action;
    use crate::{Assoc, Fixity, Rule, Symbol, SymbolKind};

    fn rule(id: usize, fixity: Option<Fixity>) -> Rule {
        Rule {
            id,
            lhs: 0,
            rhs: vec![0, 3, 0],
            fixity,
        }
    }

    fn terminal(fixity: Option<Fixity>) -> Symbol {
        let mut sym = Symbol::new(3, "'+'", SymbolKind::Terminal);
        sym.fixity = fixity;
        sym
    }

    #[test]
    fn test_001_empty_cell_takes_reduction() {
        assert_eq!(
            resolve(Action::Error(None), &rule(2, None), &terminal(None)),
            (Action::Reduce(2), None)
        );
    }

    #[test]
    fn test_002_left_assoc_reduces() {
        let left = Some(Fixity::new(Assoc::Left, 1));
        assert_eq!(
            resolve(Action::Shift(5), &rule(2, left), &terminal(left)),
            (Action::Reduce(2), None)
        );
    }

    #[test]
    fn test_003_right_assoc_shifts() {
        let right = Some(Fixity::new(Assoc::Right, 1));
        assert_eq!(
            resolve(Action::Shift(5), &rule(2, right), &terminal(right)),
            (Action::Shift(5), None)
        );
    }

    #[test]
    fn test_004_higher_level_wins() {
        let low = Some(Fixity::new(Assoc::Left, 1));
        let high = Some(Fixity::new(Assoc::Left, 2));

        assert_eq!(
            resolve(Action::Shift(5), &rule(2, low), &terminal(high)).0,
            Action::Shift(5)
        );
        assert_eq!(
            resolve(Action::Shift(5), &rule(2, high), &terminal(low)).0,
            Action::Reduce(2)
        );
    }

    #[test]
    fn test_005_unresolved_defaults_to_shift() {
        assert_eq!(
            resolve(Action::Shift(5), &rule(2, None), &terminal(None)),
            (
                Action::Shift(5),
                Some(ConflictKind::ShiftReduce {
                    shift: Action::Shift(5),
                    rule: 2
                })
            )
        );

        let nonassoc = Some(Fixity::new(Assoc::NonAssoc, 1));
        assert_eq!(
            resolve(Action::Shift(5), &rule(2, nonassoc), &terminal(nonassoc)).0,
            Action::Shift(5)
        );
    }

    #[test]
    fn test_006_earlier_rule_wins() {
        let expected = (
            Action::Reduce(1),
            Some(ConflictKind::ReduceReduce {
                kept: 1,
                dropped: 2,
            }),
        );

        assert_eq!(resolve(Action::Reduce(1), &rule(2, None), &terminal(None)), expected);
        assert_eq!(resolve(Action::Reduce(2), &rule(1, None), &terminal(None)), expected);
    }
}
