use itertools::Itertools;

use crate::{Fixity, Grammar, SymbolId};

/// The rule's identifier in the grammar.
///
/// Identifiers follow declaration order and double as the rule's sequence
/// number: on a reduce/reduce conflict the lower identifier wins.
pub type RuleId = usize;

/// Defines a grammar rule by symbol names.
///
/// This is the builder's input; the grammar turns it into a [`Rule`]
/// over stable symbol indices.
///
/// X := A1..An
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDef {
    pub lhs: String,
    pub rhs: Vec<String>,
    /// Terminal named by an explicit `%prec` annotation.
    pub prec: Option<String>,
}

impl RuleDef {
    pub fn new<I, S>(lhs: impl Into<String>, rhs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lhs: lhs.into(),
            rhs: rhs.into_iter().map(Into::into).collect(),
            prec: None,
        }
    }

    /// Borrow the precedence of the given terminal (`%prec`).
    pub fn prec(mut self, terminal: impl Into<String>) -> Self {
        self.prec = Some(terminal.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// A grammar rule (production)
///
/// # Example
/// A -> w
pub struct Rule {
    pub id: RuleId,
    pub lhs: SymbolId,
    pub rhs: Vec<SymbolId>,
    /// Explicit `%prec`, or the fixity of the rightmost terminal having one.
    pub fixity: Option<Fixity>,
}

impl Rule {
    pub fn len(&self) -> usize {
        self.rhs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rhs.is_empty()
    }

    pub fn display<'g>(&'g self, grammar: &'g Grammar) -> RuleDisplay<'g> {
        RuleDisplay {
            rule: self,
            grammar,
        }
    }
}

/// Renders a rule with symbol names.
pub struct RuleDisplay<'g> {
    rule: &'g Rule,
    grammar: &'g Grammar,
}

impl std::fmt::Display for RuleDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ->", self.grammar.name(self.rule.lhs))?;

        if self.rule.rhs.is_empty() {
            write!(f, " ε")
        } else {
            write!(
                f,
                " {}",
                self.rule
                    .rhs
                    .iter()
                    .map(|&sym| self.grammar.name(sym))
                    .join(" ")
            )
        }
    }
}
