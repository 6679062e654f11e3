use crate::RuleId;

use super::StateId;

/// Index into the error-name table.
pub type ErrorId = usize;

/// An action table cell.
///
/// The derived order sorts by kind first, then by argument, which is the
/// order used to find runs of identical actions in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// No action, optionally tagged with a registered error name.
    Error(Option<ErrorId>),
    Shift(StateId),
    Reduce(RuleId),
    Accept,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionKind {
    Error,
    Shift,
    Reduce,
    Accept,
}

impl Default for Action {
    fn default() -> Self {
        Self::Error(None)
    }
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Error(_) => ActionKind::Error,
            Action::Shift(_) => ActionKind::Shift,
            Action::Reduce(_) => ActionKind::Reduce,
            Action::Accept => ActionKind::Accept,
        }
    }

    /// Target state of a shift, rule of a reduce, error name of an error.
    pub fn argument(&self) -> Option<usize> {
        match *self {
            Action::Error(name) => name,
            Action::Shift(to) => Some(to),
            Action::Reduce(rule) => Some(rule),
            Action::Accept => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Action::Error(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Error(None) => Ok(()),
            Action::Error(Some(name)) => write!(f, "e{}", name),
            Action::Shift(to) => write!(f, "s{}", to),
            Action::Reduce(rule) => write!(f, "r{}", rule),
            Action::Accept => write!(f, "acc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ActionKind};

    #[test]
    fn test_001_order_by_kind_then_argument() {
        let mut actions = vec![
            Action::Reduce(1),
            Action::Accept,
            Action::Shift(4),
            Action::Error(None),
            Action::Shift(2),
            Action::Error(Some(0)),
        ];
        actions.sort();

        assert_eq!(
            actions,
            vec![
                Action::Error(None),
                Action::Error(Some(0)),
                Action::Shift(2),
                Action::Shift(4),
                Action::Reduce(1),
                Action::Accept,
            ]
        );
    }

    #[test]
    fn test_002_kind_and_argument() {
        assert_eq!(Action::Shift(3).kind(), ActionKind::Shift);
        assert_eq!(Action::Shift(3).argument(), Some(3));
        assert_eq!(Action::Accept.argument(), None);
        assert_eq!(Action::default(), Action::Error(None));
        assert_eq!(Action::Reduce(2).to_string(), "r2");
        assert_eq!(Action::Error(None).to_string(), "");
    }
}
