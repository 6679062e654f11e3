use itertools::Itertools as _;
use thiserror::Error;

use crate::lr::StateId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedSymbols(Vec<String>);

impl std::fmt::Display for ExpectedSymbols {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(", "))
    }
}

impl ExpectedSymbols {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("unknown symbol {0}")]
    UnknownSymbol(String),

    #[error("a symbol with the same identifier already exists {0}")]
    DuplicatedSymbol(String),

    #[error("symbol {0} is used both as a terminal and as a non-terminal")]
    KindMismatch(String),

    #[error("terminal {0} cannot be the left-hand side of a rule")]
    TerminalOnLhs(String),

    #[error("the grammar has no non-terminal symbols")]
    NoNonTerminals,

    #[error("start symbol {0} is not defined")]
    UndefinedStart(String),

    #[error("non-terminal {0} has no rules")]
    NoRules(String),

    #[error("non-terminals cannot derive any finite string: {}", .0.join(", "))]
    NonFinitary(Vec<String>),

    #[error("unexpected symbol {got}, expecting {expecting}")]
    UnexpectedSymbol {
        expecting: ExpectedSymbols,
        got: String,
    },

    #[error("unexpected end of stream")]
    UnexpectedEndOfStream,
}

impl ErrorKind {
    pub fn unexpected_symbol<I, S>(got: &str, expecting: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        Self::UnexpectedSymbol {
            expecting: ExpectedSymbols(expecting.into_iter().map(|s| s.to_string()).collect()),
            got: got.to_string(),
        }
    }

    pub fn unknown_symbol(got: &str) -> Self {
        Self::UnknownSymbol(got.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct YalpError {
    /// Kind of error
    kind: ErrorKind,
    /// Parser state in which the error was raised, if any.
    pub(crate) state: Option<StateId>,
}

impl YalpError {
    pub fn new(kind: impl Into<ErrorKind>, state: Option<StateId>) -> Self {
        Self {
            kind: kind.into(),
            state,
        }
    }
}

impl From<ErrorKind> for YalpError {
    fn from(kind: ErrorKind) -> Self {
        Self { kind, state: None }
    }
}

impl YalpError {
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub fn state(&self) -> Option<StateId> {
        self.state
    }
}
