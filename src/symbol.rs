/// Stable index of a symbol in the grammar.
///
/// Non-terminals occupy `0..nb_non_terminals` (the start symbol is always `0`),
/// terminals the following range, with `$end` last.
pub type SymbolId = usize;

pub const EOS: &str = "$end";
pub const ACCEPT: &str = "$accept";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

/// Associativity of a precedence level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Assoc {
    Left,
    Right,
    NonAssoc,
}

impl std::fmt::Display for Assoc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Assoc::Left => write!(f, "left"),
            Assoc::Right => write!(f, "right"),
            Assoc::NonAssoc => write!(f, "nonassoc"),
        }
    }
}

/// Outcome of comparing a rule's fixity against a lookahead terminal's fixity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Shift,
    Reduce,
    Unresolved,
}

/// Associativity paired with a precedence level.
///
/// Levels grow with the declaration order of precedence directives, the last
/// declared binds tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fixity {
    pub assoc: Assoc,
    pub level: usize,
}

impl std::fmt::Display for Fixity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.assoc, self.level)
    }
}

impl Fixity {
    pub const fn new(assoc: Assoc, level: usize) -> Self {
        Self { assoc, level }
    }

    /// Decides a shift/reduce conflict between a reducible rule and the terminal to shift.
    pub fn which(rule: Option<Fixity>, terminal: Option<Fixity>) -> Resolution {
        let (Some(rule), Some(terminal)) = (rule, terminal) else {
            return Resolution::Unresolved;
        };

        match rule.level.cmp(&terminal.level) {
            std::cmp::Ordering::Greater => Resolution::Reduce,
            std::cmp::Ordering::Less => Resolution::Shift,
            std::cmp::Ordering::Equal => match (rule.assoc, terminal.assoc) {
                (Assoc::Left, Assoc::Left) => Resolution::Reduce,
                (Assoc::Right, Assoc::Right) => Resolution::Shift,
                _ => Resolution::Unresolved,
            },
        }
    }
}

/// Defines a symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Stable index of the symbol.
    pub id: SymbolId,
    /// *Unique* name of the symbol
    pub name: String,
    pub kind: SymbolKind,
    /// Character code of a literal token (`'+'`).
    pub code: Option<u32>,
    pub fixity: Option<Fixity>,
    /// Semantic type attached to the symbol's value.
    pub type_tag: Option<String>,
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Symbol {
    pub fn new(id: SymbolId, name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            code: None,
            fixity: None,
            type_tag: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    pub fn has_fixity(&self) -> bool {
        self.fixity.is_some()
    }
}
