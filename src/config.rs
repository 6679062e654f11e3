use std::str::FromStr;

use crate::{ErrorKind, YalpError};

/// Which lookahead machine is layered over the LR(0) automaton.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MachineType {
    /// No lookahead: every reduction applies on every terminal.
    Lr0,
    /// Lookahead of `A -> α •` is FOLLOW(A).
    Slr1,
    /// State-specific lookahead (DeRemer and Pennello).
    #[default]
    Lalr1,
}

impl std::fmt::Display for MachineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MachineType::Lr0 => write!(f, "LR(0)"),
            MachineType::Slr1 => write!(f, "SLR(1)"),
            MachineType::Lalr1 => write!(f, "LALR(1)"),
        }
    }
}

impl FromStr for MachineType {
    type Err = YalpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lr0" | "lr(0)" => Ok(Self::Lr0),
            "slr1" | "slr(1)" | "slr" => Ok(Self::Slr1),
            "lalr1" | "lalr(1)" | "lalr" => Ok(Self::Lalr1),
            _ => Err(ErrorKind::unexpected_symbol(s, ["lr0", "slr1", "lalr1"]).into()),
        }
    }
}

/// Table construction settings, fixed for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub machine: MachineType,
    /// Append nullable / FIRST / FOLLOW sets to the text report.
    pub report_sets: bool,
}

impl Config {
    pub fn new(machine: MachineType) -> Self {
        Self {
            machine,
            ..Self::default()
        }
    }

    pub fn machine(mut self, machine: MachineType) -> Self {
        self.machine = machine;
        self
    }

    pub fn report_sets(mut self, report_sets: bool) -> Self {
        self.report_sets = report_sets;
        self
    }
}
