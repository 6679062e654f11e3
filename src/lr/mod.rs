//! LR automaton and parse tables.
//!
//! The LR(0) [`Automaton`] is built once from a [`Grammar`](crate::Grammar);
//! a lookahead machine ([`Lookaheads`]) is layered on top of it and the
//! [`Tables`] builder walks both to produce the action and goto matrices.
mod action;
mod conflict;
mod digraph;
mod driver;
mod graph;
mod lookahead;
mod report;
mod row;
mod table;
mod transition;

pub use action::*;
pub use conflict::*;
pub use driver::Step;
pub use graph::{Automaton, State};
pub use lookahead::Lookaheads;
pub use report::Summary;
pub use row::{GotoColumn, RowInfo};
pub use table::*;
pub use transition::Transition;

/// Index of an automaton state, in discovery order. State 0 is the initial state.
pub type StateId = usize;
