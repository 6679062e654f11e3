//! LR(0), SLR(1) and LALR(1) parse table generation.
//!
//! A [`GrammarBuilder`] collects symbols, precedence directives and rules and
//! produces an immutable [`Grammar`]; [`lr::Tables::build`] then derives the
//! automaton, the lookaheads and the action/goto tables.
//!
//! ```
//! use yalp_lalr::{lr::{Action, Tables}, Assoc, Config, GrammarBuilder, YalpError};
//!
//! let mut builder = GrammarBuilder::default();
//! builder
//!     .terminal("id")?
//!     .precedence(Assoc::Left, ["'+'"])?
//!     .rule("E", ["E", "'+'", "E"])?
//!     .rule("E", ["id"])?;
//! let grammar = builder.build()?;
//!
//! let tables = Tables::build(&grammar, Config::default());
//! assert!(tables.conflicts().is_empty());
//! assert!(matches!(tables.action(0, grammar.symbol_id("id").unwrap()), Action::Shift(_)));
//! # Ok::<(), YalpError>(())
//! ```
pub mod ast;
pub mod builder;
pub mod config;
pub mod error;
pub mod grammar;
pub mod item;
pub mod lr;
pub mod parser;
pub mod rule;
pub mod sets;
pub mod symbol;

pub use ast::AstNode;
pub use builder::{GrammarBuilder, SymbolDef};
pub use config::{Config, MachineType};
pub use error::{ErrorKind, ExpectedSymbols, YalpError};
pub use grammar::Grammar;
pub use item::*;
pub use parser::LrParser;
pub use rule::*;
pub use sets::GrammarSets;
pub use symbol::*;

pub type YalpResult<T> = Result<T, YalpError>;

#[cfg(test)]
pub mod fixtures {
    use crate::{Assoc, Grammar, GrammarBuilder};

    /// Ambiguous expressions settled by precedence.
    ///
    /// ```grammar
    /// %left '+'
    /// %left '*'
    /// 1. S := E
    /// 2. E := E '+' E
    /// 3. E := E '*' E
    /// 4. E := id
    /// ```
    pub fn fixture_expr_grammar() -> Grammar {
        let mut builder = GrammarBuilder::default();

        builder
            .terminal("id")
            .unwrap()
            .precedence(Assoc::Left, ["'+'"])
            .unwrap()
            .precedence(Assoc::Left, ["'*'"])
            .unwrap()
            .rule("S", ["E"])
            .unwrap()
            .rule("E", ["E", "'+'", "E"])
            .unwrap()
            .rule("E", ["E", "'*'", "E"])
            .unwrap()
            .rule("E", ["id"])
            .unwrap();

        builder.build().unwrap()
    }

    /// ```grammar
    /// 1. S := A B c
    /// 2. A := a
    /// 3. A := ε
    /// 4. B := b
    /// 5. B := ε
    /// ```
    pub fn fixture_nullable_grammar() -> Grammar {
        let mut builder = GrammarBuilder::default();

        builder
            .terminal("a")
            .unwrap()
            .terminal("b")
            .unwrap()
            .terminal("c")
            .unwrap()
            .rule("S", ["A", "B", "c"])
            .unwrap()
            .rule("A", ["a"])
            .unwrap()
            .rule("A", [] as [&str; 0])
            .unwrap()
            .rule("B", ["b"])
            .unwrap()
            .rule("B", [] as [&str; 0])
            .unwrap();

        builder.build().unwrap()
    }
}
