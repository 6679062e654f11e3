//! Nullable, FIRST, FOLLOW and finitary sets.
//!
//! Each set is an iterate-to-fixpoint over the rules; updates only ever add
//! members so every loop terminates.
use bit_set::BitSet;

use crate::{Grammar, SymbolId};

/// Derived sets of a grammar, indexed by symbol.
///
/// FIRST and FOLLOW sets hold terminal symbol indices.
#[derive(Debug, Default, Clone)]
pub struct GrammarSets {
    nullable: Vec<bool>,
    first: Vec<BitSet>,
    follow: Vec<BitSet>,
    finitary: Vec<bool>,
}

impl GrammarSets {
    pub fn new(grammar: &Grammar) -> Self {
        let nullable = nullable(grammar);
        let first = first(grammar, &nullable);
        let follow = follow(grammar, &nullable, &first);
        let finitary = finitary(grammar);

        Self {
            nullable,
            first,
            follow,
            finitary,
        }
    }

    pub fn is_nullable(&self, sym: SymbolId) -> bool {
        self.nullable[sym]
    }

    pub fn first(&self, sym: SymbolId) -> &BitSet {
        &self.first[sym]
    }

    /// Terminals that can immediately follow the non-terminal. Empty for terminals.
    pub fn follow(&self, sym: SymbolId) -> &BitSet {
        &self.follow[sym]
    }

    pub fn is_finitary(&self, sym: SymbolId) -> bool {
        self.finitary[sym]
    }

    /// FIRST of a string of symbols, and whether the whole string is nullable.
    pub fn first_of(&self, sequence: &[SymbolId]) -> (BitSet, bool) {
        first_of(sequence, &self.nullable, &self.first)
    }

    /// Whether every symbol of the string can derive the empty string.
    pub fn is_sequence_nullable(&self, sequence: &[SymbolId]) -> bool {
        sequence.iter().all(|&sym| self.nullable[sym])
    }
}

fn nullable(grammar: &Grammar) -> Vec<bool> {
    let mut nullable = vec![false; grammar.nb_symbols()];

    loop {
        let mut changed = false;

        for rule in grammar.rules() {
            if !nullable[rule.lhs] && rule.rhs.iter().all(|&sym| nullable[sym]) {
                nullable[rule.lhs] = true;
                changed = true;
            }
        }

        if !changed {
            break nullable;
        }
    }
}

fn first(grammar: &Grammar, nullable: &[bool]) -> Vec<BitSet> {
    let mut first = vec![BitSet::with_capacity(grammar.nb_symbols()); grammar.nb_symbols()];

    for terminal in grammar.terminals() {
        first[terminal].insert(terminal);
    }

    loop {
        let mut changed = false;

        for rule in grammar.rules() {
            for &sym in rule.rhs.iter() {
                if sym != rule.lhs {
                    let subset = first[sym].clone();
                    let before = first[rule.lhs].len();
                    first[rule.lhs].union_with(&subset);
                    changed |= first[rule.lhs].len() != before;
                }

                if !nullable[sym] {
                    break;
                }
            }
        }

        if !changed {
            break first;
        }
    }
}

fn first_of(sequence: &[SymbolId], nullable: &[bool], first: &[BitSet]) -> (BitSet, bool) {
    let mut set = BitSet::with_capacity(nullable.len());

    for &sym in sequence {
        set.union_with(&first[sym]);

        if !nullable[sym] {
            return (set, false);
        }
    }

    (set, true)
}

fn follow(grammar: &Grammar, nullable: &[bool], first: &[BitSet]) -> Vec<BitSet> {
    let mut follow = vec![BitSet::with_capacity(grammar.nb_symbols()); grammar.nb_symbols()];

    loop {
        let mut changed = false;

        for rule in grammar.rules() {
            for (pos, &sym) in rule.rhs.iter().enumerate() {
                if grammar.is_terminal(sym) {
                    continue;
                }

                // A -> αXβ : FIRST(β) ⊆ FOLLOW(X), and FOLLOW(A) ⊆ FOLLOW(X) if β =>* ε
                let (mut subset, rest_nullable) = first_of(&rule.rhs[pos + 1..], nullable, first);

                if rest_nullable && rule.lhs != sym {
                    subset.union_with(&follow[rule.lhs]);
                }

                let before = follow[sym].len();
                follow[sym].union_with(&subset);
                changed |= follow[sym].len() != before;
            }
        }

        if !changed {
            break follow;
        }
    }
}

fn finitary(grammar: &Grammar) -> Vec<bool> {
    let mut finitary = vec![false; grammar.nb_symbols()];

    for terminal in grammar.terminals() {
        finitary[terminal] = true;
    }

    loop {
        let mut changed = false;

        for rule in grammar.rules() {
            if !finitary[rule.lhs] && rule.rhs.iter().all(|&sym| finitary[sym]) {
                finitary[rule.lhs] = true;
                changed = true;
            }
        }

        if !changed {
            break finitary;
        }
    }
}
