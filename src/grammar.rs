use std::collections::BTreeMap;
use std::ops::Range;

use bit_set::BitSet;
use itertools::Itertools;

use crate::{sets::GrammarSets, ErrorKind, Rule, RuleId, Symbol, SymbolId, YalpResult};

/// A finalized grammar.
///
/// Built once by the [`GrammarBuilder`](crate::GrammarBuilder) and immutable
/// afterwards. Rule 0 is always the augmented rule `$accept -> start $end`.
///
/// # Example
///
/// For the following grammar :
///
/// ```grammar
/// 0. $accept := S $end
/// 1. S := E
/// 2. E := E '+' E
/// 3. E := id
/// ```
///
/// the symbol indices are `S = 0`, `E = 1`, `$accept = 2`, `'+' = 3`, `id = 4`, `$end = 5`.
#[derive(Debug, Clone)]
pub struct Grammar {
    symbols: Vec<Symbol>,
    rules: Vec<Rule>,
    nb_non_terminals: usize,
    by_name: BTreeMap<String, SymbolId>,
    by_code: BTreeMap<u32, SymbolId>,
    /// Rules grouped by their left-hand side.
    rules_by_lhs: Vec<Vec<RuleId>>,
    sets: GrammarSets,
}

impl Grammar {
    /// Checks the rules and computes the derived sets.
    ///
    /// Fails if a non-terminal has no rule or cannot derive any finite string.
    pub(crate) fn new(
        symbols: Vec<Symbol>,
        rules: Vec<Rule>,
        nb_non_terminals: usize,
    ) -> YalpResult<Self> {
        if nb_non_terminals < 2 {
            return Err(ErrorKind::NoNonTerminals.into());
        }

        let by_name = symbols
            .iter()
            .map(|sym| (sym.name.clone(), sym.id))
            .collect();

        let by_code = symbols
            .iter()
            .filter_map(|sym| sym.code.map(|code| (code, sym.id)))
            .collect();

        let mut rules_by_lhs = vec![Vec::new(); nb_non_terminals];
        for rule in rules.iter() {
            rules_by_lhs[rule.lhs].push(rule.id);
        }

        if let Some(nt) = (0..nb_non_terminals).find(|&nt| rules_by_lhs[nt].is_empty()) {
            return Err(ErrorKind::NoRules(symbols[nt].name.clone()).into());
        }

        let mut grammar = Self {
            symbols,
            rules,
            nb_non_terminals,
            by_name,
            by_code,
            rules_by_lhs,
            sets: GrammarSets::default(),
        };

        grammar.sets = GrammarSets::new(&grammar);

        let infinite = grammar
            .non_terminals()
            .filter(|&nt| nt != grammar.accept() && !grammar.sets.is_finitary(nt))
            .map(|nt| grammar.name(nt).to_owned())
            .collect::<Vec<_>>();

        if !infinite.is_empty() {
            return Err(ErrorKind::NonFinitary(infinite).into());
        }

        log::debug!(
            "grammar: {} non-terminals, {} terminals, {} rules",
            grammar.nb_non_terminals(),
            grammar.nb_terminals(),
            grammar.rules.len()
        );

        Ok(grammar)
    }

    /// Returns the start symbol, always the first non-terminal.
    pub fn start(&self) -> SymbolId {
        0
    }

    /// Returns the internal `$accept` non-terminal, the last non-terminal.
    pub fn accept(&self) -> SymbolId {
        self.nb_non_terminals - 1
    }

    /// Returns the end-of-stream terminal (`$end`), the last symbol.
    pub fn eos(&self) -> SymbolId {
        self.symbols.len() - 1
    }

    pub fn nb_symbols(&self) -> usize {
        self.symbols.len()
    }

    pub fn nb_non_terminals(&self) -> usize {
        self.nb_non_terminals
    }

    pub fn nb_terminals(&self) -> usize {
        self.symbols.len() - self.nb_non_terminals
    }

    pub fn nb_rules(&self) -> usize {
        self.rules.len()
    }

    pub fn non_terminals(&self) -> Range<SymbolId> {
        0..self.nb_non_terminals
    }

    pub fn terminals(&self) -> Range<SymbolId> {
        self.nb_non_terminals..self.symbols.len()
    }

    pub fn is_terminal(&self, sym: SymbolId) -> bool {
        sym >= self.nb_non_terminals
    }

    /// Position of a terminal in an action row.
    #[inline(always)]
    pub fn slot(&self, terminal: SymbolId) -> usize {
        debug_assert!(self.is_terminal(terminal), "symbol {} is not a terminal", terminal);
        terminal - self.nb_non_terminals
    }

    /// Terminal at the given action row position.
    #[inline(always)]
    pub fn terminal_at(&self, slot: usize) -> SymbolId {
        slot + self.nb_non_terminals
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    pub fn name(&self, id: SymbolId) -> &str {
        &self.symbols[id].name
    }

    /// Get a symbol based on its name.
    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.by_name.get(name).copied()
    }

    /// Get a literal terminal based on its character code.
    pub fn literal(&self, code: u32) -> Option<SymbolId> {
        self.by_code.get(&code).copied()
    }

    /// Iterate over all rules of the grammar
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: RuleId) -> &Rule {
        &self.rules[id]
    }

    /// Rules whose left-hand side is the given non-terminal, in declaration order.
    pub fn rules_of(&self, nt: SymbolId) -> &[RuleId] {
        &self.rules_by_lhs[nt]
    }

    pub fn sets(&self) -> &GrammarSets {
        &self.sets
    }

    pub fn is_nullable(&self, sym: SymbolId) -> bool {
        self.sets.is_nullable(sym)
    }

    pub fn first(&self, sym: SymbolId) -> &BitSet {
        self.sets.first(sym)
    }

    pub fn follow(&self, nt: SymbolId) -> &BitSet {
        self.sets.follow(nt)
    }

    /// Renders a set of symbols as a space separated list of names.
    pub fn names(&self, set: &BitSet) -> String {
        set.iter().map(|sym| self.name(sym)).join(" ")
    }
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rule in self.rules.iter() {
            writeln!(f, "{:>4}  {}", rule.id, rule.display(self))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::fixture_expr_grammar;

    #[test]
    fn test_001_rules_grouped_by_lhs() {
        let grammar = fixture_expr_grammar();
        let e = grammar.symbol_id("E").unwrap();

        assert_eq!(grammar.rules_of(e), &[2, 3, 4]);
        assert_eq!(grammar.rules_of(grammar.accept()), &[0]);
        assert_eq!(grammar.rule(0).rhs, vec![grammar.start(), grammar.eos()]);
    }

    #[test]
    fn test_002_terminal_slots() {
        let grammar = fixture_expr_grammar();

        for terminal in grammar.terminals() {
            assert!(grammar.is_terminal(terminal));
            assert_eq!(grammar.terminal_at(grammar.slot(terminal)), terminal);
        }

        assert_eq!(grammar.slot(grammar.eos()), grammar.nb_terminals() - 1);
        assert_eq!(grammar.literal('+' as u32), grammar.symbol_id("'+'"));
    }

    #[test]
    fn test_003_display() {
        let grammar = fixture_expr_grammar();
        let text = grammar.to_string();

        assert!(text.contains("0  $accept -> S $end"));
        assert!(text.contains("2  E -> E '+' E"));
    }
}
