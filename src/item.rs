use bit_set::BitSet;
use itertools::Itertools;

use crate::{Grammar, RuleId, SymbolId};

/// A rule item.
///
/// # Example
/// A -> w • eos
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub rule: RuleId,
    /// Number of right-hand side symbols already matched.
    pub position: usize,
}

impl Item {
    pub const fn new(rule: RuleId, position: usize) -> Self {
        Self { rule, position }
    }

    /// Check if we reached the end of a rule.
    ///
    /// # Example
    /// A -> w •
    pub fn is_exhausted(&self, grammar: &Grammar) -> bool {
        self.position >= grammar.rule(self.rule).rhs.len()
    }

    /// Returns the symbol right after the dot.
    /// If A -> w •, then returns None.
    pub fn symbol(&self, grammar: &Grammar) -> Option<SymbolId> {
        grammar.rule(self.rule).rhs.get(self.position).copied()
    }

    /// Returns the next rule's item.
    ///
    /// # Example
    /// (A -> • w eof).next() -> (A -> w • eof)
    pub fn next(&self) -> Self {
        Self::new(self.rule, self.position + 1)
    }

    pub fn display<'g>(&self, grammar: &'g Grammar) -> ItemDisplay<'g> {
        ItemDisplay {
            item: *self,
            grammar,
        }
    }
}

/// Renders an item with symbol names.
pub struct ItemDisplay<'g> {
    item: Item,
    grammar: &'g Grammar,
}

impl std::fmt::Display for ItemDisplay<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rule = self.grammar.rule(self.item.rule);

        let mut rhs = rule
            .rhs
            .iter()
            .map(|&sym| self.grammar.name(sym).to_owned())
            .enumerate()
            .map(|(pos, mut s)| {
                if pos == self.item.position {
                    s.insert_str(0, "• ");
                }
                s
            })
            .join(" ");

        if self.item.position >= rule.rhs.len() {
            if !rhs.is_empty() {
                rhs.push(' ');
            }
            rhs.push('•');
        }

        write!(f, "{} -> {}", self.grammar.name(rule.lhs), rhs)
    }
}

/// A set of items.
///
/// The kernel is the set of items before closure, kept sorted so that
/// two sets with the same kernel compare equal whatever the discovery order.
/// Items are additional items from closure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemSet {
    kernel: Vec<Item>,
    items: Vec<Item>,
}

impl FromIterator<Item> for ItemSet {
    /// Collect the iterator as a kernel set.
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut kernel = iter.into_iter().collect::<Vec<_>>();
        kernel.sort_unstable();
        kernel.dedup();

        Self {
            kernel,
            items: vec![],
        }
    }
}

impl ItemSet {
    /// The kernel set of the initial state: `$accept -> • start $end`.
    pub fn start() -> Self {
        [Item::new(0, 0)].into_iter().collect()
    }

    pub fn kernel(&self) -> &[Item] {
        &self.kernel
    }

    /// Items added by the closure, in rule order.
    pub fn closure_items(&self) -> &[Item] {
        &self.items
    }

    /// Iterate over all items within the set.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.kernel.iter().chain(self.items.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.kernel.is_empty()
    }

    /// Iterate over all exhausted items (A -> w •)
    pub fn iter_exhausted_items<'a>(
        &'a self,
        grammar: &'a Grammar,
    ) -> impl Iterator<Item = &'a Item> + 'a {
        self.iter().filter(move |item| item.is_exhausted(grammar))
    }

    /// Symbols found right after a dot, in index order.
    pub fn next_symbols(&self, grammar: &Grammar) -> Vec<SymbolId> {
        self.iter()
            .filter_map(|item| item.symbol(grammar))
            .sorted_unstable()
            .dedup()
            .collect()
    }

    /// Close the item set
    ///
    /// Adds `B -> • γ` for every non-terminal `B` found after a dot, until no
    /// new item appears.
    pub fn close(&mut self, grammar: &Grammar) {
        let mut expanded = BitSet::with_capacity(grammar.nb_non_terminals());
        let mut stack = self
            .kernel
            .iter()
            .filter_map(|item| item.symbol(grammar))
            .filter(|&sym| !grammar.is_terminal(sym))
            .collect::<Vec<_>>();

        self.items.clear();

        while let Some(nt) = stack.pop() {
            if !expanded.insert(nt) {
                continue;
            }

            for &rule in grammar.rules_of(nt) {
                let item = Item::new(rule, 0);
                self.items.push(item);

                if let Some(sym) = item.symbol(grammar) {
                    if !grammar.is_terminal(sym) && !expanded.contains(sym) {
                        stack.push(sym);
                    }
                }
            }
        }

        self.items.sort_unstable();
        self.items.dedup();
    }

    /// Advances the dot past `symbol` for every applicable item and closes the result.
    ///
    /// Returns `None` if no item expects `symbol`.
    pub fn goto(&self, symbol: SymbolId, grammar: &Grammar) -> Option<ItemSet> {
        let mut set = self
            .iter()
            .filter(|item| item.symbol(grammar) == Some(symbol))
            .map(Item::next)
            .collect::<ItemSet>();

        if set.is_empty() {
            return None;
        }

        set.close(grammar);
        Some(set)
    }
}
