//! Row analysis for compact table emission.
use std::collections::BTreeMap;

use itertools::Itertools;

use super::{Action, StateId};

/// Default action selection for one action row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowInfo {
    order: Vec<usize>,
    default: Option<Action>,
}

impl RowInfo {
    /// Sorts the slots of `row` by (action, slot) and picks the most
    /// frequent action as the default, the earliest slot breaking ties.
    ///
    /// A row where no action appears twice has no default.
    pub fn new(row: &[Action]) -> Self {
        let order = (0..row.len())
            .sorted_unstable_by_key(|&slot| (row[slot], slot))
            .collect::<Vec<_>>();

        let mut best: Option<(usize, usize, Action)> = None;
        let mut offset = 0;

        for (count, action) in order.iter().map(|&slot| row[slot]).dedup_with_count() {
            let first = order[offset];
            offset += count;

            if count < 2 {
                continue;
            }

            match best {
                Some((best_count, best_first, _))
                    if best_count > count || (best_count == count && best_first < first) => {}
                _ => best = Some((count, first, action)),
            }
        }

        Self {
            order,
            default: best.map(|(_, _, action)| action),
        }
    }

    pub fn default(&self) -> Option<Action> {
        self.default
    }

    /// Terminal slots sorted so that identical actions are contiguous.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Slots whose action differs from the default, in slot order.
    pub fn explicit_slots<'a>(&'a self, row: &'a [Action]) -> impl Iterator<Item = usize> + 'a {
        (0..row.len()).filter(move |&slot| Some(row[slot]) != self.default)
    }
}

/// Goto targets of one non-terminal across all states, compacted around the
/// most frequent target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GotoColumn {
    pub default: Option<StateId>,
    /// `(from, to)` pairs that differ from the default.
    pub entries: Vec<(StateId, StateId)>,
}

impl GotoColumn {
    /// Compacts the column `index` of a goto matrix. Ties go to the lower target.
    pub fn new(gotos: &[Vec<Option<StateId>>], index: usize) -> Self {
        let targets = gotos
            .iter()
            .enumerate()
            .filter_map(|(from, row)| row.get(index).copied().flatten().map(|to| (from, to)))
            .collect::<Vec<_>>();

        let mut counts = BTreeMap::<StateId, usize>::new();
        for &(_, to) in targets.iter() {
            *counts.entry(to).or_default() += 1;
        }

        let default = counts
            .iter()
            .max_by_key(|&(&to, &count)| (count, std::cmp::Reverse(to)))
            .map(|(&to, _)| to);

        Self {
            default,
            entries: targets
                .into_iter()
                .filter(|&(_, to)| Some(to) != default)
                .collect(),
        }
    }

    /// Target from `state`, falling back to the default.
    pub fn get(&self, state: StateId) -> Option<StateId> {
        self.entries
            .iter()
            .find(|&&(from, _)| from == state)
            .map(|&(_, to)| to)
            .or(self.default)
    }
}
