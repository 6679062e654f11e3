//! Digraph traversal (DeRemer and Pennello).
//!
//! Given a relation `R` over `0..n` and initial sets `F'(x)`, computes for
//! every `x` the smallest `F(x)` such that `F(x) = F'(x) ∪ ⋃{ F(y) | x R y }`.
//! Strongly connected components share one set, so every vertex is visited once.
use bit_set::BitSet;

const DONE: usize = usize::MAX;

struct Traversal<'r> {
    relation: &'r [Vec<usize>],
    sets: Vec<BitSet>,
    depth: Vec<usize>,
    stack: Vec<usize>,
}

impl Traversal<'_> {
    fn traverse(&mut self, x: usize) {
        self.stack.push(x);
        let depth = self.stack.len();
        self.depth[x] = depth;

        let relation = self.relation;
        for &y in relation[x].iter() {
            if self.depth[y] == 0 {
                self.traverse(y);
            }

            self.depth[x] = self.depth[x].min(self.depth[y]);

            if x != y {
                let set = self.sets[y].clone();
                self.sets[x].union_with(&set);
            }
        }

        if self.depth[x] == depth {
            while let Some(top) = self.stack.pop() {
                self.depth[top] = DONE;
                if top == x {
                    break;
                }
                self.sets[top] = self.sets[x].clone();
            }
        }
    }
}

/// Closes `init` under `relation`.
///
/// `relation[x]` lists the `y` such that `x R y`; `init` must hold one set per vertex.
pub(crate) fn digraph(relation: &[Vec<usize>], init: Vec<BitSet>) -> Vec<BitSet> {
    debug_assert_eq!(relation.len(), init.len());

    let mut traversal = Traversal {
        relation,
        sets: init,
        depth: vec![0; relation.len()],
        stack: Vec::default(),
    };

    for x in 0..relation.len() {
        if traversal.depth[x] == 0 {
            traversal.traverse(x);
        }
    }

    traversal.sets
}

#[cfg(test)]
mod tests {
    use bit_set::BitSet;

    use super::digraph;

    fn set(members: &[usize]) -> BitSet {
        members.iter().copied().collect()
    }

    #[test]
    fn test_001_chain() {
        // 0 -> 1 -> 2
        let relation = vec![vec![1], vec![2], vec![]];
        let sets = digraph(&relation, vec![set(&[0]), set(&[1]), set(&[2])]);

        assert_eq!(sets, vec![set(&[0, 1, 2]), set(&[1, 2]), set(&[2])]);
    }

    #[test]
    fn test_002_cycle_shares_one_set() {
        // 0 -> 1 -> 2 -> 0, 2 -> 3
        let relation = vec![vec![1], vec![2], vec![0, 3], vec![]];
        let sets = digraph(&relation, vec![set(&[0]), set(&[]), set(&[2]), set(&[3])]);

        let scc = set(&[0, 2, 3]);
        assert_eq!(sets, vec![scc.clone(), scc.clone(), scc, set(&[3])]);
    }

    #[test]
    fn test_003_self_loop() {
        let relation = vec![vec![0, 1], vec![]];
        let sets = digraph(&relation, vec![set(&[]), set(&[4])]);

        assert_eq!(sets, vec![set(&[4]), set(&[4])]);
    }
}
