//! Lookahead machines layered on the LR(0) automaton.
use std::collections::{BTreeMap, HashMap};

use bit_set::BitSet;

use crate::{Grammar, MachineType, RuleId, SymbolId};

use super::{digraph::digraph, Automaton, StateId};

/// Lookahead set of every reduce item, by state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookaheads {
    machine: MachineType,
    sets: Vec<BTreeMap<RuleId, BitSet>>,
}

impl Lookaheads {
    pub fn build(machine: MachineType, grammar: &Grammar, automaton: &Automaton) -> Self {
        let sets = match machine {
            MachineType::Lr0 => {
                let all = grammar.terminals().collect::<BitSet>();
                per_reduce_item(grammar, automaton, |_, _| all.clone())
            }
            MachineType::Slr1 => per_reduce_item(grammar, automaton, |_, rule| {
                grammar.follow(grammar.rule(rule).lhs).clone()
            }),
            MachineType::Lalr1 => lalr1(grammar, automaton),
        };

        Self { machine, sets }
    }

    pub fn machine(&self) -> MachineType {
        self.machine
    }

    /// Lookahead of `rule` reduced in `state`, `None` if the rule is not reducible there.
    pub fn get(&self, state: StateId, rule: RuleId) -> Option<&BitSet> {
        self.sets.get(state).and_then(|sets| sets.get(&rule))
    }

    /// Reduce items of a state with their lookahead, in ascending rule order.
    pub fn iter(&self, state: StateId) -> impl Iterator<Item = (RuleId, &BitSet)> {
        self.sets[state].iter().map(|(&rule, set)| (rule, set))
    }
}

fn per_reduce_item<F>(
    grammar: &Grammar,
    automaton: &Automaton,
    mut f: F,
) -> Vec<BTreeMap<RuleId, BitSet>>
where
    F: FnMut(StateId, RuleId) -> BitSet,
{
    automaton
        .states()
        .iter()
        .map(|state| {
            state
                .reductions(grammar)
                .map(|rule| (rule, f(state.id, rule)))
                .collect()
        })
        .collect()
}

/// LALR(1) lookaheads through the reads / includes / lookback relations.
///
/// The relations range over non-terminal transitions `(p, A)`:
/// - `DR(p, A)`: terminals shifted right after the goto on `A`, `$end` included
///   for the accepting state;
/// - `(p, A) reads (r, C)` when `p -A-> r` and `C` is nullable;
/// - `(p', B) includes (p, A)` when `B -> β C γ` with `γ` nullable and `p' = goto(p, β)`;
/// - `(q, A -> ω) lookback (p, A)` when `q = goto(p, ω)`.
///
/// `Read = digraph(reads, DR)`, `Follow = digraph(includes, Read)` and
/// `LA(q, A -> ω)` is the union of `Follow` over the lookback transitions.
fn lalr1(grammar: &Grammar, automaton: &Automaton) -> Vec<BTreeMap<RuleId, BitSet>> {
    let transitions = automaton.iter_gotos(grammar).collect::<Vec<_>>();
    let index = transitions
        .iter()
        .enumerate()
        .map(|(x, t)| ((t.from, t.symbol), x))
        .collect::<HashMap<(StateId, SymbolId), usize>>();

    let direct_reads = transitions
        .iter()
        .map(|t| {
            automaton
                .state(t.to)
                .items
                .next_symbols(grammar)
                .into_iter()
                .filter(|&sym| grammar.is_terminal(sym))
                .collect::<BitSet>()
        })
        .collect::<Vec<_>>();

    let reads = transitions
        .iter()
        .map(|t| {
            automaton
                .state(t.to)
                .iter_gotos(grammar)
                .filter(|next| grammar.is_nullable(next.symbol))
                .filter_map(|next| index.get(&(next.from, next.symbol)).copied())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let mut includes = vec![Vec::new(); transitions.len()];
    let mut lookback = vec![BTreeMap::<RuleId, Vec<usize>>::new(); automaton.len()];

    for (x, t) in transitions.iter().enumerate() {
        for &rule_id in grammar.rules_of(t.symbol) {
            let rhs = &grammar.rule(rule_id).rhs;
            let mut state = t.from;
            let mut complete = true;

            for (pos, &sym) in rhs.iter().enumerate() {
                if !grammar.is_terminal(sym)
                    && grammar.sets().is_sequence_nullable(&rhs[pos + 1..])
                {
                    if let Some(&inner) = index.get(&(state, sym)) {
                        includes[inner].push(x);
                    }
                }

                match automaton.goto(state, sym) {
                    Some(next) => state = next,
                    None => {
                        complete = false;
                        break;
                    }
                }
            }

            if complete {
                lookback[state].entry(rule_id).or_default().push(x);
            }
        }
    }

    for relation in includes.iter_mut() {
        relation.sort_unstable();
        relation.dedup();
    }

    log::debug!(
        "LALR(1) relations: {} transitions, {} reads, {} includes",
        transitions.len(),
        reads.iter().map(Vec::len).sum::<usize>(),
        includes.iter().map(Vec::len).sum::<usize>()
    );

    let read = digraph(&reads, direct_reads);
    let follow = digraph(&includes, read);

    automaton
        .states()
        .iter()
        .map(|state| {
            state
                .reductions(grammar)
                .map(|rule| {
                    let mut set = BitSet::with_capacity(grammar.nb_symbols());
                    for &x in lookback[state.id].get(&rule).into_iter().flatten() {
                        set.union_with(&follow[x]);
                    }
                    (rule, set)
                })
                .collect()
        })
        .collect()
}
