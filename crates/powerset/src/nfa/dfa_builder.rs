use std::collections::{BTreeMap, BTreeSet, VecDeque};

use indexmap::IndexMap;

use super::{Composite, Nfa, State};
use crate::{bijection::Bijection, closure::Closure, dfa, dfa::Dfa, memoize::Memoize};

/// Transition relation between composite states, in discovery order
type CompositeTrans = IndexMap<Composite, BTreeMap<String, Composite>>;

pub struct DfaBuilder<'a> {
    nfa: &'a Nfa,
    closure: Closure<State>,
    memo: Memoize<BTreeSet<State>>,
}

impl<'a> DfaBuilder<'a> {
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            closure: Closure::default(),
            memo: Memoize::default(),
        }
    }

    fn epsilon_close<I: IntoIterator<Item = State>>(&mut self, seed: I) -> Composite {
        let nfa = self.nfa;
        let mut set = BTreeSet::new();
        self.closure.init(seed);
        self.closure.solve(&mut set, |s| nfa.epsilon_targets(s));
        self.memo.memoize(set)
    }

    /// Explore every composite state reachable from the closure of the NFA
    /// start state, returning that start state and the relation between all
    /// discovered composite states
    fn composite_trans(&mut self) -> (Composite, CompositeTrans) {
        let nfa = self.nfa;
        let start = self.epsilon_close([nfa.start()]);

        let mut trans = CompositeTrans::default();
        let mut q: VecDeque<_> = [Composite::clone(&start)].into_iter().collect();

        while let Some(set) = q.pop_front() {
            if trans.contains_key(&set) {
                continue;
            }

            let mut moves = BTreeMap::<&str, BTreeSet<State>>::new();
            for &state in &*set {
                for t in nfa
                    .get(state)
                    .unwrap_or_else(|| unreachable!("State {state} missing from NFA"))
                {
                    if let Some(label) = &t.label {
                        moves.entry(label.as_str()).or_default().insert(t.target);
                    }
                }
            }

            let edges: BTreeMap<_, _> = moves
                .into_iter()
                .map(|(label, targets)| (label.to_owned(), self.epsilon_close(targets)))
                .collect();

            for next in edges.values() {
                if !trans.contains_key(next) {
                    q.push_back(Composite::clone(next));
                }
            }

            tracing::trace!(?set, ?edges, "Resolved composite state");
            trans.insert(set, edges);
        }

        (start, trans)
    }

    pub fn build(mut self) -> (Dfa, Bijection<Composite, dfa::State>) {
        let (start, comp) = self.composite_trans();

        // Discovery order doubles as the renaming, so the start state is 0
        let rename = |set: &Composite| {
            comp.get_index_of(set)
                .unwrap_or_else(|| unreachable!("Composite state {set:?} never resolved"))
        };

        let trans: BTreeMap<_, BTreeMap<_, _>> = comp
            .iter()
            .enumerate()
            .map(|(id, (_, edges))| {
                let edges = edges.iter().map(|(l, t)| (l.clone(), rename(t))).collect();
                (id, edges)
            })
            .collect();

        let exit = self.nfa.exit();
        let accept: BTreeSet<_> = comp
            .keys()
            .enumerate()
            .filter_map(|(id, set)| set.contains(&exit).then_some(id))
            .collect();

        let dfa = Dfa::new(rename(&start), accept, trans);

        let mut states = Bijection::new();
        for (id, set) in comp.into_keys().enumerate() {
            states
                .insert(set, id)
                .unwrap_or_else(|e| unreachable!("Renaming is not injective: {e}"));
        }

        tracing::debug!(
            nfa_states = self.nfa.len(),
            dfa_states = dfa.len(),
            accept = dfa.accept().len(),
            interned = self.memo.len(),
            "Subset construction finished"
        );

        (dfa, states)
    }
}
