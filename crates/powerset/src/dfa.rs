//! Deterministic finite automata

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use crate::dot;

pub type State = usize;

/// A deterministic automaton with labelled edges and no epsilon edges
///
/// Every state has an entry in the transition relation, and every edge
/// target is itself a state of the automaton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dfa {
    start: State,
    accept: BTreeSet<State>,
    trans: BTreeMap<State, BTreeMap<String, State>>,
}

impl Dfa {
    pub(crate) fn new(
        start: State,
        accept: BTreeSet<State>,
        trans: BTreeMap<State, BTreeMap<String, State>>,
    ) -> Self {
        debug_assert!(trans.contains_key(&start));
        debug_assert!(accept.iter().all(|s| trans.contains_key(s)));
        debug_assert!(
            trans
                .values()
                .flat_map(BTreeMap::values)
                .all(|t| trans.contains_key(t))
        );

        Self {
            start,
            accept,
            trans,
        }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> State { self.start }

    #[inline]
    #[must_use]
    pub fn accept(&self) -> &BTreeSet<State> { &self.accept }

    #[inline]
    #[must_use]
    pub fn is_accept(&self, state: State) -> bool { self.accept.contains(&state) }

    /// Outgoing edges of the given state, keyed by label
    #[inline]
    #[must_use]
    pub fn get(&self, state: State) -> Option<&BTreeMap<String, State>> { self.trans.get(&state) }

    /// The unique successor of `state` on `label`, if any
    #[inline]
    #[must_use]
    pub fn target(&self, state: State, label: &str) -> Option<State> {
        self.trans.get(&state)?.get(label).copied()
    }

    #[inline]
    pub fn states(&self) -> impl Iterator<Item = State> + '_ { self.trans.keys().copied() }

    /// Number of states
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize { self.trans.len() }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.trans.is_empty() }

    /// Every edge as a `(source, label, target)` triple
    pub fn edges(&self) -> impl Iterator<Item = (State, &str, State)> + '_ {
        self.trans
            .iter()
            .flat_map(|(&s, m)| m.iter().map(move |(l, &t)| (s, l.as_str(), t)))
    }

    /// Every label appearing on some edge
    #[must_use]
    pub fn alphabet(&self) -> BTreeSet<&str> { self.edges().map(|(_, l, _)| l).collect() }

    pub fn dot<'a>(&self, fmt_sym: impl Fn(&str) -> Cow<'a, str>) -> dot::Graph<'a> {
        dot::Graph::state_machine(
            self.trans.iter().map(|(&s, m)| {
                (
                    s,
                    m.iter().map(|(l, &t)| (l.as_str(), t)),
                    self.accept.contains(&s),
                )
            }),
            self.start,
            fmt_sym,
        )
    }
}

impl fmt::Display for Dfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DFA start={}\naccept={{", self.start)?;

        for (i, s) in self.accept.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }

            write!(f, "{s}")?;
        }

        f.write_str("}")
    }
}

#[cfg(test)]
mod test {
    use std::collections::{BTreeMap, BTreeSet};

    use super::Dfa;

    fn ab() -> Dfa {
        // 0 -a-> 1 -b-> 2, 1 -a-> 1
        Dfa::new(
            0,
            BTreeSet::from([2]),
            BTreeMap::from([
                (0, BTreeMap::from([("a".into(), 1)])),
                (1, BTreeMap::from([("a".into(), 1), ("b".into(), 2)])),
                (2, BTreeMap::new()),
            ]),
        )
    }

    #[test]
    fn queries() {
        let dfa = ab();

        assert_eq!(dfa.start(), 0);
        assert!(dfa.is_accept(2));
        assert!(!dfa.is_accept(1));
        assert_eq!(dfa.target(1, "b"), Some(2));
        assert_eq!(dfa.target(0, "b"), None);
        assert_eq!(dfa.target(7, "a"), None);
        assert_eq!(dfa.len(), 3);
        assert_eq!(dfa.alphabet(), BTreeSet::from(["a", "b"]));
    }

    #[test]
    fn edges() {
        let dfa = ab();
        let edges: Vec<_> = dfa.edges().collect();

        assert_eq!(edges, [(0, "a", 1), (1, "a", 1), (1, "b", 2)]);
    }

    #[test]
    fn display() {
        assert_eq!(ab().to_string(), "DFA start=0\naccept={2}");
    }
}
