//! Nondeterministic finite automata with a single accepting state

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet},
    fmt,
    sync::Arc,
};

use self::dfa_builder::DfaBuilder;
use crate::{bijection::Bijection, closure::Closure, dfa::Dfa, dot, free::Free};

mod dfa_builder;

pub type State = u64;

/// Supply of NFA state names for a single construction
pub type StateIds = Free<State>;

/// A set of NFA states standing in for one DFA state during the subset
/// construction
pub type Composite = Arc<BTreeSet<State>>;

/// An outgoing edge; a label of `None` is an epsilon edge
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    pub label: Option<String>,
    pub target: State,
}

impl Transition {
    #[inline]
    #[must_use]
    pub fn epsilon(target: State) -> Self {
        Self {
            label: None,
            target,
        }
    }

    #[inline]
    #[must_use]
    pub fn symbol<S: Into<String>>(sym: S, target: State) -> Self {
        Self {
            label: Some(sym.into()),
            target,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_epsilon(&self) -> bool { self.label.is_none() }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { label, target } = self;
        write!(f, "-{}-> {target}", label.as_deref().unwrap_or("ϵ"))
    }
}

/// A nondeterministic automaton whose only accepting state is its exit
///
/// Every state that appears anywhere in the automaton, as a source or as a
/// target, has an entry in the transition relation (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    start: State,
    exit: State,
    trans: BTreeMap<State, Vec<Transition>>,
}

impl Nfa {
    pub(crate) fn from_parts(
        start: State,
        exit: State,
        trans: BTreeMap<State, Vec<Transition>>,
    ) -> Self {
        debug_assert!(trans.contains_key(&start) && trans.contains_key(&exit));
        debug_assert!(
            trans
                .values()
                .flatten()
                .all(|t| trans.contains_key(&t.target))
        );

        Self { start, exit, trans }
    }

    #[inline]
    #[must_use]
    pub fn start(&self) -> State { self.start }

    #[inline]
    #[must_use]
    pub fn exit(&self) -> State { self.exit }

    /// Outgoing edges of the given state, or `None` if it does not belong to
    /// this automaton
    #[inline]
    #[must_use]
    pub fn get(&self, state: State) -> Option<&[Transition]> {
        self.trans.get(&state).map(Vec::as_slice)
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
    pub fn edges(&self) -> impl Iterator<Item = (State, Option<&str>, State)> + '_ {
        self.trans
            .iter()
            .flat_map(|(&s, v)| v.iter().map(move |t| (s, t.label.as_deref(), t.target)))
    }

    pub(crate) fn epsilon_targets(&self, state: State) -> impl Iterator<Item = State> + '_ {
        self.trans
            .get(&state)
            .unwrap_or_else(|| panic!("State {state} does not belong to this NFA"))
            .iter()
            .filter(|t| t.is_epsilon())
            .map(|t| t.target)
    }

    /// The smallest superset of `seed` closed under epsilon edges
    ///
    /// # Panics
    /// Panics if `seed` contains a state not belonging to this automaton.
    #[must_use]
    pub fn epsilon_closure<I: IntoIterator<Item = State>>(&self, seed: I) -> BTreeSet<State> {
        let mut closure = Closure::default();
        let mut set = BTreeSet::new();
        closure.init(seed);
        closure.solve(&mut set, |s| self.epsilon_targets(s));
        set
    }

    /// Convert to an equivalent DFA via the subset construction
    #[inline]
    #[must_use]
    pub fn compile(&self) -> Dfa { self.compile_with_states().0 }

    /// Like [`compile`](Self::compile), but also return the assignment of
    /// DFA states to the sets of NFA states they were built from
    #[inline]
    #[must_use]
    pub fn compile_with_states(&self) -> (Dfa, Bijection<Composite, crate::dfa::State>) {
        DfaBuilder::new(self).build()
    }

    pub fn dot<'a>(&self, fmt_sym: impl Fn(&str) -> Cow<'a, str>) -> dot::Graph<'a> {
        dot::Graph::state_machine(
            self.trans.iter().map(|(&s, v)| {
                (
                    s,
                    v.iter().map(|t| (t.label.as_deref(), t.target)),
                    s == self.exit,
                )
            }),
            self.start,
            |l| l.map_or_else(|| "ϵ".into(), &fmt_sym),
        )
    }
}

impl fmt::Display for Nfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NFA start={} exit={}", self.start, self.exit)
    }
}
