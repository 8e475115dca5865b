use std::collections::BTreeMap;

use super::Regex;
use crate::nfa::{Nfa, State, StateIds, Transition};

/// The entry and exit of a partially built automaton
#[derive(Debug, Clone, Copy)]
struct Fragment {
    start: State,
    exit: State,
}

/// Deferred work for the explicit-stack traversal
enum Task<'a> {
    Build(&'a Regex),
    /// Join the last `n` built fragments in sequence
    Cat(usize),
    /// Join the last `n` built fragments in parallel between these endpoints
    Alt(usize, State, State),
    Star,
}

/// Thompson's construction over a single transition relation shared by every
/// fragment, so each node costs the same regardless of how much has already
/// been built
pub struct NfaBuilder<'a> {
    ids: &'a mut StateIds,
    trans: BTreeMap<State, Vec<Transition>>,
    built: Vec<Fragment>,
}

impl<'a> NfaBuilder<'a> {
    #[inline]
    pub fn new(ids: &'a mut StateIds) -> Self {
        Self {
            ids,
            trans: BTreeMap::new(),
            built: vec![],
        }
    }

    /// Allocate a state and register it with no outgoing edges, keeping the
    /// relation total at every step
    fn state(&mut self) -> State {
        let state = self.ids.fresh();
        let prev = self.trans.insert(state, vec![]);
        debug_assert!(prev.is_none(), "State {state} allocated twice");
        state
    }

    fn fragment(&mut self) -> Fragment {
        let start = self.state();
        let exit = self.state();
        Fragment { start, exit }
    }

    #[inline]
    fn connect(&mut self, from: State, label: Option<&str>, to: State) {
        debug_assert!(self.trans.contains_key(&to));
        self.trans
            .get_mut(&from)
            .unwrap_or_else(|| unreachable!("Edge from unregistered state {from}"))
            .push(Transition {
                label: label.map(Into::into),
                target: to,
            });
    }

    fn take(&mut self, n: usize) -> Vec<Fragment> {
        let at = self
            .built
            .len()
            .checked_sub(n)
            .unwrap_or_else(|| unreachable!("Fragment stack underflow"));
        self.built.split_off(at)
    }

    pub fn build(mut self, regex: &Regex) -> Nfa {
        let mut tasks = vec![Task::Build(regex)];

        while let Some(task) = tasks.pop() {
            match task {
                Task::Build(Regex::Lit(sym)) => {
                    let frag = self.fragment();
                    self.connect(frag.start, Some(sym.as_str()), frag.exit);
                    self.built.push(frag);
                },
                Task::Build(Regex::Epsilon) => {
                    let frag = self.fragment();
                    self.connect(frag.start, None, frag.exit);
                    self.built.push(frag);
                },
                Task::Build(Regex::Cat(v)) => {
                    tasks.push(Task::Cat(v.len()));
                    tasks.extend(v.iter().rev().map(Task::Build));
                },
                Task::Build(Regex::Alt(v)) => {
                    let start = self.state();
                    let exit = self.state();
                    tasks.push(Task::Alt(v.len(), start, exit));
                    tasks.extend(v.iter().rev().map(Task::Build));
                },
                Task::Build(Regex::Star(r)) => {
                    tasks.push(Task::Star);
                    tasks.push(Task::Build(r));
                },
                Task::Cat(n) => {
                    let parts = self.take(n);
                    let (Some(&first), Some(&last)) = (parts.first(), parts.last()) else {
                        unreachable!("Empty concatenation");
                    };

                    for pair in parts.windows(2) {
                        self.connect(pair[0].exit, None, pair[1].start);
                    }

                    self.built.push(Fragment {
                        start: first.start,
                        exit: last.exit,
                    });
                },
                Task::Alt(n, start, exit) => {
                    for part in self.take(n) {
                        self.connect(start, None, part.start);
                        self.connect(part.exit, None, exit);
                    }

                    self.built.push(Fragment { start, exit });
                },
                Task::Star => {
                    let inner = self.take(1)[0];
                    let state = self.state();
                    self.connect(state, None, inner.start);
                    self.connect(inner.exit, None, state);

                    self.built.push(Fragment {
                        start: state,
                        exit: state,
                    });
                },
            }
        }

        let frag = self.built.pop().unwrap_or_else(|| unreachable!());
        debug_assert!(self.built.is_empty());

        let nfa = Nfa::from_parts(frag.start, frag.exit, self.trans);
        tracing::debug!(
            start = nfa.start(),
            exit = nfa.exit(),
            states = nfa.len(),
            "Built NFA"
        );
        nfa
    }
}
