//! Reference simulations of both automata, used as test oracles

use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::{
    dfa::{self, Dfa},
    nfa::{self, Nfa},
    re::Regex,
};

pub fn symbol() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c"]).prop_map(|s| s.to_owned())
}

pub fn input() -> impl Strategy<Value = String> { "[abc]{0,6}" }

/// Every state reachable from `from` along any edges
pub fn reachable(nfa: &Nfa, from: nfa::State) -> BTreeSet<nfa::State> {
    let mut seen = BTreeSet::new();
    let mut stack = vec![from];

    while let Some(s) = stack.pop() {
        if seen.insert(s) {
            stack.extend(nfa.get(s).unwrap().iter().map(|t| t.target));
        }
    }

    seen
}

fn eps_closure(nfa: &Nfa, mut set: BTreeSet<nfa::State>) -> BTreeSet<nfa::State> {
    loop {
        let next: BTreeSet<_> = set
            .iter()
            .flat_map(|&s| nfa.get(s).unwrap())
            .filter(|t| t.label.is_none())
            .map(|t| t.target)
            .collect();

        let len = set.len();
        set.extend(next);
        if set.len() == len {
            break set;
        }
    }
}

pub fn run_nfa<'a>(nfa: &Nfa, input: impl IntoIterator<Item = &'a str>) -> bool {
    let mut curr = eps_closure(nfa, [nfa.start()].into());

    for sym in input {
        let next = curr
            .iter()
            .flat_map(|&s| nfa.get(s).unwrap())
            .filter(|t| t.label.as_deref() == Some(sym))
            .map(|t| t.target)
            .collect();
        curr = eps_closure(nfa, next);
    }

    curr.contains(&nfa.exit())
}

pub fn run_dfa<'a>(dfa: &Dfa, input: impl IntoIterator<Item = &'a str>) -> bool {
    let mut state: dfa::State = dfa.start();

    for sym in input {
        match dfa.target(state, sym) {
            Some(next) => state = next,
            None => return false,
        }
    }

    dfa.is_accept(state)
}

fn chars(s: &str) -> impl Iterator<Item = &str> {
    s.char_indices().map(|(i, c)| &s[i..i + c.len_utf8()])
}

/// Run the NFA treating each character of `s` as one symbol
pub fn accepts_nfa(nfa: &Nfa, s: &str) -> bool { run_nfa(nfa, chars(s)) }

/// Run the DFA treating each character of `s` as one symbol
pub fn accepts_dfa(dfa: &Dfa, s: &str) -> bool { run_dfa(dfa, chars(s)) }

/// Positions in `input` where a match of `re` starting at one of `from` can
/// end, computed from the denotation of the expression alone
fn match_ends(re: &Regex, input: &[&str], from: BTreeSet<usize>) -> BTreeSet<usize> {
    match re {
        Regex::Lit(sym) => from
            .into_iter()
            .filter(|&i| input.get(i) == Some(&sym.as_str()))
            .map(|i| i + 1)
            .collect(),
        Regex::Epsilon => from,
        Regex::Cat(v) => v.iter().fold(from, |at, r| match_ends(r, input, at)),
        Regex::Alt(v) => v
            .iter()
            .flat_map(|r| match_ends(r, input, from.clone()))
            .collect(),
        Regex::Star(r) => {
            let mut seen = from.clone();
            let mut frontier = from;

            while !frontier.is_empty() {
                frontier = match_ends(r, input, frontier)
                    .into_iter()
                    .filter(|&i| seen.insert(i))
                    .collect();
            }

            seen
        },
    }
}

/// Match the expression against `s` with each character as one symbol,
/// without building any automaton
pub fn accepts_re(re: &Regex, s: &str) -> bool {
    let input: Vec<_> = chars(s).collect();
    match_ends(re, &input, [0].into()).contains(&input.len())
}
