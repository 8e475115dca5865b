//! Regular expressions to deterministic automata, via Thompson's
//! construction and the subset construction
//!
//! ```
//! use powerset::re::Regex;
//!
//! let ab = Regex::alt([Regex::lit("a"), Regex::lit("b")])?.star();
//! let re = Regex::cat([ab, Regex::lit("a"), Regex::lit("b")])?;
//!
//! let nfa = re.compile();
//! let dfa = nfa.compile();
//! assert_eq!(dfa.start(), 0);
//! assert!(!dfa.is_accept(dfa.start()));
//! # Ok::<_, powerset::re::ArityError>(())
//! ```

#![deny(
    clippy::disallowed_methods,
    clippy::suspicious,
    clippy::style,
    clippy::clone_on_ref_ptr,
    missing_debug_implementations,
    missing_copy_implementations
)]
#![warn(clippy::pedantic, missing_docs)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // TODO

pub mod bijection;
mod closure;
pub mod dfa;
pub mod dot;
pub mod free;
mod memoize;
pub mod nfa;
pub mod re;

#[cfg(test)]
mod test_tools;
