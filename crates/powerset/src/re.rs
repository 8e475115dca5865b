//! Regular expression syntax trees

use std::{fmt, ops::Deref};

use self::nfa_builder::NfaBuilder;
use crate::nfa::{Nfa, StateIds};

mod nfa_builder;

/// The two n-ary regular expression operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Operator {
    Cat,
    Alt,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Cat => "Concatenation",
            Self::Alt => "Alternation",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{op} needs at least 2 operands, got {got}")]
pub struct ArityError {
    pub op: Operator,
    pub got: usize,
}

/// Operand list of a concatenation or alternation, holding at least two
/// expressions
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Operands(Vec<Regex>);

impl Operands {
    fn new(op: Operator, v: Vec<Regex>) -> Result<Self, ArityError> {
        if v.len() < 2 {
            return Err(ArityError { op, got: v.len() });
        }

        Ok(Self(v))
    }

    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<Regex> { self.0 }
}

impl Deref for Operands {
    type Target = [Regex];

    #[inline]
    fn deref(&self) -> &Self::Target { &self.0 }
}

impl<'a> IntoIterator for &'a Operands {
    type IntoIter = std::slice::Iter<'a, Regex>;
    type Item = &'a Regex;

    #[inline]
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

/// A regular expression over string-valued symbols
///
/// Concatenations and alternations can only be created through
/// [`Regex::cat`] and [`Regex::alt`], which reject fewer than two operands.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Regex {
    /// Exactly one occurrence of the symbol
    Lit(String),
    /// The empty string
    Epsilon,
    Cat(Operands),
    Alt(Operands),
    /// Zero or more repetitions
    Star(Box<Regex>),
}

impl Regex {
    #[inline]
    #[must_use]
    pub fn lit<S: Into<String>>(sym: S) -> Self { Self::Lit(sym.into()) }

    /// Concatenate the given expressions in order
    ///
    /// # Errors
    /// Returns an error if fewer than two expressions are given.
    #[inline]
    pub fn cat<I: IntoIterator<Item = Regex>>(it: I) -> Result<Self, ArityError> {
        Operands::new(Operator::Cat, it.into_iter().collect()).map(Self::Cat)
    }

    /// Match any one of the given expressions
    ///
    /// # Errors
    /// Returns an error if fewer than two expressions are given.
    #[inline]
    pub fn alt<I: IntoIterator<Item = Regex>>(it: I) -> Result<Self, ArityError> {
        Operands::new(Operator::Alt, it.into_iter().collect()).map(Self::Alt)
    }

    #[inline]
    #[must_use]
    pub fn star(self) -> Self { Self::Star(self.into()) }

    /// `self | ε`
    #[inline]
    #[must_use]
    pub fn opt(self) -> Self { Self::Alt(Operands(vec![self, Self::Epsilon])) }

    /// `self self*`
    #[inline]
    #[must_use]
    pub fn plus(self) -> Self { Self::Cat(Operands(vec![self.clone(), self.star()])) }

    /// Run Thompson's construction, drawing state names from `ids`
    #[inline]
    #[must_use]
    pub fn build_nfa(&self, ids: &mut StateIds) -> Nfa { NfaBuilder::new(ids).build(self) }

    /// Run Thompson's construction with a fresh name supply starting at 0
    #[inline]
    #[must_use]
    pub fn compile(&self) -> Nfa { self.build_nfa(&mut StateIds::default()) }

    fn prec(&self) -> u8 {
        match self {
            Self::Alt(_) => 0,
            Self::Cat(_) => 1,
            Self::Star(_) => 2,
            Self::Lit(_) | Self::Epsilon => 3,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        if self.prec() < min {
            f.write_str("(")?;
            self.fmt_prec(f, 0)?;
            return f.write_str(")");
        }

        match self {
            Self::Lit(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if !"|*()ε\"".contains(c) && !c.is_whitespace() => {
                        write!(f, "{c}")
                    },
                    _ => write!(f, "{s:?}"),
                }
            },
            Self::Epsilon => f.write_str("ε"),
            Self::Cat(v) => v.iter().try_for_each(|r| r.fmt_prec(f, 1)),
            Self::Alt(v) => {
                for (i, r) in v.iter().enumerate() {
                    if i != 0 {
                        f.write_str("|")?;
                    }

                    r.fmt_prec(f, 0)?;
                }

                Ok(())
            },
            Self::Star(r) => {
                r.fmt_prec(f, 3)?;
                f.write_str("*")
            },
        }
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.fmt_prec(f, 0) }
}

#[cfg(any(test, feature = "proptest"))]
pub use prop::*;

#[cfg(any(test, feature = "proptest"))]
mod prop {
    use proptest::prelude::*;

    use super::{Operands, Regex};

    pub fn re(
        depth: u32,
        tree_size: u32,
        branch_size: u32,
        sym: impl Strategy<Value = String> + 'static,
    ) -> impl Strategy<Value = Regex> {
        prop_oneof![4 => sym.prop_map(Regex::Lit), 1 => Just(Regex::Epsilon)].prop_recursive(
            depth,
            tree_size,
            branch_size,
            move |s| {
                let size = 2..=(branch_size.max(2) as usize);
                prop_oneof![
                    prop::collection::vec(s.clone(), size.clone())
                        .prop_map(|v| Regex::Alt(Operands(v))),
                    prop::collection::vec(s.clone(), size).prop_map(|v| Regex::Cat(Operands(v))),
                    s.prop_map(Regex::star),
                ]
            },
        )
    }
}

#[cfg(test)]
mod test {
    use super::{ArityError, Operator, Regex};

    fn lit(s: &str) -> Regex { Regex::lit(s) }

    #[test]
    fn alt_arity() {
        assert_eq!(
            Regex::alt([lit("a")]),
            Err(ArityError {
                op: Operator::Alt,
                got: 1
            })
        );
        assert_eq!(
            Regex::alt([]),
            Err(ArityError {
                op: Operator::Alt,
                got: 0
            })
        );
    }

    #[test]
    fn cat_arity() {
        assert_eq!(
            Regex::cat([lit("a")]),
            Err(ArityError {
                op: Operator::Cat,
                got: 1
            })
        );
        assert!(Regex::cat([lit("a"), lit("b")]).is_ok());
    }

    #[test]
    fn arity_message() {
        let err = Regex::alt([lit("a")]).unwrap_err();
        assert_eq!(err.to_string(), "Alternation needs at least 2 operands, got 1");
    }

    #[test]
    fn display() {
        let ab = Regex::alt([lit("a"), lit("b")]).unwrap().star();
        let re = Regex::cat([ab, Regex::cat([lit("a"), lit("b")]).unwrap()]).unwrap();
        assert_eq!(re.to_string(), "(a|b)*ab");

        assert_eq!(lit("digit").plus().to_string(), "\"digit\"\"digit\"*");
        assert_eq!(lit("s").opt().to_string(), "s|ε");
        assert_eq!(lit("*").to_string(), "\"*\"");
        assert_eq!(
            Regex::cat([lit("a"), lit("b")]).unwrap().star().to_string(),
            "(ab)*"
        );
    }

    #[test]
    fn derived_forms() {
        let Regex::Cat(v) = lit("d").plus() else {
            panic!("plus should be a concatenation");
        };
        assert_eq!(&*v, &[lit("d"), lit("d").star()]);

        let Regex::Alt(v) = lit("s").opt() else {
            panic!("opt should be an alternation");
        };
        assert_eq!(&*v, &[lit("s"), Regex::Epsilon]);
    }
}
