//! One-to-one correspondence between two sets of names

use std::{borrow::Borrow, fmt, hash::Hash};

use hashbrown::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum InsertError<L, R> {
    #[error("{new_l:?} ⇔ {r:?} clashes with existing mapping {old_l:?} ⇔ {r:?}")]
    LhsClash { old_l: L, new_l: L, r: R },
    #[error("{l:?} ⇔ {new_r:?} clashes with existing mapping {l:?} ⇔ {old_r:?}")]
    RhsClash { l: L, old_r: R, new_r: R },
}

/// A pair of inverse maps kept in sync
#[derive(Clone)]
pub struct Bijection<L, R> {
    fwd: HashMap<L, R>,
    bck: HashMap<R, L>,
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Bijection<L, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Pair<'a, L, R>(&'a L, &'a R);

        impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Pair<'_, L, R> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Self(l, r) = self;
                write!(f, "{l:?} ⇔ {r:?}")
            }
        }

        f.debug_set()
            .entries(self.fwd.iter().map(|(l, r)| Pair(l, r)))
            .finish()
    }
}

impl<L, R> Default for Bijection<L, R> {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl<L, R> Bijection<L, R> {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            fwd: HashMap::new(),
            bck: HashMap::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize { self.fwd.len() }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool { self.fwd.is_empty() }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&L, &R)> { self.fwd.iter() }
}

impl<L: Eq + Hash, R: Eq + Hash> Bijection<L, R> {
    #[inline]
    pub fn image<Q: Eq + Hash + ?Sized>(&self, l: &Q) -> Option<&R>
    where L: Borrow<Q> {
        self.fwd.get(l)
    }

    #[inline]
    pub fn preimage<Q: Eq + Hash + ?Sized>(&self, r: &Q) -> Option<&L>
    where R: Borrow<Q> {
        self.bck.get(r)
    }
}

impl<L: Clone + Eq + Hash, R: Clone + Eq + Hash> Bijection<L, R> {
    /// Record `l ⇔ r`, returning whether the pair was new
    ///
    /// # Errors
    /// Fails without modifying the bijection if either side is already
    /// paired with something else.
    pub fn insert(&mut self, l: L, r: R) -> Result<bool, InsertError<L, R>> {
        match (self.fwd.get(&l), self.bck.get(&r)) {
            (None, None) => {
                self.fwd.insert(l.clone(), r.clone());
                self.bck.insert(r, l);
                Ok(true)
            },
            (Some(old_r), Some(old_l)) if *old_r == r && *old_l == l => Ok(false),
            (Some(old_r), _) => Err(InsertError::RhsClash {
                old_r: old_r.clone(),
                l,
                new_r: r,
            }),
            (None, Some(old_l)) => Err(InsertError::LhsClash {
                old_l: old_l.clone(),
                new_l: l,
                r,
            }),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{Bijection, InsertError};

    #[test]
    fn insert_and_query() {
        let mut bij = Bijection::new();

        assert!(bij.insert("a", 1).unwrap());
        assert!(bij.insert("b", 2).unwrap());
        assert!(!bij.insert("a", 1).unwrap());

        assert_eq!(bij.image("a"), Some(&1));
        assert_eq!(bij.preimage(&2), Some(&"b"));
        assert_eq!(bij.image("c"), None);
        assert_eq!(bij.len(), 2);
    }

    #[test]
    fn clashes() {
        let mut bij = Bijection::new();
        bij.insert("a", 1).unwrap();

        assert!(matches!(
            bij.insert("a", 2),
            Err(InsertError::RhsClash {
                l: "a",
                old_r: 1,
                new_r: 2
            })
        ));
        assert!(matches!(
            bij.insert("b", 1),
            Err(InsertError::LhsClash {
                old_l: "a",
                new_l: "b",
                r: 1
            })
        ));
        assert_eq!(bij.len(), 1);
    }
}
