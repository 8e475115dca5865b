use std::collections::{BTreeSet, VecDeque};

/// Worklist for computing the closure of a set under some successor relation
///
/// The queue is kept between solves so repeated closures (as in the subset
/// construction) reuse one allocation.
#[derive(Debug)]
pub struct Closure<T>(VecDeque<T>);

impl<T> Default for Closure<T> {
    #[inline]
    fn default() -> Self { Self(VecDeque::new()) }
}

impl<T> Closure<T> {
    /// Seed the worklist.  Must not be called while a previous closure is
    /// still unsolved.
    #[inline]
    pub fn init<I: IntoIterator<Item = T>>(&mut self, it: I) {
        assert!(self.0.is_empty());
        self.0.extend(it);
    }
}

impl<T: Clone + Ord> Closure<T> {
    /// Drain the worklist into `set`, enqueueing the successors of every
    /// element not already present.  Terminates once no new elements appear.
    pub fn solve<I: IntoIterator<Item = T>>(
        &mut self,
        set: &mut BTreeSet<T>,
        mut succ: impl FnMut(T) -> I,
    ) {
        while let Some(el) = self.0.pop_front() {
            if set.insert(el.clone()) {
                self.0.extend(succ(el));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeSet;

    use super::Closure;

    #[test]
    fn reaches_fixpoint() {
        // i -> 2i mod 10
        let mut closure = Closure::default();
        let mut set = BTreeSet::new();

        closure.init([1_u32]);
        closure.solve(&mut set, |i| [(i * 2) % 10]);

        assert_eq!(set, BTreeSet::from([1, 2, 4, 6, 8]));
    }

    #[test]
    fn reusable() {
        let mut closure = Closure::default();

        let mut a = BTreeSet::new();
        closure.init([3_u32]);
        closure.solve(&mut a, |i| i.checked_sub(1));

        let mut b = BTreeSet::new();
        closure.init([7_u32, 8]);
        closure.solve(&mut b, |_| None);

        assert_eq!(a, BTreeSet::from([0, 1, 2, 3]));
        assert_eq!(b, BTreeSet::from([7, 8]));
    }
}
