//! Sources of fresh names

use std::mem;

/// Integer types usable as names
pub trait Succ: Copy {
    /// The following name, or `None` once the type is exhausted
    fn checked_succ(self) -> Option<Self>;
}

macro_rules! succ {
    ($($ty:ty),* $(,)?) => {
        $(impl Succ for $ty {
            #[inline]
            fn checked_succ(self) -> Option<Self> { self.checked_add(1) }
        })*
    };
}

succ!(u16, u32, u64, usize);

/// A strictly increasing supply of names, starting from the value it was
/// created with.
///
/// A `Free` is never global: whoever needs names owns one and threads it by
/// mutable reference through everything that allocates, so two independent
/// supplies can only collide if they were deliberately seeded to overlap.
#[derive(Debug, Default)]
#[repr(transparent)]
pub struct Free<T>(T);

impl<T> From<T> for Free<T> {
    fn from(origin: T) -> Self { Self(origin) }
}

impl<T> Free<T> {
    /// The next name [`fresh`](Self::fresh) will hand out
    #[inline]
    pub fn peek(&self) -> &T { &self.0 }
}

impl<T: Succ + std::fmt::Debug> Free<T> {
    /// Hand out the next name
    ///
    /// # Panics
    /// Panics if the name type has no successor left.
    #[must_use]
    pub fn fresh(&mut self) -> T {
        let next = self
            .0
            .checked_succ()
            .unwrap_or_else(|| panic!("Name supply exhausted after {:?}", self.0));
        mem::replace(&mut self.0, next)
    }
}

#[cfg(test)]
mod test {
    use super::Free;

    #[test]
    fn strictly_increasing() {
        let mut free = Free::<u64>::default();
        let ids: Vec<_> = (0..5).map(|_| free.fresh()).collect();

        assert_eq!(ids, [0, 1, 2, 3, 4]);
        assert_eq!(*free.peek(), 5);
    }

    #[test]
    fn explicit_origin() {
        let mut free = Free::from(100_u64);

        assert_eq!(free.fresh(), 100);
        assert_eq!(free.fresh(), 101);
    }

    #[test]
    fn independent_sources() {
        let mut a = Free::<u64>::default();
        let mut b = Free::<u64>::default();

        assert_eq!(a.fresh(), 0);
        assert_eq!(a.fresh(), 1);
        assert_eq!(b.fresh(), 0);
    }

    #[test]
    #[should_panic = "Name supply exhausted"]
    fn exhausted() {
        let mut free = Free::from(u16::MAX);
        let _ = free.fresh();
    }
}
