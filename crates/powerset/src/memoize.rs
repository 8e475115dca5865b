use std::{hash::Hash, sync::Arc};

use hashbrown::HashSet;

/// Interner handing out one shared allocation per distinct value
#[derive(Debug)]
pub struct Memoize<T>(HashSet<Arc<T>>);

impl<T> Default for Memoize<T> {
    fn default() -> Self { Self(HashSet::new()) }
}

impl<T: Eq + Hash> Memoize<T> {
    pub fn memoize(&mut self, val: T) -> Arc<T> {
        if let Some(arc) = self.0.get(&val) {
            return Arc::clone(arc);
        }

        let arc = Arc::new(val);
        self.0.insert(Arc::clone(&arc));
        arc
    }

    #[inline]
    pub fn len(&self) -> usize { self.0.len() }
}
