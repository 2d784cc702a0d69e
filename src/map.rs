//! The capability set shared by both map variants.

use core::borrow::Borrow;
use core::hash::Hash;

/// Stored key/value pair. `hash` is the raw key hash computed on insertion;
/// slot derivation and resizes always go through it.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) hash: u64,
}

impl<K, V> Entry<K, V> {
    #[inline]
    pub(crate) fn matches<Q>(&self, hash: u64, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.hash == hash && self.key.borrow() == q
    }
}

/// Associative array with upsert semantics and automatic growth.
///
/// Both [`LinearProbingMap`](crate::LinearProbingMap) and
/// [`SeparateChainingMap`](crate::SeparateChainingMap) implement this trait;
/// code written against it works with either collision strategy.
pub trait Map<K, V> {
    /// Inserts or updates `key`. Returns the replaced value, if any.
    ///
    /// May grow the table before returning; afterwards
    /// `load_factor() <= load_factor_limit()` holds.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).is_some()
    }

    /// Removes `key` and returns its value. Absent keys are a no-op.
    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Number of live entries.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of slots; always prime.
    fn capacity(&self) -> usize;

    fn load_factor_limit(&self) -> f64;

    fn load_factor(&self) -> f64 {
        self.size() as f64 / self.capacity() as f64
    }
}
