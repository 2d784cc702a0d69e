//! SeparateChainingMap: one growable bucket per slot.
//!
//! Colliding entries share a bucket and are found by a linear scan of it.
//! Removal deletes from the bucket directly, so no tombstones are needed.

use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::index::{HashParams, HashSeed};
use crate::map::{Entry, Map};
use crate::reentrancy::DebugReentrancy;
use crate::resize::{Growth, LoadPolicy};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;
use rustc_hash::FxBuildHasher;

type Bucket<K, V> = Vec<Entry<K, V>>;

fn empty_buckets<K, V>(capacity: usize) -> Result<Vec<Bucket<K, V>>> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| Error::CapacityOverflow)?;
    buckets.resize_with(capacity, Vec::new);
    Ok(buckets)
}

struct ChainTable<K, V> {
    buckets: Vec<Bucket<K, V>>,
    size: usize,
    params: HashParams,
    policy: LoadPolicy,
}

impl<K, V> ChainTable<K, V> {
    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn bucket_index(&self, hash: u64) -> usize {
        self.params.slot(hash, self.capacity())
    }

    /// `(bucket, position in bucket)` of the matching entry.
    fn find<Q>(&self, hash: u64, q: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let b = self.bucket_index(hash);
        self.buckets[b]
            .iter()
            .position(|e| e.matches(hash, q))
            .map(|i| (b, i))
    }

    /// Upsert into the key's bucket. Used by `put` and by rebuilds.
    fn insert(&mut self, entry: Entry<K, V>) -> Option<V>
    where
        K: Eq,
    {
        let b = self.bucket_index(entry.hash);
        let bucket = &mut self.buckets[b];
        if let Some(e) = bucket
            .iter_mut()
            .find(|e| e.matches(entry.hash, &entry.key))
        {
            return Some(mem::replace(&mut e.value, entry.value));
        }
        bucket.push(entry);
        self.size += 1;
        None
    }

    fn remove<Q>(&mut self, hash: u64, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let (b, i) = self.find(hash, q)?;
        // Bucket order carries no meaning.
        let entry = self.buckets[b].swap_remove(i);
        self.size -= 1;
        Some(entry.value)
    }

    fn grow_if_needed(&mut self)
    where
        K: Eq,
    {
        let capacity = self.capacity();
        if self.policy.exceeded(self.size, capacity) {
            let grown = self.policy.grown(capacity, self.size);
            self.rebuild(grown);
        }
    }

    fn rebuild(&mut self, capacity: usize)
    where
        K: Eq,
    {
        log::trace!(
            "rebuilding chained table: {} -> {capacity} buckets, {} entries",
            self.capacity(),
            self.size,
        );
        let fresh = match empty_buckets(capacity) {
            Ok(buckets) => buckets,
            Err(_) => panic!("cannot allocate {capacity} buckets for chained table"),
        };
        let old = mem::replace(&mut self.buckets, fresh);
        self.size = 0;
        for entry in old.into_iter().flatten() {
            self.insert(entry);
        }
    }
}

/// Hash map resolving collisions by separate chaining.
///
/// Draws random [`HashSeed::Random`] parameters per instance unless the
/// [`MapConfig`] says otherwise.
pub struct SeparateChainingMap<K, V, S = FxBuildHasher> {
    hasher: S,
    table: ChainTable<K, V>,
    reentrancy: DebugReentrancy,
}

impl<K, V> SeparateChainingMap<K, V>
where
    K: Eq + Hash,
{
    /// Creates a map sized for `expected_count` entries under `load_factor`.
    pub fn new(expected_count: usize, load_factor: f64) -> Result<Self> {
        Self::with_config(MapConfig::new(expected_count, load_factor))
    }

    pub fn with_config(config: MapConfig) -> Result<Self> {
        Self::with_hasher(config, FxBuildHasher)
    }
}

impl<K, V, S> SeparateChainingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(config: MapConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        let capacity = config.initial_capacity(mem::size_of::<Bucket<K, V>>())?;
        let buckets = empty_buckets(capacity)?;
        let params = config.hash_params(HashSeed::Random);
        log::debug!(
            "creating chained map with {capacity} buckets, load factor limit {}, {params:?}",
            config.load_factor()
        );
        Ok(Self {
            hasher,
            table: ChainTable {
                buckets,
                size: 0,
                params,
                policy: LoadPolicy::new(config.load_factor(), Growth::DoublePlusOne),
            },
            reentrancy: DebugReentrancy::new(),
        })
    }
}

impl<K, V, S> SeparateChainingMap<K, V, S> {
    pub fn hash_params(&self) -> HashParams {
        self.table.params
    }

    /// Length of the longest bucket.
    pub fn longest_chain(&self) -> usize {
        self.table.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Entries in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.table.buckets.iter().flatten(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> Map<K, V> for SeparateChainingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter("put");
        let hash = self.hasher.hash_one(&key);
        let previous = self.table.insert(Entry { key, value, hash });
        if previous.is_none() {
            self.table.grow_if_needed();
        }
        previous
    }

    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("get");
        let hash = self.hasher.hash_one(key);
        let (b, i) = self.table.find(hash, key)?;
        Some(&self.table.buckets[b][i].value)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("get_mut");
        let hash = self.hasher.hash_one(key);
        let (b, i) = self.table.find(hash, key)?;
        Some(&mut self.table.buckets[b][i].value)
    }

    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("contains");
        let hash = self.hasher.hash_one(key);
        self.table.find(hash, key).is_some()
    }

    fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("remove");
        let hash = self.hasher.hash_one(key);
        self.table.remove(hash, key)
    }

    fn size(&self) -> usize {
        self.table.size
    }

    fn capacity(&self) -> usize {
        self.table.capacity()
    }

    fn load_factor_limit(&self) -> f64 {
        self.table.policy.limit()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for SeparateChainingMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the entries of a [`SeparateChainingMap`].
pub struct Iter<'a, K, V> {
    it: core::iter::Flatten<core::slice::Iter<'a, Bucket<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.next().map(|e| (&e.key, &e.value))
    }
}
