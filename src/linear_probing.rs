//! LinearProbingMap: open addressing over a single flat slot array.
//!
//! Slots move through `Empty -> Occupied -> (Tombstone | Empty)`. Lookups
//! stop at the first `Empty` slot and skip tombstones; inserts reuse the
//! first tombstone on the probe path once the key is known to be absent.
//! A removed slot becomes `Empty` directly (together with the tombstone run
//! before it) when the slot after it is already `Empty`, since no probe
//! sequence can continue through it.

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

#[derive(Debug)]
enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied(Entry<K, V>),
}

fn empty_slots<K, V>(capacity: usize) -> Result<Vec<Slot<K, V>>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| Error::CapacityOverflow)?;
    slots.resize_with(capacity, || Slot::Empty);
    Ok(slots)
}

/// Slot storage plus the bookkeeping the load policy needs.
struct ProbeTable<K, V> {
    slots: Vec<Slot<K, V>>,
    size: usize,
    tombstones: usize,
    params: HashParams,
    policy: LoadPolicy,
    #[cfg(test)]
    rebuilds: usize,
}

impl<K, V> ProbeTable<K, V> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Positions visited from the home slot of `hash`, wrapping once.
    fn probe(&self, hash: u64) -> impl Iterator<Item = usize> {
        let capacity = self.capacity();
        let home = self.params.slot(hash, capacity);
        (0..capacity).map(move |step| (home + step) % capacity)
    }

    fn find<Q>(&self, hash: u64, q: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        for pos in self.probe(hash) {
            match &self.slots[pos] {
                Slot::Empty => return None,
                Slot::Tombstone => {}
                Slot::Occupied(e) => {
                    if e.matches(hash, q) {
                        return Some(pos);
                    }
                }
            }
        }
        None
    }

    fn entry(&self, pos: usize) -> Option<&Entry<K, V>> {
        match &self.slots[pos] {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    fn entry_mut(&mut self, pos: usize) -> Option<&mut Entry<K, V>> {
        match &mut self.slots[pos] {
            Slot::Occupied(e) => Some(e),
            _ => None,
        }
    }

    /// Upsert along the probe path. Used by `put` and by rebuilds.
    fn insert(&mut self, entry: Entry<K, V>) -> Option<V>
    where
        K: Eq,
    {
        let mut vacant = None;
        for pos in self.probe(entry.hash) {
            match &mut self.slots[pos] {
                Slot::Empty => {
                    vacant = vacant.or(Some(pos));
                    break;
                }
                Slot::Tombstone => {
                    vacant = vacant.or(Some(pos));
                }
                Slot::Occupied(e) => {
                    if e.matches(entry.hash, &entry.key) {
                        return Some(mem::replace(&mut e.value, entry.value));
                    }
                }
            }
        }

        let Some(pos) = vacant else {
            panic!(
                "linear probing visited all {} slots without finding a free one",
                self.capacity()
            );
        };
        if matches!(self.slots[pos], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[pos] = Slot::Occupied(entry);
        self.size += 1;
        None
    }

    fn remove<Q>(&mut self, hash: u64, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let pos = self.find(hash, q)?;
        let next = (pos + 1) % self.capacity();
        let chain_ends_here = matches!(self.slots[next], Slot::Empty);
        let replacement = if chain_ends_here {
            Slot::Empty
        } else {
            Slot::Tombstone
        };

        let Slot::Occupied(entry) = mem::replace(&mut self.slots[pos], replacement) else {
            unreachable!("find returned an unoccupied slot");
        };
        self.size -= 1;
        if chain_ends_here {
            self.clear_tombstones_before(pos);
        } else {
            self.tombstones += 1;
        }
        Some(entry.value)
    }

    /// Turns the tombstone run ending just before `pos` back into `Empty`.
    /// `pos` must already be `Empty`.
    fn clear_tombstones_before(&mut self, pos: usize) {
        let capacity = self.capacity();
        let mut cursor = pos;
        for _ in 1..capacity {
            cursor = (cursor + capacity - 1) % capacity;
            if !matches!(self.slots[cursor], Slot::Tombstone) {
                break;
            }
            self.slots[cursor] = Slot::Empty;
            self.tombstones -= 1;
        }
    }

    /// Called after a fresh insertion. Grows when the live entries break the
    /// limit. Once tombstones crowd out empty slots, purges them in place if
    /// the live entries leave headroom, and grows otherwise: a near-full
    /// table would need another purge after a handful of inserts.
    fn rebuild_if_needed(&mut self)
    where
        K: Eq,
    {
        let capacity = self.capacity();
        let used = self.size + self.tombstones;
        let must_grow = self.policy.exceeded(self.size, capacity) || self.size == capacity;
        let crowded = self.policy.exceeded(used, capacity) || used == capacity;
        if must_grow || (crowded && !self.policy.has_headroom(self.size, capacity)) {
            let grown = self.policy.grown(capacity, self.size);
            self.rebuild(grown);
        } else if crowded {
            self.rebuild(capacity);
        }
    }

    fn rebuild(&mut self, capacity: usize)
    where
        K: Eq,
    {
        log::trace!(
            "rebuilding linear probing table: {} -> {capacity} slots, {} entries, {} tombstones",
            self.capacity(),
            self.size,
            self.tombstones,
        );
        let fresh = match empty_slots(capacity) {
            Ok(slots) => slots,
            Err(_) => panic!("cannot allocate {capacity} slots for linear probing table"),
        };
        let old = mem::replace(&mut self.slots, fresh);
        self.size = 0;
        self.tombstones = 0;
        #[cfg(test)]
        {
            self.rebuilds += 1;
        }
        for slot in old {
            if let Slot::Occupied(entry) = slot {
                self.insert(entry);
            }
        }
    }
}

/// Open-addressing hash map with linear probing.
///
/// Uses [`HashSeed::Fixed`] parameters unless the [`MapConfig`] says
/// otherwise, so probe sequences are reproducible from run to run.
pub struct LinearProbingMap<K, V, S = FxBuildHasher> {
    hasher: S,
    table: ProbeTable<K, V>,
    reentrancy: DebugReentrancy,
}

impl<K, V> LinearProbingMap<K, V>
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

impl<K, V, S> LinearProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(config: MapConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        let capacity = config.initial_capacity(mem::size_of::<Slot<K, V>>())?;
        let slots = empty_slots(capacity)?;
        log::debug!(
            "creating linear probing map with {capacity} slots, load factor limit {}",
            config.load_factor()
        );
        Ok(Self {
            hasher,
            table: ProbeTable {
                slots,
                size: 0,
                tombstones: 0,
                params: config.hash_params(HashSeed::Fixed),
                policy: LoadPolicy::new(config.load_factor(), Growth::Double),
                #[cfg(test)]
                rebuilds: 0,
            },
            reentrancy: DebugReentrancy::new(),
        })
    }
}

impl<K, V, S> LinearProbingMap<K, V, S> {
    pub fn hash_params(&self) -> HashParams {
        self.table.params
    }

    /// Slots currently marked deleted.
    pub fn tombstones(&self) -> usize {
        self.table.tombstones
    }

    /// Entries in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            it: self.table.slots.iter(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V, S> Map<K, V> for LinearProbingMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn put(&mut self, key: K, value: V) -> Option<V> {
        let _g = self.reentrancy.enter("put");
        let hash = self.hasher.hash_one(&key);
        let previous = self.table.insert(Entry { key, value, hash });
        if previous.is_none() {
            self.table.rebuild_if_needed();
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
        let pos = self.table.find(hash, key)?;
        self.table.entry(pos).map(|e| &e.value)
    }

    fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _g = self.reentrancy.enter("get_mut");
        let hash = self.hasher.hash_one(key);
        let pos = self.table.find(hash, key)?;
        self.table.entry_mut(pos).map(|e| &mut e.value)
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

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for LinearProbingMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over the live entries of a [`LinearProbingMap`].
pub struct Iter<'a, K, V> {
    it: core::slice::Iter<'a, Slot<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it.find_map(|slot| match slot {
            Slot::Occupied(e) => Some((&e.key, &e.value)),
            _ => None,
        })
    }
}
