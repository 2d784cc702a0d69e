// LinearProbingMap behavior visible through the public API.
//
// Collision-heavy cases use a constant hasher so every key shares one
// probe chain; the tombstone cases below would fail with a two-state
// (empty/occupied) slot design.
use prime_hashmap::{HashSeed, LinearProbingMap, Map, MapConfig};
use std::collections::BTreeSet;
use std::hash::{BuildHasher, Hasher};
use test_log::test;

#[derive(Clone, Copy, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    } // force all keys onto the same probe chain
}

fn one_chain(expected: usize) -> LinearProbingMap<String, usize, ConstBuildHasher> {
    LinearProbingMap::with_hasher(MapConfig::new(expected, 0.7), ConstBuildHasher).unwrap()
}

// Test: removal inside a probe chain.
// Verifies: every key inserted after the removed one stays reachable.
#[test]
fn removal_never_hides_later_keys() {
    let mut m = one_chain(16);
    let keys: Vec<String> = (0..10).map(|i| format!("k{i}")).collect();
    for (i, k) in keys.iter().enumerate() {
        m.put(k.clone(), i);
    }

    for victim in [0, 4, 5, 9] {
        assert_eq!(m.remove(keys[victim].as_str()), Some(victim));
    }
    for (i, k) in keys.iter().enumerate() {
        let expected = (![0, 4, 5, 9].contains(&i)).then_some(i);
        assert_eq!(m.get(k.as_str()).copied(), expected, "{k}");
    }
    assert_eq!(m.size(), 6);
}

// Test: removed keys are not resurrected by a later insert of another key
// into their tombstone.
#[test]
fn tombstone_reuse_does_not_resurrect() {
    let mut m = one_chain(8);
    m.put("a".into(), 1);
    m.put("b".into(), 2);
    m.put("c".into(), 3);
    m.remove("b");
    assert_eq!(m.tombstones(), 1);

    m.put("d".into(), 4);
    assert_eq!(m.tombstones(), 0);
    assert!(!m.contains("b"));
    assert_eq!(m.get("c"), Some(&3));
    assert_eq!(m.get("d"), Some(&4));
    assert_eq!(m.size(), 3);
}

// Test: a put/remove churn over a small table.
// Verifies: tombstones never accumulate enough to cross the load limit, and
// the table does not grow when the live count stays small.
#[test]
fn churn_does_not_grow_table() {
    let mut m: LinearProbingMap<u64, u64> = LinearProbingMap::new(8, 0.7).unwrap();
    let capacity = m.capacity();
    for k in 0..10_000u64 {
        m.put(k, k);
        if k >= 3 {
            assert_eq!(m.remove(&(k - 3)), Some(k - 3));
        }
        let used = m.size() + m.tombstones();
        assert!(used as f64 / m.capacity() as f64 <= 0.7);
    }
    assert_eq!(m.size(), 3);
    assert_eq!(m.capacity(), capacity);
}

// Test: remove/put churn with the live count right at the load limit.
// Verifies: the table grows once to make room for tombstones and then stays
// put; contents and the load bound hold throughout.
#[test]
fn churn_at_load_limit_grows_once() {
    let mut m: LinearProbingMap<u64, u64> = LinearProbingMap::new(1000, 0.7).unwrap();
    for k in 0..1000u64 {
        m.put(k, k);
    }
    let mut capacities = vec![m.capacity()];
    for k in 0..2000u64 {
        assert_eq!(m.remove(&k), Some(k));
        m.put(k + 1000, k);
        assert!(m.load_factor() <= m.load_factor_limit());
        if *capacities.last().unwrap() != m.capacity() {
            capacities.push(m.capacity());
        }
    }
    assert!(capacities.len() <= 2, "capacities {capacities:?}");
    assert_eq!(m.size(), 1000);
    for k in 2000..3000u64 {
        assert_eq!(m.get(&k), Some(&(k - 1000)));
    }
}

#[test]
fn load_factor_one_keeps_working() {
    let mut m: LinearProbingMap<u32, u32> = LinearProbingMap::new(3, 1.0).unwrap();
    for k in 0..50 {
        m.put(k, k);
        assert!(m.size() < m.capacity(), "table must keep a free slot");
    }
    for k in 0..50 {
        assert_eq!(m.get(&k), Some(&k));
    }
    assert!(m.get(&50).is_none());
}

#[test]
fn iteration_yields_each_live_entry_once() {
    let mut m: LinearProbingMap<&str, i32> = LinearProbingMap::new(4, 0.7).unwrap();
    for (i, k) in ["k1", "k2", "k3", "k4"].iter().enumerate() {
        m.put(*k, i as i32);
    }
    m.remove("k2");

    let keys: BTreeSet<&str> = m.keys().copied().collect();
    assert_eq!(keys, BTreeSet::from(["k1", "k3", "k4"]));
    let mut values: Vec<i32> = m.values().copied().collect();
    values.sort_unstable();
    assert_eq!(values, vec![0, 2, 3]);
    assert_eq!(m.iter().count(), m.size());
}

#[test]
fn default_parameters_are_fixed() {
    let m: LinearProbingMap<u8, u8> = LinearProbingMap::new(4, 0.7).unwrap();
    let p = m.hash_params();
    assert_eq!((p.scale(), p.shift()), (1, 0));

    let seeded: LinearProbingMap<u8, u8> =
        LinearProbingMap::with_config(MapConfig::new(4, 0.7).seed(HashSeed::Seeded(11))).unwrap();
    let again: LinearProbingMap<u8, u8> =
        LinearProbingMap::with_config(MapConfig::new(4, 0.7).seed(HashSeed::Seeded(11))).unwrap();
    assert_eq!(seeded.hash_params(), again.hash_params());
}

// Test: maps as values.
// Verifies: a value that is itself a map can be mutated through `get_mut`.
#[test]
fn nested_maps_as_values() {
    let mut outer: LinearProbingMap<String, LinearProbingMap<u16, Vec<&str>>> =
        LinearProbingMap::new(4, 0.7).unwrap();
    outer.put("author".into(), LinearProbingMap::new(4, 0.7).unwrap());

    let by_year = outer.get_mut("author").unwrap();
    by_year.put(1999, vec!["first"]);
    by_year.get_mut(&1999).unwrap().push("second");

    let by_year = outer.get("author").unwrap();
    assert_eq!(by_year.get(&1999), Some(&vec!["first", "second"]));
    assert!(by_year.get(&2000).is_none());
}
