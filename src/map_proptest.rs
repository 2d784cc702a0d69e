#![cfg(test)]

// Property tests for both map variants kept inside the crate so the
// collision hashers in `testing` stay private.

use crate::prime::is_prime;
use crate::testing::ConstBuildHasher;
use crate::{HashSeed, LinearProbingMap, Map, MapConfig, SeparateChainingMap};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

// Key newtype with Borrow<str> to exercise borrowed lookup.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
impl std::borrow::Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Iterate,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=32).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => idx.clone().prop_map(OpI::Get),
            1 => prop_oneof![contains_pool, "[a-z]{0,5}"].prop_map(OpI::Contains),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// State-machine equivalence against std::collections::HashMap.
// Invariants checked after every op:
// - `get`/`contains` agree with the model; `put` returns the replaced value.
// - `remove` returns the model's value and a second `remove` is a no-op.
// - `size`/`is_empty` parity, `load_factor() <= load_factor_limit()`,
//   and a prime capacity.
// - Iteration yields exactly the model's key set.
fn run_against_model<M>(
    sut: &mut M,
    pool: &[String],
    ops: Vec<OpI>,
    live_keys: impl Fn(&M) -> Vec<Key>,
) -> Result<(), TestCaseError>
where
    M: Map<Key, i32>,
{
    let mut model: HashMap<Key, i32> = HashMap::new();

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v);
                prop_assert_eq!(prev, model.insert(k, v));
            }
            OpI::Remove(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.remove(&k), model.remove(&k));
                let size = sut.size();
                prop_assert_eq!(sut.remove(&k), None, "second remove must be a no-op");
                prop_assert_eq!(sut.size(), size);
            }
            OpI::Get(i) => {
                let k = key_from(pool, i);
                prop_assert_eq!(sut.get(&k), model.get(&k));
            }
            OpI::Contains(s) => {
                let has_model = model.keys().any(|k| k.0 == s);
                prop_assert_eq!(sut.contains(s.as_str()), has_model);
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                match (sut.get_mut(&k), model.get_mut(&k)) {
                    (Some(v), Some(mv)) => {
                        *v = v.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    }
                    (None, None) => {}
                    (s, m) => prop_assert!(false, "get_mut mismatch: {:?} vs {:?}", s, m),
                }
            }
            OpI::Iterate => {
                let listed = live_keys(sut);
                let unique: BTreeSet<_> = listed.iter().cloned().collect();
                prop_assert_eq!(unique.len(), listed.len(), "iteration repeated a key");
                let m_keys: BTreeSet<_> = model.keys().cloned().collect();
                prop_assert_eq!(unique, m_keys);
            }
        }

        prop_assert_eq!(sut.size(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.load_factor() <= sut.load_factor_limit());
        prop_assert!(is_prime(sut.capacity()));
    }

    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_linear_probing_state_machine(
        (pool, ops) in arb_scenario(),
        expected in 1usize..=8,
        lf in 0.2f64..=1.0,
    ) {
        let mut sut: LinearProbingMap<Key, i32> = LinearProbingMap::new(expected, lf).unwrap();
        run_against_model(&mut sut, &pool, ops, |m| m.keys().cloned().collect())?;
    }

    #[test]
    fn prop_separate_chaining_state_machine(
        (pool, ops) in arb_scenario(),
        expected in 1usize..=8,
        lf in 0.2f64..=1.0,
        seed in any::<u64>(),
    ) {
        let config = MapConfig::new(expected, lf).seed(HashSeed::Seeded(seed));
        let mut sut: SeparateChainingMap<Key, i32> = SeparateChainingMap::with_config(config).unwrap();
        run_against_model(&mut sut, &pool, ops, |m| m.keys().cloned().collect())?;
    }
}

// Same invariants under worst-case collisions: every key shares one probe
// chain (open addressing) or one bucket (chaining), which stresses tombstone
// handling and equality resolution.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

    #[test]
    fn prop_linear_probing_with_collisions(
        (pool, ops) in arb_scenario(),
        lf in 0.2f64..=1.0,
    ) {
        let mut sut: LinearProbingMap<Key, i32, ConstBuildHasher> =
            LinearProbingMap::with_hasher(MapConfig::new(2, lf), ConstBuildHasher).unwrap();
        run_against_model(&mut sut, &pool, ops, |m| m.keys().cloned().collect())?;
    }

    #[test]
    fn prop_separate_chaining_with_collisions(
        (pool, ops) in arb_scenario(),
        lf in 0.2f64..=1.0,
    ) {
        let mut sut: SeparateChainingMap<Key, i32, ConstBuildHasher> =
            SeparateChainingMap::with_hasher(MapConfig::new(2, lf), ConstBuildHasher).unwrap();
        run_against_model(&mut sut, &pool, ops, |m| m.keys().cloned().collect())?;
    }
}

// Inserting enough distinct keys to force repeated growth loses nothing.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]

    #[test]
    fn prop_growth_preserves_contents(n in 20usize..400, lf in 0.3f64..=1.0, seed in any::<u64>()) {
        let config = MapConfig::new(1, lf).seed(HashSeed::Seeded(seed));
        let mut lp: LinearProbingMap<u64, usize> = LinearProbingMap::with_config(config.clone()).unwrap();
        let mut sc: SeparateChainingMap<u64, usize> = SeparateChainingMap::with_config(config).unwrap();
        let (lp_start, sc_start) = (lp.capacity(), sc.capacity());

        for i in 0..n {
            let k = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
            prop_assert_eq!(lp.put(k, i), None);
            prop_assert_eq!(sc.put(k, i), None);
        }

        // Two doublings at minimum from a capacity of at most ceil(1 / 0.3).
        prop_assert!(lp.capacity() > 4 * lp_start);
        prop_assert!(sc.capacity() > 4 * sc_start);
        prop_assert_eq!(lp.size(), n);
        prop_assert_eq!(sc.size(), n);
        for i in 0..n {
            let k = (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
            prop_assert_eq!(lp.get(&k), Some(&i));
            prop_assert_eq!(sc.get(&k), Some(&i));
        }
    }
}
