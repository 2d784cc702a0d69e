//! prime-hashmap: two single-threaded hash maps with prime capacities,
//! one resolving collisions by linear probing and one by separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a general-purpose in-memory index whose values are opaque to the
//!   map, so a value may itself be another map or a list.
//! - Layers:
//!   - `prime`: trial-division prime oracle that sizes every table.
//!   - `index`: universal multiplicative hashing,
//!     `((scale * hash + shift) mod prime) mod capacity`.
//!   - `resize`: load-factor policy; decides when to grow and to which
//!     prime capacity.
//!   - `LinearProbingMap` / `SeparateChainingMap`: the two collision
//!     strategies, both implementing the `Map` trait.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` via the reentrancy guard's marker.
//! - `capacity` is always prime; `size / capacity <= load_factor_limit`
//!   after every `put`.
//! - Keys are unique: `put` on a present key replaces its value in place.
//! - Resizes rebuild the table from scratch by reinserting every live entry
//!   through the same routine `put` uses.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its raw `u64` key hash. Slot derivation, including
//!   during resizes, always uses the stored hash; `K: Hash` is never invoked
//!   after insertion.
//! - The default `BuildHasher` is `rustc_hash::FxBuildHasher`, which is
//!   deterministic. Randomization, when wanted, comes from the per-map
//!   `scale`/`shift` pair (see [`HashSeed`]).
//!
//! Open addressing and deletion
//! - Slots are `Empty`, `Tombstone` or `Occupied`. A plain two-state slot
//!   would let a removal cut a probe chain and hide every key inserted
//!   after it; tombstones keep such keys reachable.
//! - Tombstones count toward occupancy. When live entries plus tombstones
//!   cross the limit, the table is rebuilt. It stays at the same capacity
//!   only if live entries use at most half of what the limit allows, so a
//!   purge always frees room for many inserts.
//!
//! Reentrancy policy
//! - Every public map operation enters a debug-only guard. User code runs
//!   only through `K: Eq`/`K: Hash` while probing; calling back into the
//!   same map from there panics in debug builds.
//!
//! Notes and non-goals
//! - No persistence, no concurrent access, no ordered iteration.
//! - The hash is not meant to resist adversarial inputs beyond what the
//!   random `scale`/`shift` pair provides.

mod config;
mod error;
mod index;
pub mod linear_probing;
mod map;
mod map_proptest;
pub mod prime;
mod reentrancy;
mod resize;
pub mod separate_chaining;
mod testing;

// Public surface
pub use config::MapConfig;
pub use error::{Error, Result};
pub use index::{HashParams, HashSeed, DEFAULT_HASH_PRIME};
pub use linear_probing::LinearProbingMap;
pub use map::Map;
pub use separate_chaining::SeparateChainingMap;
