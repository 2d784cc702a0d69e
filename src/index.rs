//! Index derivation: maps a key hash to a slot with a universal
//! multiplicative hash `((scale * hash + shift) mod prime) mod capacity`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Modulus used when no other prime is configured.
pub const DEFAULT_HASH_PRIME: u64 = 109_345_121;

/// How a map picks its `scale`/`shift` pair.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HashSeed {
    /// `scale = 1`, `shift = 0`. Probe sequences are reproducible across runs.
    Fixed,
    /// Drawn from the thread-local RNG; differs per map instance.
    Random,
    /// Drawn from an RNG seeded with the given value.
    Seeded(u64),
}

/// Parameters of the multiplicative hash, fixed for the lifetime of a map.
///
/// Slot derivation stays internal to the maps, which never hold an empty
/// table:
///
/// ```compile_fail
/// use prime_hashmap::LinearProbingMap;
///
/// let m = LinearProbingMap::<u8, u8>::new(4, 0.7).unwrap();
/// let _ = m.hash_params().slot(1, 0);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct HashParams {
    prime: u64,
    scale: u64,
    shift: u64,
}

impl HashParams {
    /// Caller guarantees `prime` is prime.
    pub(crate) fn from_seed(seed: HashSeed, prime: u64) -> Self {
        match seed {
            HashSeed::Fixed => Self {
                prime,
                scale: 1,
                shift: 0,
            },
            HashSeed::Random => Self::draw(prime, &mut rand::rng()),
            HashSeed::Seeded(s) => Self::draw(prime, &mut StdRng::seed_from_u64(s)),
        }
    }

    fn draw<R: Rng + ?Sized>(prime: u64, rng: &mut R) -> Self {
        Self {
            prime,
            scale: rng.random_range(1..prime),
            shift: rng.random_range(0..prime),
        }
    }

    pub fn prime(&self) -> u64 {
        self.prime
    }

    pub fn scale(&self) -> u64 {
        self.scale
    }

    pub fn shift(&self) -> u64 {
        self.shift
    }

    /// Slot for `hash` in a table of `capacity` slots. `capacity` must be non-zero.
    #[inline]
    pub(crate) fn slot(&self, hash: u64, capacity: usize) -> usize {
        let mixed = (u128::from(self.scale) * u128::from(hash) + u128::from(self.shift))
            % u128::from(self.prime);
        // Result is < capacity, so it fits back into usize.
        (mixed % capacity as u128) as usize
    }
}
