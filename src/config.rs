//! Construction-time configuration shared by both map variants.

use crate::error::{Error, Result};
use crate::index::{HashParams, HashSeed, DEFAULT_HASH_PRIME};
use crate::prime::{is_prime, next_prime};

/// Map configuration.
///
/// ```
/// use prime_hashmap::{HashSeed, LinearProbingMap, Map, MapConfig};
///
/// let config = MapConfig::new(1_000, 0.7).seed(HashSeed::Seeded(7));
/// let mut map = LinearProbingMap::with_config(config)?;
/// map.put("k", 1);
/// assert_eq!(map.get("k"), Some(&1));
/// # Ok::<(), prime_hashmap::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MapConfig {
    expected_count: usize,
    load_factor: f64,
    hash_prime: u64,
    seed: Option<HashSeed>,
}

impl MapConfig {
    /// Sizes the table so `expected_count` entries fit under `load_factor`.
    pub fn new(expected_count: usize, load_factor: f64) -> Self {
        Self {
            expected_count,
            load_factor,
            hash_prime: DEFAULT_HASH_PRIME,
            seed: None,
        }
    }

    /// Modulus of the multiplicative hash. Must be prime and at least the
    /// initial capacity. Once the table grows past it, slots at or above the
    /// prime are no longer home to any key and probe chains lengthen.
    #[must_use]
    pub fn hash_prime(mut self, prime: u64) -> Self {
        self.hash_prime = prime;
        self
    }

    /// Overrides the variant's default `scale`/`shift` policy.
    #[must_use]
    pub fn seed(mut self, seed: HashSeed) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.expected_count == 0 {
            return Err(Error::InvalidExpectedCount);
        }
        // Written as a negated range check so NaN is rejected too.
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(Error::InvalidLoadFactor(self.load_factor));
        }
        if usize::try_from(self.hash_prime).map_or(true, |p| !is_prime(p)) {
            return Err(Error::InvalidHashPrime(self.hash_prime));
        }
        Ok(())
    }

    /// `next_prime(ceil(expected_count / load_factor))`, for a table whose
    /// slots are `slot_size` bytes each.
    pub(crate) fn initial_capacity(&self, slot_size: usize) -> Result<usize> {
        // Largest slot count a single allocation can hold.
        let max_slots = isize::MAX as usize / slot_size.max(1);
        let target = (self.expected_count as f64 / self.load_factor).ceil();
        if !target.is_finite() || target >= max_slots as f64 {
            return Err(Error::CapacityOverflow);
        }
        let capacity = next_prime(target as usize);
        if capacity > max_slots {
            return Err(Error::CapacityOverflow);
        }
        if u128::from(self.hash_prime) < capacity as u128 {
            return Err(Error::HashPrimeTooSmall {
                prime: self.hash_prime,
                capacity,
            });
        }
        Ok(capacity)
    }

    pub(crate) fn hash_params(&self, default_seed: HashSeed) -> HashParams {
        HashParams::from_seed(self.seed.unwrap_or(default_seed), self.hash_prime)
    }
}
