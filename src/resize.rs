//! Load-factor policy shared by both map variants.

use crate::prime::next_prime;

/// How the capacity steps up before rounding to the next prime.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Growth {
    /// `next_prime(2 * capacity)`
    Double,
    /// `next_prime(2 * capacity + 1)`
    DoublePlusOne,
}

impl Growth {
    fn step(self, capacity: usize) -> usize {
        let doubled = capacity.saturating_mul(2);
        match self {
            Growth::Double => doubled,
            Growth::DoublePlusOne => doubled.saturating_add(1),
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct LoadPolicy {
    limit: f64,
    growth: Growth,
}

impl LoadPolicy {
    pub(crate) fn new(limit: f64, growth: Growth) -> Self {
        Self { limit, growth }
    }

    pub(crate) fn limit(&self) -> f64 {
        self.limit
    }

    /// True when `occupied / capacity` is above the limit.
    #[inline]
    pub(crate) fn exceeded(&self, occupied: usize, capacity: usize) -> bool {
        occupied as f64 / capacity as f64 > self.limit
    }

    /// True when `size` live entries fill at most half of what the limit
    /// allows, so an in-place rebuild frees a meaningful share of the table.
    #[inline]
    pub(crate) fn has_headroom(&self, size: usize, capacity: usize) -> bool {
        size as f64 <= self.limit * capacity as f64 / 2.0
    }

    /// Prime capacity strictly above `capacity` that holds `size` entries
    /// within the limit.
    pub(crate) fn grown(&self, capacity: usize, size: usize) -> usize {
        let mut next = next_prime(self.growth.step(capacity));
        while self.exceeded(size, next) {
            next = next_prime(self.growth.step(next));
        }
        next
    }
}
