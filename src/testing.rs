#![cfg(test)]

// Hashers that pin down slot placement in unit and property tests.

use core::hash::{BuildHasher, Hasher};

/// Every key hashes to 0, so all keys share one probe chain or bucket.
#[derive(Clone, Copy, Default)]
pub(crate) struct ConstBuildHasher;
pub(crate) struct ConstHasher;

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
    }
}

/// Integer keys hash to themselves; with fixed parameters key `k` has home
/// slot `k % capacity`.
#[derive(Clone, Copy, Default)]
pub(crate) struct IdentityBuildHasher;
#[derive(Default)]
pub(crate) struct IdentityHasher(u64);

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher::default()
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}
