/// Errors raised while constructing a map.
///
/// Lookups never fail: an absent key is reported as `None`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// Expected element count was zero
    InvalidExpectedCount,

    /// Load factor outside `(0, 1]`
    InvalidLoadFactor(f64),

    /// Configured hash modulus is not prime
    InvalidHashPrime(u64),

    /// Configured hash modulus is smaller than the initial capacity
    HashPrimeTooSmall { prime: u64, capacity: usize },

    /// The initial slot array would not fit in a single allocation
    CapacityOverflow,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidExpectedCount => write!(f, "expected element count must be positive"),
            Self::InvalidLoadFactor(lf) => {
                write!(f, "load factor must be in (0, 1], got {lf}")
            }
            Self::InvalidHashPrime(p) => write!(f, "hash prime {p} is not a prime number"),
            Self::HashPrimeTooSmall { prime, capacity } => {
                write!(f, "hash prime {prime} is smaller than the initial capacity {capacity}")
            }
            Self::CapacityOverflow => write!(f, "initial capacity cannot be allocated"),
        }
    }
}

impl std::error::Error for Error {}

/// Map construction result
pub type Result<T> = std::result::Result<T, Error>;
