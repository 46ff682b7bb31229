//! Hash-based counter generator
//!
//! The state is a 64-bit counter. Each step increments the counter and emits
//! a fixed mixing hash of it, so skipping ahead `k` positions is a single
//! addition.

use serde::{Deserialize, Serialize};

use super::{Random, RandomError};

/// Counter-mode generator emitting `hash(counter)`
///
/// Any 64-bit seed is legal. Skip-ahead costs the same as one step.
///
/// # Example
/// ```
/// use parallel_prng::{DefaultRandom, Random};
///
/// let mut a = DefaultRandom::new(42);
/// let mut b = a.clone();
///
/// for _ in 0..999 {
///     a.raw_next();
/// }
/// assert_eq!(a.raw_next(), b.raw_next_skip(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultRandom {
    /// Counter, advanced by one per step (wrapping)
    counter: u64,
}

impl DefaultRandom {
    /// Create a generator seeded with `seed`
    pub fn new(seed: i64) -> Self {
        Self {
            counter: hash(seed as u64),
        }
    }
}

impl Random for DefaultRandom {
    fn set_seed(&mut self, seed: i64) -> Result<(), RandomError> {
        self.counter = hash(seed as u64);
        Ok(())
    }

    fn state(&self) -> i64 {
        self.counter as i64
    }

    fn raw_next(&mut self) -> i64 {
        self.counter = self.counter.wrapping_add(1);
        hash(self.counter) as i64
    }

    fn raw_next_skip(&mut self, skip: i64) -> i64 {
        debug_assert!(skip > 0, "skip must be positive");
        self.counter = self.counter.wrapping_add(skip as u64);
        hash(self.counter) as i64
    }
}

/// 64-bit mixing function
///
/// All arithmetic wraps mod 2^64 and every right shift is logical.
pub(crate) fn hash(mut x: u64) -> u64 {
    x = x
        .wrapping_mul(3_935_559_000_370_003_845)
        .wrapping_add(2_691_343_689_449_507_681);
    x ^= x >> 21;
    x ^= x << 37;
    x ^= x >> 4;
    x = x.wrapping_mul(4_768_777_513_237_032_717);
    x ^= x << 20;
    x ^= x >> 41;
    x ^= x << 5;
    x
}
