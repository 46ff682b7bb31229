//! 63-bit multiplicative congruential generator
//!
//! `seed' = seed * A mod M` with `A = 2307085864` and `M = 2^63 - 25`.
//!
//! # Skip-ahead
//!
//! Advancing `k` positions multiplies the state by `A^k mod M`. The factor is
//! assembled by binary exponentiation from a table of `A^(2^i) mod M`,
//! `i = 0..63`, built at compile time by repeated modular squaring.
//!
//! # Reduction
//!
//! Products of two 63-bit residues reach 126 bits. They are reduced without
//! division using `2^63 ≡ 25 (mod M)`: write `p = q * 2^63 + r`, replace `p`
//! by `25q + r`, and repeat until `p < 2^63`.

use serde::{Deserialize, Serialize};

use super::{Random, RandomError};

/// Multiplier
const MULTIPLIER: u64 = 2_307_085_864;

/// Modulus, the largest prime below 2^63
const MODULUS: u64 = (1 << 63) - 25;

const LOW_63: u64 = (1 << 63) - 1;

/// `2^63 mod M`
const FOLD: u128 = 25;

/// `POW_TABLE[i] = A^(2^i) mod M`
const POW_TABLE: [u64; 63] = build_pow_table();

const fn build_pow_table() -> [u64; 63] {
    let mut table = [0u64; 63];
    table[0] = MULTIPLIER;
    let mut i = 1;
    while i < 63 {
        table[i] = mod_multiply(table[i - 1], table[i - 1]);
        i += 1;
    }
    table
}

/// `a * b mod M` for `a, b < 2^63`
///
/// The full product is formed in native `u128`, so the operands are never
/// split into 32-bit halves. Reduction is the `2^63 ≡ 25` fold loop, with no
/// division.
const fn mod_multiply(a: u64, b: u64) -> u64 {
    let mut product = a as u128 * b as u128;
    while product > LOW_63 as u128 {
        let quotient = product >> 63;
        let remainder = product & LOW_63 as u128;
        product = quotient * FOLD + remainder;
    }
    let mut result = product as u64;
    if result >= MODULUS {
        result -= MODULUS;
    }
    result
}

/// Multiplicative congruential generator with closed-form skip-ahead
///
/// The raw sample is the 63-bit state shifted left by one, so it is always
/// even and spans the full signed 64-bit range.
///
/// # Example
/// ```
/// use parallel_prng::{Mcg1Random, Random};
///
/// let mut a = Mcg1Random::new(1).unwrap();
/// let mut b = a.clone();
///
/// for _ in 0..4 {
///     a.raw_next();
/// }
/// assert_eq!(a.raw_next(), b.raw_next_skip(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Mcg1State", try_from = "Mcg1State")]
pub struct Mcg1Random {
    /// Current residue, always in `1..M`
    seed: u64,
}

/// Serialized form of the generator state
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct Mcg1State {
    seed: u64,
}

impl From<Mcg1Random> for Mcg1State {
    fn from(rng: Mcg1Random) -> Self {
        Self { seed: rng.seed }
    }
}

impl TryFrom<Mcg1State> for Mcg1Random {
    type Error = RandomError;

    fn try_from(state: Mcg1State) -> Result<Self, Self::Error> {
        if state.seed == 0 || state.seed >= MODULUS {
            return Err(RandomError::ZeroSeed {
                seed: state.seed as i64,
            });
        }
        Ok(Self { seed: state.seed })
    }
}

impl Mcg1Random {
    /// Create a generator seeded with `seed`
    ///
    /// # Errors
    /// Returns [`RandomError::ZeroSeed`] when the seed reduces to the fixed
    /// point 0 (see [`Random::set_seed`]).
    pub fn new(seed: i64) -> Result<Self, RandomError> {
        let mut rng = Self { seed: 1 };
        rng.set_seed(seed)?;
        Ok(rng)
    }

    fn sample(&self) -> i64 {
        (self.seed << 1) as i64
    }
}

impl Random for Mcg1Random {
    /// Seed from the low 63 bits of `seed`, reduced mod M
    ///
    /// A residue of 0 would repeat forever, so `0`, `i64::MIN`, and any value
    /// whose low 63 bits equal M are rejected. Low 63 bits in `M..2^63`
    /// reduce to the same stream the unreduced value would produce.
    fn set_seed(&mut self, seed: i64) -> Result<(), RandomError> {
        let residue = (seed as u64 & LOW_63) % MODULUS;
        if residue == 0 {
            return Err(RandomError::ZeroSeed { seed });
        }
        self.seed = residue;
        Ok(())
    }

    fn state(&self) -> i64 {
        self.seed as i64
    }

    fn raw_next(&mut self) -> i64 {
        self.seed = mod_multiply(self.seed, MULTIPLIER);
        self.sample()
    }

    fn raw_next_skip(&mut self, skip: i64) -> i64 {
        debug_assert!(skip > 0, "skip must be positive");
        let mut bits = skip as u64 & LOW_63;
        let mut i = 0;
        while bits != 0 {
            if bits & 1 == 1 {
                self.seed = mod_multiply(self.seed, POW_TABLE[i]);
            }
            bits >>= 1;
            i += 1;
        }
        self.sample()
    }
}
