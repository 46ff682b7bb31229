//! Parallel-safe pseudorandom number generation
//!
//! Every generator implements [`Random`], which asks an algorithm for two
//! primitives only:
//!
//! - [`Random::raw_next`]: advance one position and return the raw sample
//! - [`Random::raw_next_skip`]: advance `skip` positions in closed form and
//!   return the sample the last of those steps would have produced
//!
//! Booleans, ints, floats, and doubles are derived from the raw sample once,
//! here, for every algorithm.
//!
//! # Parallel use
//!
//! A generator is plain owned state with no interior locking. Parallel
//! workers each own a generator, either seeded independently or seeded
//! identically and advanced by disjoint skip offsets (see [`split`]).
//!
//! # Determinism
//!
//! Same algorithm + same seed → same sequence, on every platform.

mod default;
pub mod factory;
mod mcg1;
pub mod split;

pub use default::DefaultRandom;
pub use factory::{create, GeneratorConfig, GeneratorKind};
pub use mcg1::Mcg1Random;
pub use split::{sequence_split, Leapfrog};

use thiserror::Error;

/// Errors that can occur when seeding or drawing from a generator
#[derive(Debug, Error, PartialEq)]
pub enum RandomError {
    #[error("Skip {skip} must be positive")]
    InvalidSkip { skip: i64 },

    #[error("Bound {n} must be positive")]
    InvalidBound { n: i32 },

    #[error("Seed {seed} is illegal for this generator")]
    ZeroSeed { seed: i64 },

    #[error("Unknown generator kind '{0}'")]
    UnknownKind(String),

    #[error("Invalid generator config: {0}")]
    InvalidConfig(String),

    #[error("Skip {skip} overflows the underlying stream position")]
    SkipOverflow { skip: i64 },

    #[error("Worker rank {rank} invalid for {size} workers")]
    InvalidWorker { rank: i64, size: i64 },

    #[error("Block {rank} of size {block_size} is out of reach")]
    InvalidBlock { rank: i64, block_size: i64 },
}

/// 2^-64, scale from the signed 64-bit range onto a unit-width interval
const DOUBLE_SCALE: f64 = 1.0 / 18_446_744_073_709_551_616.0;
const FLOAT_SCALE: f32 = 1.0 / 18_446_744_073_709_551_616.0;

/// Largest double below 1.0
const DOUBLE_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;

/// Largest float below 1.0
const FLOAT_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// `x * 2^-64 + 0.5` at double precision
///
/// Raw samples within rounding distance of `i64::MAX` would land on 1.0;
/// those map to the largest double below it.
fn to_double(raw: i64) -> f64 {
    let value = raw as f64 * DOUBLE_SCALE + 0.5;
    if value >= 1.0 {
        DOUBLE_BELOW_ONE
    } else {
        value
    }
}

/// `x * 2^-64 + 0.5` at single precision, capped below 1.0 like [`to_double`]
fn to_float(raw: i64) -> f32 {
    let value = raw as f32 * FLOAT_SCALE + 0.5;
    if value >= 1.0 {
        FLOAT_BELOW_ONE
    } else {
        value
    }
}

/// Contract shared by all generator algorithms
///
/// Implementors supply [`Random::set_seed`], [`Random::state`],
/// [`Random::raw_next`], and [`Random::raw_next_skip`]. The central
/// correctness requirement: from any state, `raw_next_skip(k)` returns the
/// same value and leaves the same state as `k` calls to `raw_next()`.
///
/// A generator is not meant to be shared between threads that draw from it
/// concurrently; give each worker its own.
///
/// # Example
/// ```
/// use parallel_prng::{DefaultRandom, Random};
///
/// let mut rng = DefaultRandom::new(12345);
/// let p = rng.next_double();
/// assert!((0.0..1.0).contains(&p));
///
/// let die = rng.next_int(6).unwrap();
/// assert!((0..6).contains(&die));
/// ```
pub trait Random {
    /// Reinitialize the generator from `seed`
    ///
    /// # Errors
    /// Algorithms may reject particular seed values with
    /// [`RandomError::ZeroSeed`].
    fn set_seed(&mut self, seed: i64) -> Result<(), RandomError>;

    /// Current internal state word
    ///
    /// Two generators of the same algorithm with equal state produce equal
    /// sequences.
    fn state(&self) -> i64;

    /// Advance one position and return the raw 64-bit sample
    fn raw_next(&mut self) -> i64;

    /// Advance `skip` positions and return the last raw sample
    ///
    /// The caller guarantees `skip > 0`; the derived `*_skip` draws check it.
    fn raw_next_skip(&mut self, skip: i64) -> i64;

    /// Check that `skip` is a usable argument for [`Random::raw_next_skip`]
    ///
    /// Every derived `*_skip` draw calls this first. Wrappers whose skips
    /// expand into larger underlying skips override it to reject overflow.
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidSkip`] if `skip <= 0`.
    fn validate_skip(&self, skip: i64) -> Result<(), RandomError> {
        if skip <= 0 {
            return Err(RandomError::InvalidSkip { skip });
        }
        Ok(())
    }

    /// Boolean draw, true iff the raw sample is non-negative
    fn next_bool(&mut self) -> bool {
        self.raw_next() >= 0
    }

    /// Boolean draw after advancing `skip` positions
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidSkip`] if `skip <= 0`, or whatever
    /// [`Random::validate_skip`] rejects.
    fn next_bool_skip(&mut self, skip: i64) -> Result<bool, RandomError> {
        self.validate_skip(skip)?;
        Ok(self.raw_next_skip(skip) >= 0)
    }

    /// Integer draw in `0..n`
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidBound`] if `n < 1`.
    fn next_int(&mut self, n: i32) -> Result<i32, RandomError> {
        if n < 1 {
            return Err(RandomError::InvalidBound { n });
        }
        Ok((self.next_double() * f64::from(n)) as i32)
    }

    /// Integer draw in `0..n` after advancing `skip` positions
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidBound`] if `n < 1` and
    /// [`RandomError::InvalidSkip`] if `skip <= 0`.
    fn next_int_skip(&mut self, n: i32, skip: i64) -> Result<i32, RandomError> {
        if n < 1 {
            return Err(RandomError::InvalidBound { n });
        }
        Ok((self.next_double_skip(skip)? * f64::from(n)) as i32)
    }

    /// Single-precision draw in `[0.0, 1.0)`
    fn next_float(&mut self) -> f32 {
        to_float(self.raw_next())
    }

    /// Single-precision draw after advancing `skip` positions
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidSkip`] if `skip <= 0`.
    fn next_float_skip(&mut self, skip: i64) -> Result<f32, RandomError> {
        self.validate_skip(skip)?;
        Ok(to_float(self.raw_next_skip(skip)))
    }

    /// Double-precision draw in `[0.0, 1.0)`
    fn next_double(&mut self) -> f64 {
        to_double(self.raw_next())
    }

    /// Double-precision draw after advancing `skip` positions
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidSkip`] if `skip <= 0`.
    fn next_double_skip(&mut self, skip: i64) -> Result<f64, RandomError> {
        self.validate_skip(skip)?;
        Ok(to_double(self.raw_next_skip(skip)))
    }

    /// Advance one position, discarding the sample
    fn skip(&mut self) {
        self.raw_next();
    }

    /// Advance `n` positions, discarding the samples
    ///
    /// Does nothing when `n <= 0`.
    fn skip_n(&mut self, n: i64) {
        if n > 0 {
            self.raw_next_skip(n);
        }
    }
}

impl<R: Random + ?Sized> Random for Box<R> {
    fn set_seed(&mut self, seed: i64) -> Result<(), RandomError> {
        (**self).set_seed(seed)
    }

    fn state(&self) -> i64 {
        (**self).state()
    }

    fn raw_next(&mut self) -> i64 {
        (**self).raw_next()
    }

    fn raw_next_skip(&mut self, skip: i64) -> i64 {
        (**self).raw_next_skip(skip)
    }

    fn validate_skip(&self, skip: i64) -> Result<(), RandomError> {
        (**self).validate_skip(skip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Emits a fixed raw value on every draw
    struct Constant(i64);

    impl Random for Constant {
        fn set_seed(&mut self, seed: i64) -> Result<(), RandomError> {
            self.0 = seed;
            Ok(())
        }

        fn state(&self) -> i64 {
            self.0
        }

        fn raw_next(&mut self) -> i64 {
            self.0
        }

        fn raw_next_skip(&mut self, _skip: i64) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_double_mapping_endpoints() {
        assert_eq!(Constant(i64::MIN).next_double(), 0.0);
        assert_eq!(Constant(0).next_double(), 0.5);
        let top = Constant(i64::MAX).next_double();
        assert!(top < 1.0, "i64::MAX mapped to {}", top);
        assert_eq!(top, DOUBLE_BELOW_ONE);
        assert_eq!(top, 1.0 - 1.0 / (1u64 << 53) as f64);
    }

    #[test]
    fn test_double_mapping_rounds_to_nearest() {
        // Truncating to the top 53 bits would give 0x3fdd127d3ed0a313
        assert_eq!(
            Constant(-843874095164797178).next_double().to_bits(),
            0x3fdd127d3ed0a314
        );
        assert_eq!(
            Constant(5412480777206612661).next_double().to_bits(),
            0x3fe9639fd2e3e0f8
        );
        assert_eq!(
            Constant(-5369940795733202990).next_double().to_bits(),
            0x3fcabd11a612b8d4
        );
    }

    #[test]
    fn test_values_near_zero_keep_full_precision() {
        // 2^-54 is below the 2^-53 grid, but exact under the formula
        let tiny = Constant(i64::MIN + 1024).next_double();
        assert_eq!(tiny, 1.0 / (1u64 << 54) as f64);
    }

    #[test]
    fn test_float_mapping_endpoints() {
        assert_eq!(Constant(i64::MIN).next_float(), 0.0);
        assert_eq!(Constant(0).next_float(), 0.5);
        let top = Constant(i64::MAX).next_float();
        assert!(top < 1.0, "i64::MAX mapped to {}", top);
        assert_eq!(top, FLOAT_BELOW_ONE);
    }

    #[test]
    fn test_bool_is_sign_test() {
        assert!(Constant(0).next_bool());
        assert!(Constant(i64::MAX).next_bool());
        assert!(!Constant(-1).next_bool());
        assert!(!Constant(i64::MIN).next_bool());
    }

    #[test]
    fn test_next_int_bounds() {
        assert_eq!(Constant(i64::MIN).next_int(10), Ok(0));
        assert_eq!(Constant(i64::MAX).next_int(10), Ok(9));
        assert_eq!(Constant(i64::MAX).next_int(i32::MAX), Ok(i32::MAX - 1));
        assert_eq!(Constant(0).next_int(1), Ok(0));
        assert_eq!(
            Constant(0).next_int(0),
            Err(RandomError::InvalidBound { n: 0 })
        );
    }

    #[test]
    fn test_skip_variants_reject_non_positive() {
        let mut rng = Constant(7);
        assert_eq!(
            rng.next_bool_skip(0),
            Err(RandomError::InvalidSkip { skip: 0 })
        );
        assert_eq!(
            rng.next_double_skip(-3),
            Err(RandomError::InvalidSkip { skip: -3 })
        );
        assert!(rng.next_float_skip(0).is_err());
        assert!(rng.next_int_skip(5, 0).is_err());
        assert_eq!(
            rng.next_int_skip(0, 1),
            Err(RandomError::InvalidBound { n: 0 })
        );
    }
}
