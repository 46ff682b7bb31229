//! Splitting one random stream across parallel workers
//!
//! Both schemes start every worker from the same seed and rely on
//! skip-ahead, so workers never communicate and the combined output matches
//! a single sequential run.
//!
//! - **Leapfrog**: worker `rank` of `size` takes positions
//!   `rank + 1, rank + 1 + size, rank + 1 + 2 * size, ...` of the sequential
//!   stream. Interleaving the workers round-robin restores the stream.
//! - **Sequence splitting**: worker `rank` takes the contiguous block of
//!   positions `rank * block_size + 1 ..= (rank + 1) * block_size`.

use super::{Random, RandomError};

/// Generator view for one worker of a leapfrog split
///
/// Implements [`Random`], so every derived draw works on the worker's
/// sub-stream. Also iterates over raw samples.
///
/// # Example
/// ```
/// use parallel_prng::{DefaultRandom, Leapfrog, Random};
///
/// let mut sequential = DefaultRandom::new(7);
/// let expected: Vec<i64> = (0..6).map(|_| sequential.raw_next()).collect();
///
/// let even: Vec<i64> = Leapfrog::new(DefaultRandom::new(7), 0, 2).unwrap().take(3).collect();
/// let odd: Vec<i64> = Leapfrog::new(DefaultRandom::new(7), 1, 2).unwrap().take(3).collect();
///
/// assert_eq!(even, vec![expected[0], expected[2], expected[4]]);
/// assert_eq!(odd, vec![expected[1], expected[3], expected[5]]);
/// ```
#[derive(Debug, Clone)]
pub struct Leapfrog<R> {
    rng: R,
    rank: i64,
    size: i64,
    started: bool,
}

impl<R: Random> Leapfrog<R> {
    /// Wrap `rng` as worker `rank` of `size`
    ///
    /// `rng` should be freshly seeded with the seed shared by all workers.
    ///
    /// # Errors
    /// Returns [`RandomError::InvalidWorker`] if `size < 1` or `rank` is
    /// outside `0..size`.
    pub fn new(rng: R, rank: i64, size: i64) -> Result<Self, RandomError> {
        if size < 1 || rank < 0 || rank >= size {
            return Err(RandomError::InvalidWorker { rank, size });
        }
        Ok(Self {
            rng,
            rank,
            size,
            started: false,
        })
    }

    /// This worker's index, in `0..size`
    pub fn rank(&self) -> i64 {
        self.rank
    }

    /// Number of workers sharing the stream
    pub fn size(&self) -> i64 {
        self.size
    }

    /// Unwrap the underlying generator
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Underlying positions covered by the next `steps` leapfrog steps
    ///
    /// `None` when the distance does not fit in `i64`.
    fn distance(&self, steps: i64) -> Option<i64> {
        let first = if self.started { self.size } else { self.rank + 1 };
        steps.checked_sub(1)?.checked_mul(self.size)?.checked_add(first)
    }
}

impl<R: Random> Random for Leapfrog<R> {
    /// Reseed the underlying generator and restart at this worker's first
    /// position
    fn set_seed(&mut self, seed: i64) -> Result<(), RandomError> {
        self.rng.set_seed(seed)?;
        self.started = false;
        Ok(())
    }

    fn state(&self) -> i64 {
        self.rng.state()
    }

    fn raw_next(&mut self) -> i64 {
        // rank + 1 <= size, so a single step always fits
        let distance = if self.started { self.size } else { self.rank + 1 };
        self.started = true;
        self.rng.raw_next_skip(distance)
    }

    /// Advance `skip` leapfrog steps
    ///
    /// The underlying generator moves `(skip - 1) * size` plus one step's
    /// worth of positions. When that exceeds `i64::MAX` the move is capped
    /// at `i64::MAX` positions and the worker leaves its sub-stream; the
    /// derived `*_skip` draws reject such skips through
    /// [`Random::validate_skip`] instead.
    fn raw_next_skip(&mut self, skip: i64) -> i64 {
        debug_assert!(skip > 0, "skip must be positive");
        let distance = self.distance(skip).unwrap_or(i64::MAX);
        self.started = true;
        self.rng.raw_next_skip(distance)
    }

    /// Rejects `skip <= 0` and skips whose underlying distance overflows
    fn validate_skip(&self, skip: i64) -> Result<(), RandomError> {
        if skip <= 0 {
            return Err(RandomError::InvalidSkip { skip });
        }
        let distance = self
            .distance(skip)
            .ok_or(RandomError::SkipOverflow { skip })?;
        self.rng.validate_skip(distance)
    }
}

impl<R: Random> Iterator for Leapfrog<R> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.raw_next())
    }
}

/// Position `rng` at the start of block `rank` of a sequence split
///
/// After this call, `block_size` sequential draws from `rng` produce the
/// worker's share of the stream.
///
/// # Errors
/// Returns [`RandomError::InvalidBlock`] if `rank < 0`, `block_size < 1`, or
/// the block offset overflows `i64`.
///
/// # Example
/// ```
/// use parallel_prng::{sequence_split, Mcg1Random, Random};
///
/// let mut sequential = Mcg1Random::new(11).unwrap();
/// let expected: Vec<i64> = (0..8).map(|_| sequential.raw_next()).collect();
///
/// let mut worker = Mcg1Random::new(11).unwrap();
/// sequence_split(&mut worker, 1, 4).unwrap();
/// let block: Vec<i64> = (0..4).map(|_| worker.raw_next()).collect();
/// assert_eq!(block, expected[4..8]);
/// ```
pub fn sequence_split<R: Random + ?Sized>(
    rng: &mut R,
    rank: i64,
    block_size: i64,
) -> Result<(), RandomError> {
    let invalid = RandomError::InvalidBlock { rank, block_size };
    if rank < 0 || block_size < 1 {
        return Err(invalid);
    }
    let offset = rank.checked_mul(block_size).ok_or(invalid)?;
    rng.skip_n(offset);
    Ok(())
}
