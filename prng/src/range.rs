//! Index ranges for static work partitioning
//!
//! A [`Range`] is an immutable arithmetic progression of `i64` indices,
//! described by a lower bound, a stride, and a length. The upper bound is
//! derived. Partitioning operations ([`Range::subrange`],
//! [`Range::subranges`], [`Range::chunk`]) build new ranges and never touch
//! the receiver, so disjoint pieces can be handed to independent workers
//! without any synchronization.
//!
//! # Partitioning
//!
//! Splitting a range of length `L` into `size` pieces gives every piece
//! either `L / size` or `L / size + 1` elements. The first `L % size` ranks
//! receive the larger share. Concatenating the pieces in rank order
//! reproduces the original strided index sequence exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur when building or partitioning a range
#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("Stride {stride} must be at least 1")]
    InvalidStride { stride: i64 },

    #[error("Partition size {size} must be at least 1")]
    InvalidPartitionSize { size: i64 },

    #[error("Rank {rank} outside partition of size {size}")]
    InvalidRank { rank: i64, size: i64 },

    #[error("Chunk skip count {n1} must be non-negative")]
    NegativeChunkSkip { n1: i64 },

    #[error("Chunk length {n2} must be non-negative")]
    NegativeChunkLength { n2: i64 },

    #[error("Range {lb}..{ub} with stride {stride} has more than i64::MAX elements")]
    LengthOverflow { lb: i64, ub: i64, stride: i64 },
}

/// Immutable arithmetic progression `lb, lb + stride, ..., ub`
///
/// Equality and hashing consider `lb`, `stride`, and `length` only; the
/// upper bound is a function of those three.
///
/// # Example
/// ```
/// use parallel_prng::Range;
///
/// let range = Range::new(0, 9).unwrap();
/// assert_eq!(range.length(), 10);
///
/// let piece = range.subrange(3, 1).unwrap();
/// assert_eq!((piece.lb(), piece.ub()), (4, 6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RangeBounds", try_from = "RangeBounds")]
pub struct Range {
    lb: i64,
    stride: i64,
    length: i64,
}

/// Serialized form of a range, validated on the way back in
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RangeBounds {
    lb: i64,
    ub: i64,
    #[serde(default = "unit_stride")]
    stride: i64,
}

fn unit_stride() -> i64 {
    1
}

impl From<Range> for RangeBounds {
    fn from(range: Range) -> Self {
        Self {
            lb: range.lb,
            ub: range.ub(),
            stride: range.stride,
        }
    }
}

impl TryFrom<RangeBounds> for Range {
    type Error = RangeError;

    fn try_from(bounds: RangeBounds) -> Result<Self, Self::Error> {
        Range::with_stride(bounds.lb, bounds.ub, bounds.stride)
    }
}

impl Range {
    /// Create the range `lb..=ub` with stride 1
    ///
    /// The range is empty when `ub < lb`.
    ///
    /// # Errors
    /// Returns [`RangeError::LengthOverflow`] if the range holds more than
    /// `i64::MAX` elements.
    pub fn new(lb: i64, ub: i64) -> Result<Self, RangeError> {
        Self::with_stride(lb, ub, 1)
    }

    /// Create the range `lb, lb + stride, ...` bounded above by `ub`
    ///
    /// The realized upper bound is the last element not exceeding `ub`, so
    /// `Range::with_stride(0, 10, 3)` ends at 9.
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidStride`] if `stride < 1`, and
    /// [`RangeError::LengthOverflow`] if the length does not fit in `i64`.
    ///
    /// # Example
    /// ```
    /// use parallel_prng::Range;
    ///
    /// let range = Range::with_stride(0, 10, 3).unwrap();
    /// assert_eq!(range.ub(), 9);
    /// assert_eq!(range.length(), 4);
    /// ```
    pub fn with_stride(lb: i64, ub: i64, stride: i64) -> Result<Self, RangeError> {
        if stride < 1 {
            return Err(RangeError::InvalidStride { stride });
        }

        let span = i128::from(ub) - i128::from(lb) + i128::from(stride);
        let length = span.div_euclid(i128::from(stride)).max(0);
        let length = i64::try_from(length)
            .map_err(|_| RangeError::LengthOverflow { lb, ub, stride })?;

        Ok(Self { lb, stride, length })
    }

    /// Lower bound (first element)
    pub fn lb(&self) -> i64 {
        self.lb
    }

    /// Upper bound (last element), `lb + (length - 1) * stride`
    ///
    /// For an empty range this lies below `lb` and carries no meaning.
    pub fn ub(&self) -> i64 {
        self.offset(self.length - 1)
    }

    /// Distance between consecutive elements
    pub fn stride(&self) -> i64 {
        self.stride
    }

    /// Number of elements
    pub fn length(&self) -> i64 {
        self.length
    }

    /// True if the range holds no elements
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True if `value` lies within `lb..=ub`
    ///
    /// This tests the bounding interval; the stride is ignored, so
    /// `Range::with_stride(0, 9, 3)` contains 4.
    pub fn contains(&self, value: i64) -> bool {
        !self.is_empty() && self.lb <= value && value <= self.ub()
    }

    /// True if `other`'s bounding interval lies within this one's
    pub fn contains_range(&self, other: &Range) -> bool {
        self.lb <= other.lb && other.ub() <= self.ub()
    }

    /// Piece `rank` of this range split into `size` nearly-equal parts
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidPartitionSize`] if `size < 1` and
    /// [`RangeError::InvalidRank`] if `rank` is outside `0..size`.
    pub fn subrange(&self, size: i64, rank: i64) -> Result<Range, RangeError> {
        if size < 1 {
            return Err(RangeError::InvalidPartitionSize { size });
        }
        if rank < 0 || rank >= size {
            return Err(RangeError::InvalidRank { rank, size });
        }
        Ok(self.piece(size, rank))
    }

    /// All `size` pieces of this range, in rank order
    ///
    /// Equivalent to calling [`Range::subrange`] for every rank.
    ///
    /// # Errors
    /// Returns [`RangeError::InvalidPartitionSize`] if `size < 1`.
    ///
    /// # Example
    /// ```
    /// use parallel_prng::Range;
    ///
    /// let pieces = Range::new(0, 9).unwrap().subranges(3).unwrap();
    /// let lengths: Vec<i64> = pieces.iter().map(|r| r.length()).collect();
    /// assert_eq!(lengths, vec![4, 3, 3]);
    /// ```
    pub fn subranges(&self, size: i64) -> Result<Vec<Range>, RangeError> {
        if size < 1 {
            return Err(RangeError::InvalidPartitionSize { size });
        }

        tracing::debug!(
            lb = self.lb,
            length = self.length,
            stride = self.stride,
            size,
            base = self.length / size,
            remainder = self.length % size,
            "partitioning range"
        );

        Ok((0..size).map(|rank| self.piece(size, rank)).collect())
    }

    /// Skip the first `n1` elements, then take up to `n2` more
    ///
    /// The result starts at `lb + n1 * stride` and has
    /// `min(n2, max(0, length - n1))` elements.
    ///
    /// # Errors
    /// Returns [`RangeError::NegativeChunkSkip`] if `n1 < 0` and
    /// [`RangeError::NegativeChunkLength`] if `n2 < 0`.
    pub fn chunk(&self, n1: i64, n2: i64) -> Result<Range, RangeError> {
        if n1 < 0 {
            return Err(RangeError::NegativeChunkSkip { n1 });
        }
        if n2 < 0 {
            return Err(RangeError::NegativeChunkLength { n2 });
        }

        let available = self.length.saturating_sub(n1).max(0);
        Ok(Range {
            lb: self.offset(n1),
            stride: self.stride,
            length: n2.min(available),
        })
    }

    /// Iterate over the elements `lb, lb + stride, ..., ub`
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            next: self.lb,
            stride: self.stride,
            remaining: self.length,
        }
    }

    fn piece(&self, size: i64, rank: i64) -> Range {
        let base = self.length / size;
        let remainder = self.length % size;

        // Ranks below the remainder carry one extra element each
        let preceding = rank * base + rank.min(remainder);
        let length = if rank < remainder { base + 1 } else { base };

        Range {
            lb: self.offset(preceding),
            stride: self.stride,
            length,
        }
    }

    /// `lb + n * stride`, saturated for the inert bounds of empty pieces
    fn offset(&self, n: i64) -> i64 {
        let value = i128::from(self.lb) + i128::from(n) * i128::from(self.stride);
        value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stride == 1 {
            write!(f, "{}..{}", self.lb, self.ub())
        } else {
            write!(f, "{}..{};{}", self.lb, self.ub(), self.stride)
        }
    }
}

/// Iterator over the elements of a [`Range`]
#[derive(Debug, Clone)]
pub struct RangeIter {
    next: i64,
    stride: i64,
    remaining: i64,
}

impl Iterator for RangeIter {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        if self.remaining <= 0 {
            return None;
        }
        let value = self.next;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.next += self.stride;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl IntoIterator for Range {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

impl IntoIterator for &Range {
    type Item = i64;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_stride_rejected() {
        assert_eq!(
            Range::with_stride(0, 10, 0),
            Err(RangeError::InvalidStride { stride: 0 })
        );
    }

    #[test]
    fn test_empty_range_when_ub_below_lb() {
        let range = Range::new(5, 4).unwrap();
        assert!(range.is_empty());
        assert!(!range.contains(5));
        assert_eq!(range.iter().count(), 0);

        let range = Range::with_stride(5, -100, 7).unwrap();
        assert_eq!(range.length(), 0);
    }

    #[test]
    fn test_full_i64_span_overflows() {
        assert!(matches!(
            Range::new(i64::MIN, i64::MAX),
            Err(RangeError::LengthOverflow { .. })
        ));
        let range = Range::new(1, i64::MAX).unwrap();
        assert_eq!(range.length(), i64::MAX);
        assert_eq!(range.ub(), i64::MAX);
    }

    #[test]
    fn test_display_forms() {
        assert_eq!(Range::new(0, 9).unwrap().to_string(), "0..9");
        assert_eq!(Range::with_stride(0, 10, 3).unwrap().to_string(), "0..9;3");
    }

    #[test]
    fn test_equality_ignores_requested_ub() {
        // Both realize 0, 3, 6, 9
        let a = Range::with_stride(0, 9, 3).unwrap();
        let b = Range::with_stride(0, 11, 3).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_iter_near_i64_max_does_not_overflow() {
        let range = Range::with_stride(i64::MAX - 4, i64::MAX, 2).unwrap();
        let values: Vec<i64> = range.iter().collect();
        assert_eq!(values, vec![i64::MAX - 4, i64::MAX - 2, i64::MAX]);
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let range = Range::with_stride(2, 20, 4).unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"lb":2,"ub":18,"stride":4}"#);
        assert_eq!(serde_json::from_str::<Range>(&json).unwrap(), range);

        assert!(serde_json::from_str::<Range>(r#"{"lb":0,"ub":5,"stride":0}"#).is_err());
        let unit: Range = serde_json::from_str(r#"{"lb":0,"ub":5}"#).unwrap();
        assert_eq!(unit.length(), 6);
    }
}
