//! Parallel PRNG Core - Rust Engine
//!
//! Reproducible pseudorandom streams and static index partitioning for
//! parallel scientific programs.
//!
//! # Architecture
//!
//! - **range**: Immutable index ranges and their partitioning
//! - **random**: Generator contract, algorithms, selection, stream splitting
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (same algorithm + seed → same stream)
//! 2. `raw_next_skip(k)` is bit-identical to `k` calls of `raw_next()`
//! 3. Range partitions are disjoint, ordered, and differ in length by ≤ 1
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod random;
pub mod range;

// Re-exports for convenience
pub use random::{
    create, sequence_split, DefaultRandom, GeneratorConfig, GeneratorKind, Leapfrog, Mcg1Random,
    Random, RandomError,
};
pub use range::{Range, RangeError, RangeIter};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn parallel_prng(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::random::PyRandom>()?;
    m.add_class::<ffi::range::PyRange>()?;
    Ok(())
}
