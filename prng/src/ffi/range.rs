//! PyO3 wrapper for Range

use pyo3::prelude::*;

use super::value_error;
use crate::range::Range;

/// Python wrapper for Rust Range
///
/// # Example (from Python)
///
/// ```python
/// from parallel_prng import Range
///
/// work = Range(0, 999)
/// mine = work.subrange(8, worker_rank)
/// for i in mine.indices():
///     ...
/// ```
#[pyclass(name = "Range", frozen, eq, hash)]
#[derive(Clone, PartialEq, Hash)]
pub struct PyRange {
    inner: Range,
}

impl From<Range> for PyRange {
    fn from(inner: Range) -> Self {
        Self { inner }
    }
}

#[pymethods]
impl PyRange {
    #[new]
    #[pyo3(signature = (lb, ub, stride = 1))]
    fn new(lb: i64, ub: i64, stride: i64) -> PyResult<Self> {
        Range::with_stride(lb, ub, stride)
            .map(Self::from)
            .map_err(value_error)
    }

    #[getter]
    fn lb(&self) -> i64 {
        self.inner.lb()
    }

    #[getter]
    fn ub(&self) -> i64 {
        self.inner.ub()
    }

    #[getter]
    fn stride(&self) -> i64 {
        self.inner.stride()
    }

    #[getter]
    fn length(&self) -> i64 {
        self.inner.length()
    }

    fn contains(&self, value: i64) -> bool {
        self.inner.contains(value)
    }

    fn contains_range(&self, other: &PyRange) -> bool {
        self.inner.contains_range(&other.inner)
    }

    fn subrange(&self, size: i64, rank: i64) -> PyResult<PyRange> {
        self.inner
            .subrange(size, rank)
            .map(Self::from)
            .map_err(value_error)
    }

    fn subranges(&self, size: i64) -> PyResult<Vec<PyRange>> {
        let pieces = self.inner.subranges(size).map_err(value_error)?;
        Ok(pieces.into_iter().map(Self::from).collect())
    }

    fn chunk(&self, n1: i64, n2: i64) -> PyResult<PyRange> {
        self.inner.chunk(n1, n2).map(Self::from).map_err(value_error)
    }

    /// Every index in the range, as a list
    fn indices(&self) -> Vec<i64> {
        self.inner.iter().collect()
    }

    fn __len__(&self) -> usize {
        usize::try_from(self.inner.length()).unwrap_or(usize::MAX)
    }

    fn __repr__(&self) -> String {
        format!("Range({})", self.inner)
    }
}
