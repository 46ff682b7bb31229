//! PyO3 wrapper for generators

use pyo3::prelude::*;

use super::value_error;
use crate::random::{GeneratorKind, Random};

/// Python wrapper for a boxed generator
///
/// # Example (from Python)
///
/// ```python
/// from parallel_prng import Random
///
/// rng = Random("mcg1", 12345)
/// x = rng.next_double()
/// worker_sample = rng.next_double_skip(4)
/// ```
#[pyclass(name = "Random")]
pub struct PyRandom {
    kind: GeneratorKind,
    inner: Box<dyn Random + Send>,
}

#[pymethods]
impl PyRandom {
    /// Create a generator of the named kind
    ///
    /// # Errors
    ///
    /// Raises ValueError if the kind is unknown or the seed is rejected.
    #[new]
    #[pyo3(signature = (kind, seed))]
    fn new(kind: &str, seed: i64) -> PyResult<Self> {
        let kind: GeneratorKind = kind.parse().map_err(value_error)?;
        let inner = kind.build(seed).map_err(value_error)?;
        Ok(Self { kind, inner })
    }

    #[getter]
    fn kind(&self) -> &'static str {
        self.kind.name()
    }

    fn set_seed(&mut self, seed: i64) -> PyResult<()> {
        self.inner.set_seed(seed).map_err(value_error)
    }

    fn state(&self) -> i64 {
        self.inner.state()
    }

    fn raw_next(&mut self) -> i64 {
        self.inner.raw_next()
    }

    fn raw_next_skip(&mut self, skip: i64) -> PyResult<i64> {
        if skip <= 0 {
            return Err(value_error(crate::RandomError::InvalidSkip { skip }));
        }
        Ok(self.inner.raw_next_skip(skip))
    }

    fn next_bool(&mut self) -> bool {
        self.inner.next_bool()
    }

    fn next_bool_skip(&mut self, skip: i64) -> PyResult<bool> {
        self.inner.next_bool_skip(skip).map_err(value_error)
    }

    fn next_int(&mut self, n: i32) -> PyResult<i32> {
        self.inner.next_int(n).map_err(value_error)
    }

    fn next_int_skip(&mut self, n: i32, skip: i64) -> PyResult<i32> {
        self.inner.next_int_skip(n, skip).map_err(value_error)
    }

    fn next_float(&mut self) -> f32 {
        self.inner.next_float()
    }

    fn next_float_skip(&mut self, skip: i64) -> PyResult<f32> {
        self.inner.next_float_skip(skip).map_err(value_error)
    }

    fn next_double(&mut self) -> f64 {
        self.inner.next_double()
    }

    fn next_double_skip(&mut self, skip: i64) -> PyResult<f64> {
        self.inner.next_double_skip(skip).map_err(value_error)
    }

    /// Advance `n` positions (default 1); `n <= 0` does nothing
    #[pyo3(signature = (n = 1))]
    fn skip(&mut self, n: i64) {
        self.inner.skip_n(n);
    }

    fn __repr__(&self) -> String {
        format!("Random(kind={}, state={})", self.kind, self.inner.state())
    }
}
