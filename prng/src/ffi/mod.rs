//! FFI (Foreign Function Interface) module
//!
//! PyO3 bindings for exposing generators and ranges to Python.
//!
//! # Design Principles
//!
//! 1. **Minimal boundary**: Only expose what's needed
//! 2. **Simple types**: Use primitives and strings at boundary
//! 3. **Safe errors**: Convert all Rust errors to Python `ValueError`
//! 4. **No references**: Python gets copies, never references to Rust state

pub mod random;
pub mod range;

use pyo3::exceptions::PyValueError;
use pyo3::PyErr;

/// Convert any crate error into a Python `ValueError`
pub(crate) fn value_error(err: impl std::fmt::Display) -> PyErr {
    PyErr::new::<PyValueError, _>(err.to_string())
}
