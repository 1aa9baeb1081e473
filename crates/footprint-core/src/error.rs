//! Error types for footprint-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every failure is raised synchronously at the call that detects it; a
//! failed mutating call may leave its receiver in whatever state it had
//! reached immediately before the check.

use thiserror::Error;

/// Footprint error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A value does not fit the target range (e.g. an id too large for the pixel type)
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// Raster dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (i32, i32),
        actual: (i32, i32),
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Table schemas that were required to agree do not
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted data could not be decoded
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for footprint operations
pub type Result<T> = std::result::Result<T, Error>;
