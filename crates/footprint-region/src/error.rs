//! Error types for footprint-region

use thiserror::Error;

/// Errors that can occur during region operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] footprint_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Nothing to operate on
    #[error("empty input: no footprints to process")]
    EmptyInput,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
