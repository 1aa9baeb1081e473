//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur during regression testing
#[derive(Debug, Error)]
pub enum TestError {
    /// An ASCII-art pattern could not be turned into a footprint or mask
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// Building a test object failed
    #[error("footprint error: {0}")]
    Footprint(#[from] footprint_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
