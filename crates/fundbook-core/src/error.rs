//! Error types for Fundbook core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages. None are retried and none are swallowed:
//! every failure propagates synchronously to the caller.

use thiserror::Error;

/// Result type alias for Fundbook operations.
pub type Result<T> = std::result::Result<T, FundError>;

/// Core error type for Fundbook operations.
#[derive(Debug, Error)]
pub enum FundError {
    /// Rejected input: empty required field or non-positive amount.
    /// Raised before anything is written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An edit or delete referenced an id no stored entry carries.
    #[error("No entry with id {0}")]
    UnknownEntry(u64),

    /// A history snapshot disagrees with the declared schema. Fatal to the
    /// operation; raised before writing a corrupt audit row.
    #[error("History schema mismatch: {0}")]
    SchemaMismatch(String),

    /// Missing or malformed backing file, or an underlying I/O failure.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for FundError {
    fn from(err: std::io::Error) -> Self {
        FundError::Storage(err.to_string())
    }
}

impl From<csv::Error> for FundError {
    fn from(err: csv::Error) -> Self {
        FundError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for FundError {
    fn from(err: serde_json::Error) -> Self {
        FundError::Storage(err.to_string())
    }
}
