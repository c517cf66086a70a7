//! Unified error types for Latch.
//!
//! This module provides a clean error type that wraps internal errors
//! and presents a consistent interface to users.
//!
//! A conditional write that loses its race is not an error. `compare_and_set`
//! and `compare_and_delete` report it as `Ok(false)`, so a caller can always
//! tell a lost race apart from a storage failure.

use thiserror::Error;

/// All Latch errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Key is empty or exceeds the configured length limit
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// Constraint violation (value too large, bad configuration, bad paging)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// Write attempted through a read-only handle
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// The backing medium could not complete the operation
    #[error("storage error: {0}")]
    Storage(String),
}

/// Result type for Latch operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Check if the backing medium failed.
    ///
    /// The outcome of a failed conditional write is unknown to the caller;
    /// the store guarantees it was either fully applied or not applied.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, Error::Storage(_))
    }

    /// Check if the request was rejected before reaching the store.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidKey(_) | Error::ConstraintViolation(_))
    }

    /// Check if this is an access-mode error.
    pub fn is_access_denied(&self) -> bool {
        matches!(self, Error::AccessDenied(_))
    }
}

// Convert from internal core errors
impl From<latch_core::Error> for Error {
    fn from(e: latch_core::Error) -> Self {
        use latch_core::Error as CoreError;
        match e {
            CoreError::InvalidKey { key, reason } => {
                Error::InvalidKey(format!("'{}': {}", key, reason))
            }
            CoreError::ValueTooLarge { size, limit } => Error::ConstraintViolation(format!(
                "value is {} bytes, limit is {}",
                size, limit
            )),
            CoreError::Storage(msg) => Error::Storage(msg),
            CoreError::ReadOnly => Error::AccessDenied("store is read-only".to_string()),
            CoreError::InvalidConfig(msg) => Error::ConstraintViolation(msg),
        }
    }
}
