//! Error types for the latch store
//!
//! `Error` is the internal error shared by the storage backends and the
//! facade. A conditional write that loses its race is NOT an error: it is
//! reported as `Ok(false)` by the operation itself.

use thiserror::Error;

/// Internal error type
#[derive(Debug, Error)]
pub enum Error {
    /// Key is empty or exceeds the configured limit
    #[error("invalid key '{key}': {reason}")]
    InvalidKey {
        /// Display form of the rejected key
        key: String,
        /// Why the key was rejected
        reason: String,
    },

    /// Value exceeds the configured limit
    #[error("value too large: {size} bytes, limit is {limit}")]
    ValueTooLarge {
        /// Size of the rejected value
        size: usize,
        /// Configured limit
        limit: usize,
    },

    /// The backing medium could not complete the operation
    #[error("storage error: {0}")]
    Storage(String),

    /// Write attempted through a read-only handle
    #[error("store is read-only")]
    ReadOnly,

    /// Options rejected at open time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for latch operations
pub type Result<T> = std::result::Result<T, Error>;
