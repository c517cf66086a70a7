//! Stored value representation

use serde::{Deserialize, Serialize};

/// A stored value with its write metadata
///
/// `version` comes from the store-wide write counter, so a later write to any
/// key always carries a higher version. `timestamp` is the wall-clock time of
/// the write in milliseconds since the Unix epoch.
///
/// Conditional writes compare `value` only; metadata never takes part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionedValue {
    /// The stored bytes
    pub value: Vec<u8>,
    /// Store-wide write version
    pub version: u64,
    /// Write time in milliseconds since the Unix epoch
    pub timestamp: i64,
}

impl VersionedValue {
    /// Create a new versioned value
    pub fn new(value: Vec<u8>, version: u64, timestamp: i64) -> Self {
        Self {
            value,
            version,
            timestamp,
        }
    }

    /// Consume, returning the stored bytes
    pub fn into_value(self) -> Vec<u8> {
        self.value
    }
}
