//! Store configuration
//!
//! [`OpenOptions`] controls how a store is opened and what operations are
//! permitted. Options are serde-serializable so hosts can load them from a
//! configuration file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default number of DashMap shards
pub const DEFAULT_SHARD_AMOUNT: usize = 16;

/// Default maximum key length in bytes
pub const DEFAULT_MAX_KEY_LEN: usize = 150;

/// Controls whether the store allows writes or is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AccessMode {
    /// Reads and writes permitted
    #[default]
    ReadWrite,
    /// Set, conditional writes and deletes are rejected
    ReadOnly,
}

/// Options for opening a store.
///
/// Use the builder pattern to configure options:
///
/// ```
/// use latch_core::{AccessMode, OpenOptions};
///
/// let opts = OpenOptions::new()
///     .access_mode(AccessMode::ReadOnly)
///     .shard_amount(32)
///     .max_value_len(Some(64 * 1024));
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenOptions {
    /// Read/write permission for handles opened with these options
    pub access_mode: AccessMode,
    /// Number of lock shards in the in-memory backend (power of two, > 1)
    pub shard_amount: usize,
    /// Maximum key length in bytes
    pub max_key_len: usize,
    /// Maximum value length in bytes, unlimited if `None`
    pub max_value_len: Option<usize>,
}

impl OpenOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }

    /// Set the shard amount
    pub fn shard_amount(mut self, shards: usize) -> Self {
        self.shard_amount = shards;
        self
    }

    /// Set the maximum key length
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }

    /// Set the maximum value length
    pub fn max_value_len(mut self, len: Option<usize>) -> Self {
        self.max_value_len = len;
        self
    }

    /// True if writes are rejected
    pub fn is_read_only(&self) -> bool {
        self.access_mode == AccessMode::ReadOnly
    }

    /// Check the options can open a store
    pub fn validate(&self) -> Result<()> {
        if self.shard_amount < 2 || !self.shard_amount.is_power_of_two() {
            return Err(Error::InvalidConfig(format!(
                "shard_amount must be a power of two greater than 1, got {}",
                self.shard_amount
            )));
        }
        if self.max_key_len == 0 {
            return Err(Error::InvalidConfig(
                "max_key_len must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Check a value against `max_value_len`
    pub fn check_value(&self, value: &[u8]) -> Result<()> {
        match self.max_value_len {
            Some(limit) if value.len() > limit => Err(Error::ValueTooLarge {
                size: value.len(),
                limit,
            }),
            _ => Ok(()),
        }
    }
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self {
            access_mode: AccessMode::ReadWrite,
            shard_amount: DEFAULT_SHARD_AMOUNT,
            max_key_len: DEFAULT_MAX_KEY_LEN,
            max_value_len: None,
        }
    }
}
