//! Key-value store primitive.
//!
//! The KV primitive is the store's whole public surface: plain reads and
//! writes plus the two conditional writes that make the store usable as a
//! mutual-exclusion primitive.
//!
//! # Example
//!
//! ```
//! use latchdb::prelude::*;
//!
//! let db = Latch::open()?;
//!
//! // Exactly one caller can create a lock key
//! assert!(db.kv.compare_and_set("lock", Expected::Absent, "worker-1")?);
//! assert!(!db.kv.compare_and_set("lock", Expected::Absent, "worker-2")?);
//!
//! // Only the holder can release it
//! assert!(!db.kv.compare_and_delete("lock", "worker-2")?);
//! assert!(db.kv.compare_and_delete("lock", "worker-1")?);
//! # Ok::<(), latchdb::Error>(())
//! ```

use crate::database::StoreContext;
use crate::error::{Error, Result};
use latch_core::{Expected, Key, VersionedValue};
use std::sync::Arc;
use tracing::warn;

/// Key-value store operations.
///
/// Access via `db.kv`. Cloning is cheap and shares the store.
#[derive(Clone)]
pub struct KV {
    ctx: Arc<StoreContext>,
}

impl KV {
    pub(crate) fn new(ctx: Arc<StoreContext>) -> Self {
        Self { ctx }
    }

    fn key(&self, key: impl Into<Key>) -> Result<Key> {
        let key = key.into();
        key.validate(self.ctx.options.max_key_len)?;
        Ok(key)
    }

    fn writable(&self) -> Result<()> {
        if self.ctx.options.is_read_only() {
            return Err(latch_core::Error::ReadOnly.into());
        }
        Ok(())
    }

    fn value(&self, value: impl AsRef<[u8]>) -> Result<Vec<u8>> {
        let value = value.as_ref();
        self.ctx.options.check_value(value)?;
        Ok(value.to_vec())
    }

    /// Map a backend result, logging storage failures before they propagate.
    fn surface<T>(&self, op: &'static str, key: &Key, result: latch_core::Result<T>) -> Result<T> {
        result.map_err(|e| {
            let e = Error::from(e);
            if e.is_storage_failure() {
                warn!(op, key = %key, error = %e, "storage failure");
            }
            e
        })
    }

    // =========================================================================
    // Core operations
    // =========================================================================

    /// Get a value.
    ///
    /// Returns `None` if the key doesn't exist. An empty value is returned as
    /// `Some(vec![])`, never as `None`.
    ///
    /// # Example
    ///
    /// ```
    /// # use latchdb::prelude::*;
    /// # let db = Latch::open()?;
    /// assert_eq!(db.kv.get("name")?, None);
    /// db.kv.set("name", "")?;
    /// assert_eq!(db.kv.get("name")?, Some(vec![]));
    /// # Ok::<(), latchdb::Error>(())
    /// ```
    pub fn get(&self, key: impl Into<Key>) -> Result<Option<Vec<u8>>> {
        Ok(self.get_versioned(key)?.map(VersionedValue::into_value))
    }

    /// Set a value, replacing any prior value.
    pub fn set(&self, key: impl Into<Key>, value: impl AsRef<[u8]>) -> Result<()> {
        let key = self.key(key)?;
        self.writable()?;
        let value = self.value(value)?;
        let result = self.ctx.storage.put(key.clone(), value);
        self.surface("set", &key, result)?;
        Ok(())
    }

    /// Compare-and-set.
    ///
    /// Writes `value` only if the key currently holds exactly `expected`.
    /// Pass [`Expected::Absent`] to succeed only if the key doesn't exist.
    ///
    /// Returns `Ok(true)` if the write was applied and `Ok(false)` if the
    /// comparison failed, in which case the store is unchanged.
    pub fn compare_and_set(
        &self,
        key: impl Into<Key>,
        expected: impl Into<Expected>,
        value: impl AsRef<[u8]>,
    ) -> Result<bool> {
        let key = self.key(key)?;
        self.writable()?;
        let value = self.value(value)?;
        let expected = expected.into();
        let result = self.ctx.storage.compare_and_set(key.clone(), &expected, value);
        self.surface("compare_and_set", &key, result)
    }

    /// Compare-and-delete.
    ///
    /// Removes the key only if it currently holds exactly `expected`.
    ///
    /// Returns `Ok(true)` if the comparison matched and `Ok(false)` otherwise,
    /// in which case the key keeps its current value.
    ///
    /// `true` means "the comparison held", not "a value was removed":
    /// `Expected::Absent` against a missing key returns `Ok(true)` and deletes
    /// nothing. Hosts that reject an absent expectation for deletes report
    /// `false` here instead. Lock-release code should always pass the token it
    /// wrote, never `Expected::Absent`.
    ///
    /// ```
    /// # use latchdb::prelude::*;
    /// # let db = Latch::open()?;
    /// assert!(db.kv.compare_and_delete("never-set", Expected::Absent)?);
    /// assert_eq!(db.kv.get("never-set")?, None);
    /// # Ok::<(), latchdb::Error>(())
    /// ```
    pub fn compare_and_delete(
        &self,
        key: impl Into<Key>,
        expected: impl Into<Expected>,
    ) -> Result<bool> {
        let key = self.key(key)?;
        self.writable()?;
        let expected = expected.into();
        let result = self.ctx.storage.compare_and_delete(&key, &expected);
        self.surface("compare_and_delete", &key, result)
    }

    // =========================================================================
    // Additional operations
    // =========================================================================

    /// Get a value together with its write version and timestamp.
    pub fn get_versioned(&self, key: impl Into<Key>) -> Result<Option<VersionedValue>> {
        let key = self.key(key)?;
        let result = self.ctx.storage.get(&key);
        self.surface("get", &key, result)
    }

    /// Delete a key unconditionally.
    ///
    /// Returns `true` if the key existed.
    pub fn delete(&self, key: impl Into<Key>) -> Result<bool> {
        let key = self.key(key)?;
        self.writable()?;
        let result = self.ctx.storage.delete(&key);
        self.surface("delete", &key, result)
    }

    /// Check if a key exists.
    pub fn exists(&self, key: impl Into<Key>) -> Result<bool> {
        let key = self.key(key)?;
        let result = self.ctx.storage.contains(&key);
        self.surface("exists", &key, result)
    }

    /// List keys one page at a time, sorted bytewise.
    ///
    /// `page` is zero-based. The listing is not a point-in-time snapshot:
    /// keys written during the call may or may not appear.
    pub fn list_keys(&self, page: usize, per_page: usize) -> Result<Vec<Key>> {
        if per_page == 0 {
            return Err(Error::ConstraintViolation(
                "per_page must be at least 1".to_string(),
            ));
        }
        let keys = self.ctx.storage.keys().map_err(|e| {
            let e = Error::from(e);
            warn!(op = "list_keys", error = %e, "storage failure");
            e
        })?;
        Ok(keys
            .into_iter()
            .skip(page.saturating_mul(per_page))
            .take(per_page)
            .collect())
    }

    /// Delete every key.
    ///
    /// Each key is removed atomically; concurrent writers may re-create keys
    /// while the sweep runs.
    pub fn delete_all(&self) -> Result<()> {
        self.writable()?;
        self.ctx.storage.clear().map_err(|e| {
            let e = Error::from(e);
            warn!(op = "delete_all", error = %e, "storage failure");
            e
        })
    }
}

impl std::fmt::Debug for KV {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KV")
            .field("read_only", &self.ctx.options.is_read_only())
            .finish()
    }
}
