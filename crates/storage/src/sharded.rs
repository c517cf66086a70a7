//! Sharded in-memory storage
//!
//! DashMap keyed directly by [`Key`], FxHash within each shard.
//! Reads take a shard read lock, writes lock only the target shard.
//!
//! # Design
//!
//! - DashMap: 16-way sharded by default, configurable via `with_shards`
//! - FxHash: fast non-crypto hash for shard selection and lookup
//! - Conditional writes run their comparison and effect under the shard
//!   write lock of the key (entry API / `remove_if`), so no other operation
//!   on that key can interleave
//!
//! # Linearization points
//!
//! | Operation | Point |
//! |-----------|-------|
//! | get / contains | shard read lock acquired |
//! | put | shard write lock acquired |
//! | compare_and_set | shard write lock acquired via `entry()` |
//! | compare_and_delete | shard write lock acquired via `remove_if()` (read lock for `Absent`) |
//! | delete | shard write lock acquired |

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use latch_core::error::Result;
use latch_core::traits::Storage;
use latch_core::types::{Expected, Key};
use latch_core::value::VersionedValue;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

type FxBuildHasher = BuildHasherDefault<FxHasher>;

/// Sharded store - DashMap from key to versioned value
///
/// # Thread Safety
///
/// All operations are thread-safe:
/// - get(): Shard read lock only
/// - put()/delete(): Only locks the key's shard
/// - compare_and_set()/compare_and_delete(): Comparison and effect happen
///   under one shard write lock acquisition
/// - Keys in different shards never contend
///
/// # Example
///
/// ```
/// use latch_core::Expected;
/// use latch_storage::ShardedStore;
///
/// let store = ShardedStore::new();
/// assert!(store.compare_and_set("lock".into(), &Expected::Absent, b"owner-1".to_vec()));
/// assert!(!store.compare_and_set("lock".into(), &Expected::Absent, b"owner-2".to_vec()));
/// assert_eq!(store.get(&"lock".into()).unwrap().value, b"owner-1");
/// ```
pub struct ShardedStore {
    /// Entries, sharded by key hash
    data: DashMap<Key, VersionedValue, FxBuildHasher>,
    /// Store-wide write version
    version: AtomicU64,
}

impl ShardedStore {
    /// Create new sharded store with the default shard amount
    pub fn new() -> Self {
        Self {
            data: DashMap::with_hasher(FxBuildHasher::default()),
            version: AtomicU64::new(0),
        }
    }

    /// Create with an explicit shard amount
    ///
    /// `shard_amount` must be a power of two greater than 1; callers validate
    /// it through `OpenOptions::validate` first.
    pub fn with_shards(shard_amount: usize) -> Self {
        Self {
            data: DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                FxBuildHasher::default(),
                shard_amount,
            ),
            version: AtomicU64::new(0),
        }
    }

    /// Get current version
    #[inline]
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Increment version and return new value
    #[inline]
    fn next_version(&self) -> u64 {
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn stamp(&self, value: Vec<u8>) -> VersionedValue {
        VersionedValue::new(
            value,
            self.next_version(),
            chrono::Utc::now().timestamp_millis(),
        )
    }

    /// Get total number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the store holds no entries
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // ========================================================================
    // Get/Put/Delete
    // ========================================================================

    /// Get a value by key
    ///
    /// Returns a copy; the stored entry is never handed out.
    #[inline]
    pub fn get(&self, key: &Key) -> Option<VersionedValue> {
        self.data.get(key).map(|entry| entry.value().clone())
    }

    /// Put a value for a key, returning the write version
    #[inline]
    pub fn put(&self, key: Key, value: Vec<u8>) -> u64 {
        // Stamp while holding the shard lock so per-key versions stay ordered
        let entry = self.data.entry(key);
        let stamped = self.stamp(value);
        let version = stamped.version;
        entry.insert(stamped);
        version
    }

    /// Delete a key
    ///
    /// Returns the removed value if it existed.
    #[inline]
    pub fn delete(&self, key: &Key) -> Option<VersionedValue> {
        self.data.remove(key).map(|(_, v)| v)
    }

    /// Check if a key exists
    #[inline]
    pub fn contains(&self, key: &Key) -> bool {
        self.data.contains_key(key)
    }

    // ========================================================================
    // Conditional writes
    // ========================================================================

    /// Write `value` if the key currently matches `expected`
    ///
    /// The shard write lock is held from the comparison through the insert.
    /// Returns `true` if the write was applied.
    pub fn compare_and_set(&self, key: Key, expected: &Expected, value: Vec<u8>) -> bool {
        let key_len = key.len();
        let applied = match self.data.entry(key) {
            Entry::Occupied(mut occupied) => {
                if expected.matches(Some(occupied.get().value.as_slice())) {
                    occupied.insert(self.stamp(value));
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(vacant) => {
                if expected.is_absent() {
                    vacant.insert(self.stamp(value));
                    true
                } else {
                    false
                }
            }
        };

        if applied {
            trace!(key_len, "compare_and_set applied");
        } else {
            debug!(key_len, expect_absent = expected.is_absent(), "compare_and_set rejected");
        }
        applied
    }

    /// Remove the key if it currently matches `expected`
    ///
    /// Returns `true` if the comparison matched. An `Absent` expectation
    /// against an absent key matches with nothing to remove.
    pub fn compare_and_delete(&self, key: &Key, expected: &Expected) -> bool {
        let applied = match expected {
            Expected::Absent => !self.data.contains_key(key),
            Expected::Value(_) => self
                .data
                .remove_if(key, |_, current| expected.matches(Some(current.value.as_slice())))
                .is_some(),
        };

        if applied {
            trace!(key_len = key.len(), "compare_and_delete applied");
        } else {
            debug!(
                key_len = key.len(),
                expect_absent = expected.is_absent(),
                "compare_and_delete rejected"
            );
        }
        applied
    }

    // ========================================================================
    // List Operations
    // ========================================================================

    /// List all keys, sorted bytewise
    ///
    /// NOTE: Requires collect + sort, O(n log n). Not for hot paths.
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self.data.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.data.clear();
    }
}

impl Default for ShardedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ShardedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShardedStore")
            .field("entries", &self.len())
            .field("version", &self.version())
            .finish()
    }
}

impl Storage for ShardedStore {
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>> {
        Ok(ShardedStore::get(self, key))
    }

    fn put(&self, key: Key, value: Vec<u8>) -> Result<u64> {
        Ok(ShardedStore::put(self, key, value))
    }

    fn compare_and_set(&self, key: Key, expected: &Expected, value: Vec<u8>) -> Result<bool> {
        Ok(ShardedStore::compare_and_set(self, key, expected, value))
    }

    fn compare_and_delete(&self, key: &Key, expected: &Expected) -> Result<bool> {
        Ok(ShardedStore::compare_and_delete(self, key, expected))
    }

    fn delete(&self, key: &Key) -> Result<bool> {
        Ok(ShardedStore::delete(self, key).is_some())
    }

    fn keys(&self) -> Result<Vec<Key>> {
        Ok(ShardedStore::keys(self))
    }

    fn clear(&self) -> Result<()> {
        ShardedStore::clear(self);
        Ok(())
    }

    fn contains(&self, key: &Key) -> Result<bool> {
        Ok(ShardedStore::contains(self, key))
    }

    fn len(&self) -> Result<usize> {
        Ok(ShardedStore::len(self))
    }

    fn version(&self) -> u64 {
        ShardedStore::version(self)
    }
}
