//! Backend storage abstraction
//!
//! `Storage` is the seam between the facade and a concrete backend. The
//! in-memory `ShardedStore` implements it; a host may supply another backend
//! (embedded database, remote transactional store) behind the same trait.

use crate::error::Result;
use crate::types::{Expected, Key};
use crate::value::VersionedValue;

/// Key/value backend with conditional writes
///
/// # Contract
///
/// - Every operation on a single key is linearizable: concurrent calls on the
///   same key behave as if executed in one total order.
/// - `compare_and_set` and `compare_and_delete` perform the comparison and the
///   effect as one indivisible step. No other operation on the key may observe
///   or apply a change in between.
/// - A lost comparison returns `Ok(false)`. `Err` is reserved for failures of
///   the backing medium and must leave the key either fully updated or
///   untouched.
/// - Keys reaching the backend have already been validated by the caller.
/// - No operation retries internally.
pub trait Storage: Send + Sync {
    /// Read the current value for a key
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn get(&self, key: &Key) -> Result<Option<VersionedValue>>;

    /// Unconditionally write a value, returning the write version
    fn put(&self, key: Key, value: Vec<u8>) -> Result<u64>;

    /// Write `value` only if the key currently matches `expected`
    ///
    /// Returns `Ok(true)` if the write was applied.
    fn compare_and_set(&self, key: Key, expected: &Expected, value: Vec<u8>) -> Result<bool>;

    /// Remove the key only if it currently matches `expected`
    ///
    /// Returns `Ok(true)` if the comparison matched. When `expected` is
    /// [`Expected::Absent`] and the key does not exist the comparison matches
    /// and there is nothing to remove.
    fn compare_and_delete(&self, key: &Key, expected: &Expected) -> Result<bool>;

    /// Unconditionally remove a key
    ///
    /// Returns `Ok(true)` if a value existed.
    fn delete(&self, key: &Key) -> Result<bool>;

    /// All keys currently stored, sorted bytewise
    ///
    /// Not a point-in-time snapshot across keys.
    fn keys(&self) -> Result<Vec<Key>>;

    /// Remove every key
    ///
    /// Each removal is atomic per key; the sweep as a whole is not.
    fn clear(&self) -> Result<()>;

    /// Check whether a key exists
    ///
    /// Default implementation uses `get()`, but backends may optimize this.
    fn contains(&self, key: &Key) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Number of stored entries
    ///
    /// Default implementation counts `keys()`.
    fn len(&self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    /// Current store-wide write version
    fn version(&self) -> u64;
}
