//! Main database entry point for Latch.
//!
//! This module provides the `Latch` struct, the handle through which callers
//! reach the store. There is no process-wide store: each `Latch` owns (or
//! shares, when cloned) exactly one backing `Storage`.

use crate::error::{Error, Result};
use crate::primitives::KV;
use latch_core::{AccessMode, OpenOptions, Storage};
use latch_storage::ShardedStore;
use std::sync::Arc;
use tracing::debug;

/// Backend plus the options a handle was opened with.
pub(crate) struct StoreContext {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) options: OpenOptions,
}

/// The Latch database.
///
/// Create one with [`Latch::open`] or [`Latch::builder`] and pass it (or a
/// clone) to every component that needs the store. Clones share the same
/// underlying store.
///
/// # Example
///
/// ```
/// use latchdb::prelude::*;
///
/// let db = Latch::open()?;
///
/// db.kv.set("test1", "value1")?;
/// assert!(db.kv.compare_and_set("test1", "value1", "value2")?);
/// assert!(!db.kv.compare_and_delete("test1", "value1")?);
/// assert!(db.kv.compare_and_delete("test1", "value2")?);
/// assert_eq!(db.kv.get("test1")?, None);
/// # Ok::<(), latchdb::Error>(())
/// ```
#[derive(Clone)]
pub struct Latch {
    ctx: Arc<StoreContext>,

    /// Key-value operations
    pub kv: KV,
}

impl Latch {
    /// Open an in-memory store with default options.
    pub fn open() -> Result<Self> {
        Self::builder().open()
    }

    /// Open a handle over a caller-supplied backend with default options.
    ///
    /// The backend must honor the [`Storage`] contract.
    pub fn with_storage(storage: Arc<dyn Storage>) -> Result<Self> {
        Self::builder().storage(storage).open()
    }

    /// Create a builder for store configuration.
    pub fn builder() -> LatchBuilder {
        LatchBuilder::new()
    }

    fn from_context(ctx: StoreContext) -> Self {
        let ctx = Arc::new(ctx);
        Self {
            kv: KV::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// A read-only handle over the same store.
    ///
    /// Reads observe every write made through other handles; writes through
    /// the returned handle fail with [`Error::AccessDenied`].
    pub fn read_only(&self) -> Latch {
        Self::from_context(StoreContext {
            storage: Arc::clone(&self.ctx.storage),
            options: self.ctx.options.clone().access_mode(AccessMode::ReadOnly),
        })
    }

    /// Options this handle was opened with.
    pub fn options(&self) -> &OpenOptions {
        &self.ctx.options
    }

    /// Check if this handle rejects writes.
    pub fn is_read_only(&self) -> bool {
        self.ctx.options.is_read_only()
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> Result<usize> {
        self.ctx.storage.len().map_err(Error::from)
    }

    /// Check if the store holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Current store-wide write version.
    pub fn version(&self) -> u64 {
        self.ctx.storage.version()
    }
}

impl std::fmt::Debug for Latch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Latch")
            .field("options", &self.ctx.options)
            .field("version", &self.version())
            .finish()
    }
}

/// Builder for store configuration.
///
/// # Example
///
/// ```
/// use latchdb::Latch;
///
/// let db = Latch::builder()
///     .shard_amount(64)
///     .max_key_len(64)
///     .max_value_len(4096)
///     .open()?;
/// assert_eq!(db.options().shard_amount, 64);
/// # Ok::<(), latchdb::Error>(())
/// ```
pub struct LatchBuilder {
    options: OpenOptions,
    storage: Option<Arc<dyn Storage>>,
}

impl LatchBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            options: OpenOptions::default(),
            storage: None,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, options: OpenOptions) -> Self {
        self.options = options;
        self
    }

    /// Reject writes through the opened handle.
    pub fn read_only(mut self) -> Self {
        self.options = self.options.access_mode(AccessMode::ReadOnly);
        self
    }

    /// Set the number of lock shards of the in-memory backend.
    pub fn shard_amount(mut self, shards: usize) -> Self {
        self.options = self.options.shard_amount(shards);
        self
    }

    /// Set the maximum key length in bytes.
    pub fn max_key_len(mut self, len: usize) -> Self {
        self.options = self.options.max_key_len(len);
        self
    }

    /// Set the maximum value length in bytes.
    pub fn max_value_len(mut self, len: usize) -> Self {
        self.options = self.options.max_value_len(Some(len));
        self
    }

    /// Use a caller-supplied backend instead of the in-memory store.
    ///
    /// `shard_amount` is ignored for external backends.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Validate the options and open the store.
    pub fn open(self) -> Result<Latch> {
        self.options.validate()?;

        let storage = match self.storage {
            Some(storage) => storage,
            None => Arc::new(ShardedStore::with_shards(self.options.shard_amount)),
        };

        debug!(options = ?self.options, "opened store");
        Ok(Latch::from_context(StoreContext {
            storage,
            options: self.options,
        }))
    }
}

impl Default for LatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
