//! Public types for the Latch API.
//!
//! This module re-exports types from internal crates with a clean public interface.

// Key and comparison types
pub use latch_core::{Expected, Key};

// Stored value with write metadata
pub use latch_core::VersionedValue;

// Configuration
pub use latch_core::{AccessMode, OpenOptions};

// Backend seam and the error type backends return
pub use latch_core::Storage;
pub use latch_core::{Error as StorageError, Result as StorageResult};

// Default backend
pub use latch_storage::ShardedStore;
