//! Storage layer for latch
//!
//! This crate implements the in-memory backend:
//! - ShardedStore: DashMap-based storage with per-shard locking
//! - Conditional writes whose comparison and effect share one lock acquisition
//! - Store-wide write version with AtomicU64

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod sharded;

pub use sharded::ShardedStore;
