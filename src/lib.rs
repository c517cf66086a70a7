//! # Latch
//!
//! Embedded key-value store with linearizable compare-and-set primitives.
//!
//! Latch stores opaque byte values under opaque byte keys and offers two
//! conditional writes whose comparison and effect are a single atomic step.
//! That is enough to build locks, leader election and single-writer
//! guarantees on top of a shared store without a separate lock service.
//!
//! ## Quick Start
//!
//! ```
//! use latchdb::prelude::*;
//!
//! let db = Latch::open()?;
//!
//! db.kv.set("test1", "value1")?;
//! assert_eq!(db.kv.get("test1")?, Some(b"value1".to_vec()));
//!
//! // Only one caller can create a key that does not exist yet
//! assert!(db.kv.compare_and_set("leader", Expected::Absent, "node-a")?);
//! assert!(!db.kv.compare_and_set("leader", Expected::Absent, "node-b")?);
//! # Ok::<(), latchdb::Error>(())
//! ```
//!
//! ## Handles
//!
//! There is no global store. Open one with [`Latch::open`] or
//! [`Latch::builder`] and pass the handle (or a clone) to whatever needs it.
//! [`Latch::with_storage`] plugs in any backend implementing [`Storage`].
//!
//! ## Errors
//!
//! A lost compare-and-set race is `Ok(false)`, never an error. Backend
//! failures surface as [`Error::Storage`] and are never retried internally.

#![warn(missing_docs)]

mod database;
mod error;
mod primitives;
mod types;

pub mod prelude;
pub mod selfcheck;

// Re-export main entry points
pub use database::{Latch, LatchBuilder};
pub use error::{Error, Result};

// Re-export primitives
pub use primitives::KV;

// Re-export types
pub use types::*;
