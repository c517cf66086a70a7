//! Convenient imports for Latch.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```
//! use latchdb::prelude::*;
//!
//! let db = Latch::open()?;
//! db.kv.set("key", "value")?;
//! # Ok::<(), latchdb::Error>(())
//! ```

// Main entry point
pub use crate::database::{Latch, LatchBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Primitives
pub use crate::primitives::KV;

// Core types
pub use crate::types::{Expected, Key, VersionedValue};

// Configuration
pub use crate::types::{AccessMode, OpenOptions};
