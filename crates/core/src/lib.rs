//! Core types for latch
//!
//! This crate defines the fundamental types shared by every layer:
//! - [`Key`]: Opaque, non-empty byte-string key
//! - [`Expected`]: Explicit absent-marker for conditional writes
//! - [`VersionedValue`]: Stored value plus write metadata
//! - [`Storage`]: Backend trait every store implementation provides
//! - [`OpenOptions`]: Store configuration
//! - [`Error`]: Internal error type

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod traits;
pub mod types;
pub mod value;

pub use config::{AccessMode, OpenOptions};
pub use error::{Error, Result};
pub use traits::Storage;
pub use types::{Expected, Key};
pub use value::VersionedValue;
