//! Primitive wrappers for the unified API.

mod kv;

pub use kv::KV;
