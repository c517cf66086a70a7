//! KV Integration Test Suite
//!
//! Exercises the public `latchdb` surface end to end: plain reads and writes,
//! the conditional writes and their race behavior, failure surfacing from a
//! faulty backend, read-only handles and the store self-check.
//!
//! ## Running Tests
//!
//! ```bash
//! # Run all KV tests
//! cargo test --test kv
//!
//! # Run the race tests only
//! cargo test --test kv concurrency::
//! ```

use latchdb::Latch;

// Test modules
pub mod basic_ops;
pub mod conditional_ops;
pub mod read_only;
pub mod selfcheck;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Create a fresh in-memory store
pub fn create_db() -> Latch {
    Latch::open().expect("Failed to open in-memory store")
}

/// Values covering the byte-level edge cases
pub fn standard_test_values() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("ascii", b"value1".to_vec()),
        ("empty", Vec::new()),
        ("unicode", "日本語 🌍".as_bytes().to_vec()),
        ("binary", vec![0x00, 0x01, 0xFF, 0xFE]),
        ("nul_only", vec![0x00]),
        ("large", vec![b'x'; 64 * 1024]),
    ]
}
