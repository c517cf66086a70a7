//! Conditional Write Tests
//!
//! Tests for compare_and_set and compare_and_delete outcomes, including the
//! absent-marker and the empty-value edge cases.

use crate::*;
use latchdb::Expected;

// =============================================================================
// COMPARE-AND-SET TESTS
// =============================================================================

#[test]
fn test_cas_absent_on_missing_key_creates_it() {
    let db = create_db();

    assert!(db.kv.compare_and_set("k", Expected::Absent, "v").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_cas_absent_on_existing_key_is_rejected() {
    let db = create_db();
    db.kv.set("k", "existing").unwrap();

    assert!(!db.kv.compare_and_set("k", Expected::Absent, "v").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"existing".to_vec()));
}

#[test]
fn test_cas_absent_on_empty_value_is_rejected() {
    let db = create_db();
    db.kv.set("k", "").unwrap();

    assert!(!db.kv.compare_and_set("k", Expected::Absent, "v").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(Vec::new()));
}

#[test]
fn test_cas_matching_value_replaces() {
    let db = create_db();
    db.kv.set("k", "old").unwrap();

    assert!(db.kv.compare_and_set("k", "old", "new").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"new".to_vec()));
}

#[test]
fn test_cas_mismatched_value_leaves_store_unchanged() {
    let db = create_db();
    db.kv.set("k", "current").unwrap();
    let before = db.kv.get_versioned("k").unwrap().unwrap();

    assert!(!db.kv.compare_and_set("k", "stale", "new").unwrap());

    let after = db.kv.get_versioned("k").unwrap().unwrap();
    assert_eq!(after, before);
    assert_eq!(db.version(), 1);
}

#[test]
fn test_cas_value_on_missing_key_is_rejected() {
    let db = create_db();

    assert!(!db.kv.compare_and_set("k", "anything", "v").unwrap());
    assert!(!db.kv.compare_and_set("k", "", "v").unwrap());
    assert!(!db.kv.exists("k").unwrap());
}

#[test]
fn test_cas_empty_expected_matches_empty_value() {
    let db = create_db();
    db.kv.set("k", "").unwrap();

    assert!(db.kv.compare_and_set("k", "", "filled").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"filled".to_vec()));
}

#[test]
fn test_cas_can_write_empty_value() {
    let db = create_db();

    assert!(db.kv.compare_and_set("k", Expected::Absent, "").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(Vec::new()));
}

#[test]
fn test_cas_same_value_bumps_version() {
    let db = create_db();
    db.kv.set("k", "v").unwrap();
    let before = db.kv.get_versioned("k").unwrap().unwrap().version;

    assert!(db.kv.compare_and_set("k", "v", "v").unwrap());
    let after = db.kv.get_versioned("k").unwrap().unwrap().version;
    assert!(after > before);
}

#[test]
fn test_expected_from_option() {
    let db = create_db();

    let none: Option<Vec<u8>> = None;
    assert!(db.kv.compare_and_set("k", none, "a").unwrap());
    assert!(db.kv.compare_and_set("k", Some(b"a".to_vec()), "b").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"b".to_vec()));
}

// =============================================================================
// COMPARE-AND-DELETE TESTS
// =============================================================================

#[test]
fn test_cad_matching_value_removes() {
    let db = create_db();
    db.kv.set("k", "v").unwrap();

    assert!(db.kv.compare_and_delete("k", "v").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), None);
    assert!(db.is_empty().unwrap());
}

#[test]
fn test_cad_mismatched_value_leaves_key() {
    let db = create_db();
    db.kv.set("k", "v").unwrap();

    assert!(!db.kv.compare_and_delete("k", "other").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_cad_value_on_missing_key_is_rejected() {
    let db = create_db();
    assert!(!db.kv.compare_and_delete("k", "v").unwrap());
    assert!(!db.kv.compare_and_delete("k", "").unwrap());
}

#[test]
fn test_cad_absent_on_missing_key_matches() {
    let db = create_db();

    assert!(db.kv.compare_and_delete("k", Expected::Absent).unwrap());
    assert!(!db.kv.exists("k").unwrap());
    assert_eq!(db.version(), 0);
}

#[test]
fn test_cad_absent_on_existing_key_is_rejected() {
    let db = create_db();
    db.kv.set("k", "v").unwrap();

    assert!(!db.kv.compare_and_delete("k", Expected::Absent).unwrap());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_cad_empty_expected_removes_empty_value() {
    let db = create_db();
    db.kv.set("k", "").unwrap();

    assert!(db.kv.compare_and_delete("k", "").unwrap());
    assert!(!db.kv.exists("k").unwrap());
}

#[test]
fn test_conditional_ops_validate_key() {
    let db = create_db();
    let long = "k".repeat(151);

    assert!(db
        .kv
        .compare_and_set("", Expected::Absent, "v")
        .unwrap_err()
        .is_invalid_argument());
    assert!(db
        .kv
        .compare_and_delete(long.as_str(), "v")
        .unwrap_err()
        .is_invalid_argument());
}

// =============================================================================
// SCENARIO TESTS
// =============================================================================

#[test]
fn test_walkthrough_scenario() {
    let db = create_db();

    db.kv.set("test1", "value1").unwrap();
    assert_eq!(db.kv.get("test1").unwrap(), Some(b"value1".to_vec()));

    assert!(db.kv.compare_and_set("test1", "value1", "value2").unwrap());
    assert!(!db.kv.compare_and_delete("test1", "value1").unwrap());
    assert_eq!(db.kv.get("test1").unwrap(), Some(b"value2".to_vec()));

    assert!(db.kv.compare_and_delete("test1", "value2").unwrap());
    assert_eq!(db.kv.get("test1").unwrap(), None);
}

#[test]
fn test_lock_acquire_and_release() {
    let db = create_db();

    // Acquire
    assert!(db.kv.compare_and_set("lock", Expected::Absent, "owner-a").unwrap());
    assert!(!db.kv.compare_and_set("lock", Expected::Absent, "owner-b").unwrap());

    // Only the holder releases
    assert!(!db.kv.compare_and_delete("lock", "owner-b").unwrap());
    assert!(db.kv.compare_and_delete("lock", "owner-a").unwrap());

    // Free again
    assert!(db.kv.compare_and_set("lock", Expected::Absent, "owner-b").unwrap());
}
