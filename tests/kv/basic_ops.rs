//! Basic KV Operations Tests
//!
//! Tests for get, get_versioned, set, delete, exists, list_keys, delete_all.

use crate::*;
use latchdb::Key;

// =============================================================================
// GET / SET TESTS
// =============================================================================

#[test]
fn test_set_and_get_roundtrip() {
    let db = create_db();

    db.kv.set("test1", "value1").unwrap();
    assert_eq!(db.kv.get("test1").unwrap(), Some(b"value1".to_vec()));
}

#[test]
fn test_get_nonexistent_returns_none() {
    let db = create_db();
    assert!(db.kv.get("nonexistent").unwrap().is_none());
}

#[test]
fn test_set_overwrites_existing() {
    let db = create_db();

    db.kv.set("key", "1").unwrap();
    db.kv.set("key", "2").unwrap();

    assert_eq!(db.kv.get("key").unwrap(), Some(b"2".to_vec()));
    assert_eq!(db.len().unwrap(), 1);
}

#[test]
fn test_set_all_value_shapes() {
    let db = create_db();

    for (name, value) in standard_test_values() {
        let key = format!("shape:{}", name);
        db.kv.set(key.as_str(), &value).unwrap();
        assert_eq!(
            db.kv.get(key.as_str()).unwrap(),
            Some(value),
            "Failed for value: {}",
            name
        );
    }
}

#[test]
fn test_empty_value_is_not_absent() {
    let db = create_db();

    db.kv.set("empty", "").unwrap();
    assert_eq!(db.kv.get("empty").unwrap(), Some(Vec::new()));
    assert!(db.kv.exists("empty").unwrap());
}

#[test]
fn test_binary_keys() {
    let db = create_db();
    let key: &[u8] = &[0x00, 0xFF, 0x10];

    db.kv.set(key, "v").unwrap();
    assert_eq!(db.kv.get(key).unwrap(), Some(b"v".to_vec()));
    assert_eq!(db.kv.get("\u{0}").unwrap(), None);
}

#[test]
fn test_keys_are_case_sensitive() {
    let db = create_db();

    db.kv.set("Key", "upper").unwrap();
    db.kv.set("key", "lower").unwrap();

    assert_eq!(db.kv.get("Key").unwrap(), Some(b"upper".to_vec()));
    assert_eq!(db.kv.get("key").unwrap(), Some(b"lower".to_vec()));
}

// =============================================================================
// VALIDATION TESTS
// =============================================================================

#[test]
fn test_empty_key_rejected() {
    let db = create_db();

    let err = db.kv.set("", "v").unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(db.kv.get("").unwrap_err().is_invalid_argument());
}

#[test]
fn test_key_length_limit() {
    let db = create_db();
    let at_limit = "k".repeat(150);
    let over_limit = "k".repeat(151);

    db.kv.set(at_limit.as_str(), "v").unwrap();
    assert!(db
        .kv
        .set(over_limit.as_str(), "v")
        .unwrap_err()
        .is_invalid_argument());
    assert!(db
        .kv
        .get(over_limit.as_str())
        .unwrap_err()
        .is_invalid_argument());
}

#[test]
fn test_value_length_limit() {
    let db = Latch::builder().max_value_len(4).open().unwrap();

    db.kv.set("k", "1234").unwrap();
    let err = db.kv.set("k", "12345").unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(db.kv.get("k").unwrap(), Some(b"1234".to_vec()));
}

// =============================================================================
// VERSIONED GET TESTS
// =============================================================================

#[test]
fn test_versions_increase_with_every_write() {
    let db = create_db();

    db.kv.set("a", "1").unwrap();
    db.kv.set("b", "1").unwrap();
    db.kv.set("a", "2").unwrap();

    let a = db.kv.get_versioned("a").unwrap().unwrap();
    let b = db.kv.get_versioned("b").unwrap().unwrap();
    assert_eq!(a.value, b"2");
    assert!(a.version > b.version);
    assert_eq!(db.version(), 3);
    assert!(a.timestamp >= b.timestamp);
}

#[test]
fn test_get_versioned_missing() {
    let db = create_db();
    assert!(db.kv.get_versioned("missing").unwrap().is_none());
}

// =============================================================================
// DELETE / EXISTS TESTS
// =============================================================================

#[test]
fn test_delete_existing_and_missing() {
    let db = create_db();

    db.kv.set("k", "v").unwrap();
    assert!(db.kv.delete("k").unwrap());
    assert!(!db.kv.delete("k").unwrap());
    assert!(!db.kv.exists("k").unwrap());
    assert_eq!(db.kv.get("k").unwrap(), None);
}

#[test]
fn test_delete_then_recreate() {
    let db = create_db();

    db.kv.set("k", "first").unwrap();
    db.kv.delete("k").unwrap();
    db.kv.set("k", "second").unwrap();

    assert_eq!(db.kv.get("k").unwrap(), Some(b"second".to_vec()));
}

// =============================================================================
// LISTING TESTS
// =============================================================================

#[test]
fn test_list_keys_sorted_and_paged() {
    let db = create_db();
    for key in ["c", "a", "b", "e", "d"] {
        db.kv.set(key, "x").unwrap();
    }

    assert_eq!(
        db.kv.list_keys(0, 3).unwrap(),
        vec![Key::from("a"), Key::from("b"), Key::from("c")]
    );
    assert_eq!(
        db.kv.list_keys(1, 3).unwrap(),
        vec![Key::from("d"), Key::from("e")]
    );
    assert!(db.kv.list_keys(2, 3).unwrap().is_empty());
}

#[test]
fn test_delete_all() {
    let db = create_db();
    for i in 0..10 {
        db.kv.set(format!("key{}", i), "x").unwrap();
    }

    db.kv.delete_all().unwrap();
    assert!(db.is_empty().unwrap());
    assert!(db.kv.list_keys(0, 100).unwrap().is_empty());
}
