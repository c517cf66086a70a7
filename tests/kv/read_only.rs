//! Read-Only Handle Tests

use crate::*;
use latchdb::{AccessMode, Expected, OpenOptions};

#[test]
fn test_read_only_handle_rejects_writes() {
    let db = create_db();
    db.kv.set("k", "v").unwrap();
    let reader = db.read_only();

    assert!(reader.kv.set("k", "w").unwrap_err().is_access_denied());
    assert!(reader
        .kv
        .compare_and_set("k", "v", "w")
        .unwrap_err()
        .is_access_denied());
    assert!(reader
        .kv
        .compare_and_delete("k", "v")
        .unwrap_err()
        .is_access_denied());
    assert!(reader.kv.delete("k").unwrap_err().is_access_denied());
    assert!(reader.kv.delete_all().unwrap_err().is_access_denied());

    assert_eq!(db.kv.get("k").unwrap(), Some(b"v".to_vec()));
}

#[test]
fn test_read_only_handle_reads() {
    let db = create_db();
    let reader = db.read_only();
    db.kv.set("k", "v").unwrap();

    assert_eq!(reader.kv.get("k").unwrap(), Some(b"v".to_vec()));
    assert!(reader.kv.exists("k").unwrap());
    assert_eq!(reader.kv.list_keys(0, 10).unwrap().len(), 1);
    assert_eq!(reader.version(), db.version());
}

#[test]
fn test_read_only_from_options() {
    let options = OpenOptions::new().access_mode(AccessMode::ReadOnly);
    let db = Latch::builder().options(options).open().unwrap();

    assert!(db.is_read_only());
    assert!(db
        .kv
        .compare_and_set("k", Expected::Absent, "v")
        .unwrap_err()
        .is_access_denied());
}

#[test]
fn test_rejected_write_checks_mode_before_comparison() {
    let db = create_db();
    let reader = db.read_only();

    // Would be a lost race on a writable handle; read-only wins
    db.kv.set("k", "v").unwrap();
    assert!(reader
        .kv
        .compare_and_set("k", Expected::Absent, "w")
        .unwrap_err()
        .is_access_denied());
}
