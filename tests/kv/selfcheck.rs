//! Self-Check Tests

use crate::*;
use latchdb::selfcheck::{run, SelfCheckError, SelfCheckOptions};

#[test]
fn test_self_check_on_default_store() {
    let db = create_db();
    let report = run(&db.kv, &SelfCheckOptions::default()).unwrap();

    assert_eq!(report.set_winners, 1);
    assert_eq!(report.delete_winners, 1);
    assert!(report.worker_errors.is_empty());
    assert!(!db.kv.exists("test1").unwrap());
}

#[test]
fn test_self_check_leaves_other_keys_alone() {
    let db = create_db();
    db.kv.set("other", "keep").unwrap();

    let opts = SelfCheckOptions {
        key: "probe".into(),
        workers: 16,
    };
    run(&db.kv, &opts).unwrap();

    assert_eq!(db.kv.get("other").unwrap(), Some(b"keep".to_vec()));
    assert_eq!(db.len().unwrap(), 1);
}

#[test]
fn test_self_check_with_small_shard_count() {
    let db = Latch::builder().shard_amount(2).open().unwrap();
    assert!(run(&db.kv, &SelfCheckOptions::default()).is_ok());
}

#[test]
fn test_self_check_rejects_invalid_key() {
    let db = create_db();
    let opts = SelfCheckOptions {
        key: String::new(),
        workers: 4,
    };

    match run(&db.kv, &opts) {
        Err(SelfCheckError::Store { step, source }) => {
            assert_eq!(step, "set key");
            assert!(source.is_invalid_argument());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_self_check_runs_repeatedly() {
    let db = create_db();
    for _ in 0..5 {
        run(&db.kv, &SelfCheckOptions::default()).unwrap();
    }
    assert!(db.is_empty().unwrap());
}
