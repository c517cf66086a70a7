//! End-to-end store self-check.
//!
//! Exercises the KV surface the way an embedding host validates its store on
//! startup: a fixed sequence of plain and conditional writes on one key,
//! followed by two races of concurrent workers that must each produce exactly
//! one winner.
//!
//! ```text
//! set(k, "value1")                      get == "value1"
//! compare_and_set(k, "value1", "value2")  applied
//! compare_and_delete(k, "value1")         rejected, get == "value2"
//! compare_and_delete(k, "value2")         applied,  get == absent
//! N x compare_and_set(k, Absent, "value{i}")   exactly one applied
//! N x compare_and_delete(k, <winner>)          exactly one applied
//! ```
//!
//! Worker failures are logged and collected in the report. They count as not
//! applied; they do not abort the race.

use crate::error::Error;
use crate::primitives::KV;
use latch_core::Expected;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Barrier;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{error, info};

/// Upper bound on [`SelfCheckOptions::workers`]; one OS thread per worker.
pub const MAX_WORKERS: usize = 10_000;

/// Options for [`run`].
#[derive(Debug, Clone)]
pub struct SelfCheckOptions {
    /// Key the check writes to. Any existing value is overwritten.
    pub key: String,
    /// Number of concurrent workers per race, `1..=MAX_WORKERS`
    pub workers: usize,
}

impl Default for SelfCheckOptions {
    fn default() -> Self {
        Self {
            key: "test1".to_string(),
            workers: 100,
        }
    }
}

/// Outcome of a successful self-check.
#[derive(Debug, Clone)]
pub struct SelfCheckReport {
    /// Workers per race
    pub workers: usize,
    /// Value written by the compare-and-set race winner
    pub winning_value: Vec<u8>,
    /// Applied compare-and-set calls in the create race
    pub set_winners: usize,
    /// Applied compare-and-delete calls in the delete race
    pub delete_winners: usize,
    /// Errors returned to workers, in completion order
    pub worker_errors: Vec<String>,
    /// Wall-clock duration of the whole check
    pub elapsed: Duration,
}

/// Self-check failures.
#[derive(Debug, thiserror::Error)]
pub enum SelfCheckError {
    /// Options cannot run a check
    #[error("invalid self-check options: {0}")]
    InvalidOptions(String),

    /// A sequential step returned an error
    #[error("failed to {step}: {source}")]
    Store {
        /// Step that failed
        step: &'static str,
        /// Error returned by the store
        #[source]
        source: Error,
    },

    /// A sequential step returned the wrong result
    #[error("{step}: {detail}")]
    Unexpected {
        /// Step that misbehaved
        step: &'static str,
        /// What was observed
        detail: String,
    },

    /// A race did not produce exactly one winner
    #[error("{phase}: expected exactly one winner, got {winners}")]
    RaceWinners {
        /// Race that failed
        phase: &'static str,
        /// Number of applied operations
        winners: usize,
    },
}

/// Run the self-check against `kv`.
///
/// Leaves `options.key` absent on success.
pub fn run(kv: &KV, options: &SelfCheckOptions) -> Result<SelfCheckReport, SelfCheckError> {
    if options.workers == 0 {
        return Err(SelfCheckError::InvalidOptions(
            "workers must be at least 1".to_string(),
        ));
    }
    if options.workers > MAX_WORKERS {
        return Err(SelfCheckError::InvalidOptions(format!(
            "workers must be at most {}, got {}",
            MAX_WORKERS, options.workers
        )));
    }

    let started = Instant::now();
    let key = options.key.as_str();

    kv.set(key, "value1").map_err(store("set key"))?;
    expect_value(kv, key, Some(&b"value1"[..]), "get after set")?;

    let applied = kv
        .compare_and_set(key, "value1", "value2")
        .map_err(store("compare and set key"))?;
    if !applied {
        return Err(unexpected(
            "compare_and_set value1 -> value2",
            "should have compared and set",
        ));
    }

    let applied = kv
        .compare_and_delete(key, "value1")
        .map_err(store("compare and delete key"))?;
    if applied {
        return Err(unexpected(
            "compare_and_delete value1",
            "should not have deleted with stale value value1",
        ));
    }
    expect_value(kv, key, Some(&b"value2"[..]), "get after rejected delete")?;

    let applied = kv
        .compare_and_delete(key, "value2")
        .map_err(store("compare and delete key"))?;
    if !applied {
        return Err(unexpected(
            "compare_and_delete value2",
            "should have deleted with current value value2",
        ));
    }
    expect_value(kv, key, None, "get after delete")?;

    let worker_errors = Mutex::new(Vec::new());

    let set_winners = race(options.workers, &worker_errors, |i| {
        kv.compare_and_set(key, Expected::Absent, format!("value{}", i))
            .map_err(|e| {
                error!(key, worker = i, error = %e, "failed to compare and set key");
                e
            })
    });
    if set_winners != 1 {
        return Err(SelfCheckError::RaceWinners {
            phase: "compare_and_set race",
            winners: set_winners,
        });
    }

    let winning_value = kv
        .get(key)
        .map_err(store("get race winner"))?
        .ok_or_else(|| unexpected("get race winner", "winning value is missing"))?;

    let delete_winners = race(options.workers, &worker_errors, |i| {
        kv.compare_and_delete(key, winning_value.as_slice())
            .map_err(|e| {
                error!(key, worker = i, error = %e, "failed to compare and delete key");
                e
            })
    });
    if delete_winners != 1 {
        return Err(SelfCheckError::RaceWinners {
            phase: "compare_and_delete race",
            winners: delete_winners,
        });
    }
    expect_value(kv, key, None, "get after delete race")?;

    let report = SelfCheckReport {
        workers: options.workers,
        winning_value,
        set_winners,
        delete_winners,
        worker_errors: worker_errors.into_inner(),
        elapsed: started.elapsed(),
    };
    info!(
        workers = report.workers,
        worker_errors = report.worker_errors.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "validated kv store"
    );
    Ok(report)
}

/// Start `workers` threads behind one barrier, wait for all, count `Ok(true)`.
fn race<F>(workers: usize, errors: &Mutex<Vec<String>>, op: F) -> usize
where
    F: Fn(usize) -> crate::Result<bool> + Sync,
{
    let barrier = Barrier::new(workers);
    let winners = AtomicUsize::new(0);

    thread::scope(|s| {
        for i in 0..workers {
            let barrier = &barrier;
            let winners = &winners;
            let op = &op;
            s.spawn(move || {
                barrier.wait();
                match op(i) {
                    Ok(true) => {
                        winners.fetch_add(1, Ordering::SeqCst);
                    }
                    Ok(false) => {}
                    Err(e) => errors.lock().push(format!("worker {}: {}", i, e)),
                }
            });
        }
    });

    winners.load(Ordering::SeqCst)
}

fn expect_value(
    kv: &KV,
    key: &str,
    expected: Option<&[u8]>,
    step: &'static str,
) -> Result<(), SelfCheckError> {
    let actual = kv.get(key).map_err(store(step))?;
    if actual.as_deref() != expected {
        return Err(unexpected(
            step,
            format!(
                "expected {}, got {}",
                describe(expected),
                describe(actual.as_deref())
            ),
        ));
    }
    Ok(())
}

fn describe(value: Option<&[u8]>) -> String {
    match value {
        Some(v) => format!("{:?}", String::from_utf8_lossy(v)),
        None => "absent".to_string(),
    }
}

fn store(step: &'static str) -> impl Fn(Error) -> SelfCheckError {
    move |source| SelfCheckError::Store { step, source }
}

fn unexpected(step: &'static str, detail: impl Into<String>) -> SelfCheckError {
    SelfCheckError::Unexpected {
        step,
        detail: detail.into(),
    }
}
