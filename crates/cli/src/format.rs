//! Output formatting for the three output modes.

use serde_json::{json, Value};

use crate::state::Output;

/// How results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Redis-style annotated output
    Human,
    /// Bare values, one per line
    Raw,
    /// One JSON document per result
    Json,
}

/// Format a command result.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Human => format_human(output),
        OutputMode::Raw => format_raw(output),
        OutputMode::Json => to_json(output).to_string(),
    }
}

/// Format an error message.
pub fn format_error(message: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => json!({ "error": message }).to_string(),
        _ => format!("(error) {}", message),
    }
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Value(Some(v)) => format!("{:?}", text(v)),
        Output::Value(None) => "(nil)".to_string(),
        Output::Ok => "OK".to_string(),
        Output::Applied(true) => "(applied)".to_string(),
        Output::Applied(false) => "(not applied)".to_string(),
        Output::Deleted(b) | Output::Exists(b) => format!("(integer) {}", u8::from(*b)),
        Output::Keys(keys) if keys.is_empty() => "(empty list)".to_string(),
        Output::Keys(keys) => keys
            .iter()
            .enumerate()
            .map(|(i, k)| format!("{}) {:?}", i + 1, text(k.as_bytes())))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Check(report) => {
            let mut out = format!(
                "self-check passed: {} workers, winner {:?}, {} ms",
                report.workers,
                text(&report.winning_value),
                report.elapsed.as_millis()
            );
            for e in &report.worker_errors {
                out.push_str(&format!("\n  worker error: {}", e));
            }
            out
        }
        Output::Info(info) => {
            let limit = info
                .max_value_len
                .map(|n| n.to_string())
                .unwrap_or_else(|| "unlimited".to_string());
            [
                format!("entries:       {}", info.entries),
                format!("version:       {}", info.version),
                format!("read_only:     {}", info.read_only),
                format!("shards:        {}", info.shard_amount),
                format!("max_key_len:   {}", info.max_key_len),
                format!("max_value_len: {}", limit),
            ]
            .join("\n")
        }
    }
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Value(Some(v)) => text(v),
        Output::Value(None) | Output::Ok => String::new(),
        Output::Applied(b) | Output::Deleted(b) | Output::Exists(b) => u8::from(*b).to_string(),
        Output::Keys(keys) => keys
            .iter()
            .map(|k| text(k.as_bytes()))
            .collect::<Vec<_>>()
            .join("\n"),
        Output::Check(report) => text(&report.winning_value),
        Output::Info(_) => format_human(output),
    }
}

fn to_json(output: &Output) -> Value {
    match output {
        Output::Value(v) => json!({ "value": v.as_deref().map(text) }),
        Output::Ok => json!({ "ok": true }),
        Output::Applied(b) => json!({ "applied": b }),
        Output::Deleted(b) => json!({ "deleted": b }),
        Output::Exists(b) => json!({ "exists": b }),
        Output::Keys(keys) => {
            json!({ "keys": keys.iter().map(|k| text(k.as_bytes())).collect::<Vec<_>>() })
        }
        Output::Check(report) => json!({
            "workers": report.workers,
            "winning_value": text(&report.winning_value),
            "set_winners": report.set_winners,
            "delete_winners": report.delete_winners,
            "worker_errors": report.worker_errors,
            "elapsed_ms": report.elapsed.as_millis() as u64,
        }),
        Output::Info(info) => json!({
            "entries": info.entries,
            "version": info.version,
            "read_only": info.read_only,
            "shard_amount": info.shard_amount,
            "max_key_len": info.max_key_len,
            "max_value_len": info.max_value_len,
        }),
    }
}
