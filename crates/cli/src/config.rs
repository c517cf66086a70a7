//! Store options from `--config` plus flag overrides.

use std::fs;
use std::path::Path;

use clap::ArgMatches;
use latchdb::{AccessMode, Latch, OpenOptions};

/// Load options from a JSON file. Missing fields take their defaults.
pub fn load_options(path: &Path) -> Result<OpenOptions, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
    serde_json::from_str(&text)
        .map_err(|e| format!("Invalid config {}: {}", path.display(), e))
}

/// Resolve options from the global flags.
pub fn resolve_options(matches: &ArgMatches) -> Result<OpenOptions, String> {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => load_options(Path::new(path))?,
        None => OpenOptions::default(),
    };

    if matches.get_flag("read-only") {
        options = options.access_mode(AccessMode::ReadOnly);
    }
    if let Some(shards) = matches.get_one::<String>("shards") {
        let shards = shards
            .parse::<usize>()
            .map_err(|e| format!("Invalid shards: {}", e))?;
        options = options.shard_amount(shards);
    }
    Ok(options)
}

/// Open the session's store.
pub fn open_database(matches: &ArgMatches) -> Result<Latch, String> {
    let options = resolve_options(matches)?;
    Latch::builder()
        .options(options)
        .open()
        .map_err(|e| format!("Failed to open database: {}", e))
}
