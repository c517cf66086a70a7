//! Session state: the open store and command execution.

use latchdb::selfcheck::{self, SelfCheckOptions, SelfCheckReport};
use latchdb::{Key, Latch};

use crate::parse::Request;

/// Result of a store command, before formatting.
#[derive(Debug)]
pub enum Output {
    /// `get`: the value, or `None` if absent
    Value(Option<Vec<u8>>),
    /// `set`
    Ok,
    /// `cas` / `cad`: whether the conditional write applied
    Applied(bool),
    /// `del`: whether a value existed
    Deleted(bool),
    /// `exists`
    Exists(bool),
    /// `keys`
    Keys(Vec<Key>),
    /// `check`
    Check(SelfCheckReport),
    /// `info`
    Info(StoreInfo),
}

/// Store diagnostics shown by `info`.
#[derive(Debug)]
pub struct StoreInfo {
    pub entries: usize,
    pub version: u64,
    pub read_only: bool,
    pub shard_amount: usize,
    pub max_key_len: usize,
    pub max_value_len: Option<usize>,
}

/// State carried across commands in one CLI session.
pub struct SessionState {
    db: Latch,
}

impl SessionState {
    pub fn new(db: Latch) -> Self {
        Self { db }
    }

    /// Execute one command against the session's store.
    pub fn execute(&self, request: Request) -> Result<Output, String> {
        let kv = &self.db.kv;
        let output = match request {
            Request::Get { key } => Output::Value(kv.get(key).map_err(err)?),
            Request::Set { key, value } => {
                kv.set(key, value).map_err(err)?;
                Output::Ok
            }
            Request::Cas {
                key,
                expected,
                value,
            } => Output::Applied(kv.compare_and_set(key, expected, value).map_err(err)?),
            Request::Cad { key, expected } => {
                Output::Applied(kv.compare_and_delete(key, expected).map_err(err)?)
            }
            Request::Del { key } => Output::Deleted(kv.delete(key).map_err(err)?),
            Request::Exists { key } => Output::Exists(kv.exists(key).map_err(err)?),
            Request::Keys { page, per_page } => {
                Output::Keys(kv.list_keys(page, per_page).map_err(err)?)
            }
            Request::Check { key, workers } => {
                let options = SelfCheckOptions { key, workers };
                Output::Check(selfcheck::run(kv, &options).map_err(|e| e.to_string())?)
            }
            Request::Info => {
                let options = self.db.options();
                Output::Info(StoreInfo {
                    entries: self.db.len().map_err(err)?,
                    version: self.db.version(),
                    read_only: self.db.is_read_only(),
                    shard_amount: options.shard_amount,
                    max_key_len: options.max_key_len,
                    max_value_len: options.max_value_len,
                })
            }
        };
        Ok(output)
    }
}

fn err(e: latchdb::Error) -> String {
    e.to_string()
}
