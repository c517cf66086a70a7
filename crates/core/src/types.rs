//! Key and comparison types
//!
//! - [`Key`]: Opaque byte-string identifier for an entry
//! - [`Expected`]: The value a conditional write expects to find, including
//!   the explicit "must not exist" marker

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Opaque byte-string key
///
/// Keys are compared bytewise. Construction through `From` does not validate;
/// [`Key::validate`] is called at every operation boundary so an empty or
/// oversized key is rejected before any effect is applied.
///
/// # Examples
///
/// ```
/// use latch_core::Key;
///
/// let key = Key::from("lock:leader");
/// assert_eq!(key.as_bytes(), b"lock:leader");
/// assert!(key.validate(150).is_ok());
/// assert!(Key::from("").validate(150).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(Vec<u8>);

impl Key {
    /// Create a key from raw bytes
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Key(bytes.into())
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the key, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Key length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the key has no bytes (never valid for storage)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the key is non-empty and at most `max_len` bytes
    pub fn validate(&self, max_len: usize) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::InvalidKey {
                key: self.to_string(),
                reason: "key must not be empty".to_string(),
            });
        }
        if self.0.len() > max_len {
            return Err(Error::InvalidKey {
                key: self.to_string(),
                reason: format!("key is {} bytes, limit is {}", self.0.len(), max_len),
            });
        }
        Ok(())
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.as_bytes().to_vec())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s.into_bytes())
    }
}

impl From<&[u8]> for Key {
    fn from(b: &[u8]) -> Self {
        Key(b.to_vec())
    }
}

impl From<Vec<u8>> for Key {
    fn from(b: Vec<u8>) -> Self {
        Key(b)
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for Key {
    /// UTF-8 keys print as text, anything else as lowercase hex with a `0x` prefix
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "{}", s),
            Err(_) => {
                write!(f, "0x")?;
                for b in &self.0 {
                    write!(f, "{:02x}", b)?;
                }
                Ok(())
            }
        }
    }
}

/// The state a conditional write expects to find
///
/// `Absent` means "the key must not currently exist" and only matches
/// absence. `Value(bytes)` matches a stored value with exactly those bytes;
/// an empty `Value` matches a stored empty value, never absence.
///
/// # Examples
///
/// ```
/// use latch_core::Expected;
///
/// assert!(Expected::Absent.matches(None));
/// assert!(!Expected::Absent.matches(Some(&b""[..])));
/// assert!(Expected::from("v1").matches(Some(&b"v1"[..])));
/// assert!(!Expected::from("").matches(None));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expected {
    /// The key must not exist
    Absent,
    /// The key must hold exactly these bytes
    Value(Vec<u8>),
}

impl Expected {
    /// Compare against the current state of a key
    #[inline]
    pub fn matches(&self, current: Option<&[u8]>) -> bool {
        match (self, current) {
            (Expected::Absent, None) => true,
            (Expected::Value(expected), Some(actual)) => expected.as_slice() == actual,
            _ => false,
        }
    }

    /// True for the absent-marker
    pub fn is_absent(&self) -> bool {
        matches!(self, Expected::Absent)
    }

    /// Expected bytes, `None` for the absent-marker
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Expected::Absent => None,
            Expected::Value(v) => Some(v),
        }
    }
}

impl From<Option<Vec<u8>>> for Expected {
    fn from(v: Option<Vec<u8>>) -> Self {
        match v {
            Some(bytes) => Expected::Value(bytes),
            None => Expected::Absent,
        }
    }
}

impl From<Option<&[u8]>> for Expected {
    fn from(v: Option<&[u8]>) -> Self {
        v.map(<[u8]>::to_vec).into()
    }
}

impl From<Vec<u8>> for Expected {
    fn from(v: Vec<u8>) -> Self {
        Expected::Value(v)
    }
}

impl From<&[u8]> for Expected {
    fn from(v: &[u8]) -> Self {
        Expected::Value(v.to_vec())
    }
}

impl From<&str> for Expected {
    fn from(v: &str) -> Self {
        Expected::Value(v.as_bytes().to_vec())
    }
}
