//! Cache key value object

use crate::constants::{CACHE_KEY_HASH_PREFIX, CACHE_KEY_SEPARATOR, CACHE_LOCK_SUFFIX};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic, namespaced cache key
///
/// Grammar: `{namespace}:{vertical}:{schemaVersion}:{resource}:{tail}` where
/// `tail` is the canonical parameter join or `q:{hex(sha1(json))}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);

impl CacheKey {
    /// Wrap an already-rendered key (keys read back from logs or admin tools)
    pub fn from_raw<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    /// The rendered key
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Key of the singleflight lock guarding this data key
    pub fn lock_key(&self) -> String {
        format!("{}{}", self.0, CACHE_LOCK_SUFFIX)
    }

    /// Whether the parameter tail was replaced by its content hash
    pub fn is_hashed(&self) -> bool {
        self.0
            .splitn(5, CACHE_KEY_SEPARATOR)
            .nth(4)
            .is_some_and(|tail| tail.starts_with(CACHE_KEY_HASH_PREFIX))
    }

    /// Consume the key into its string form
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
