//! Cache key schema configuration

use quotecache_domain::constants::{CACHE_KEY_MAX_TAIL_LEN, CACHE_SCHEMA_VERSION};
use quotecache_domain::{CacheKeyBuilder, Result};
use serde::{Deserialize, Serialize};

/// Cache key schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Schema version segment; bump to orphan every existing entry
    pub schema_version: String,
    /// Tail length above which the tail is hashed
    pub max_tail_len: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            schema_version: CACHE_SCHEMA_VERSION.to_string(),
            max_tail_len: CACHE_KEY_MAX_TAIL_LEN,
        }
    }
}

impl KeyConfig {
    /// Build the key builder for this schema
    pub fn builder(&self) -> Result<CacheKeyBuilder> {
        CacheKeyBuilder::new(self.schema_version.clone(), self.max_tail_len)
    }
}
