//! Cache configuration types

use crate::constants::DEFAULT_CACHE_MAX_ENTRIES;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cache store backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// In-process map guarded by a mutex
    #[default]
    Memory,
    /// Bounded in-process cache (Moka)
    Moka,
    /// Shared cache (Redis)
    Redis,
    /// No caching
    Null,
}

impl CacheBackend {
    /// Registry name of the backend
    pub const fn as_str(self) -> &'static str {
        match self {
            CacheBackend::Memory => "memory",
            CacheBackend::Moka => "moka",
            CacheBackend::Redis => "redis",
            CacheBackend::Null => "null",
        }
    }
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache enabled; when false the null store is used
    pub enabled: bool,

    /// Store backend
    pub backend: CacheBackend,

    /// Redis URL (required for the Redis backend)
    pub redis_url: Option<String>,

    /// Entry bound for the Moka backend
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackend::default(),
            redis_url: None,
            max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}

impl CacheConfig {
    /// Backend actually used, taking `enabled` into account
    pub fn effective_backend(&self) -> CacheBackend {
        if self.enabled {
            self.backend
        } else {
            CacheBackend::Null
        }
    }
}
