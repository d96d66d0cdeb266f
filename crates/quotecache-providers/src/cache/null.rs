//! Null cache store
//!
//! Stores nothing. Every read misses and every conditional set succeeds, so
//! each caller becomes its own lock holder and loads directly. Used when
//! caching is disabled.

use async_trait::async_trait;
use quotecache_application::ports::registry::{CACHE_STORES, CacheStoreConfig, CacheStoreEntry};
use quotecache_domain::error::Result;
use quotecache_domain::ports::providers::CacheStore;
use std::sync::Arc;
use std::time::Duration;

/// Pass-through store that caches nothing
///
/// # Example
///
/// ```rust
/// use quotecache_providers::NullCacheStore;
///
/// let store = NullCacheStore::new();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullCacheStore;

impl NullCacheStore {
    /// Create a new null store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheStore for NullCacheStore {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<()> {
        Ok(())
    }

    async fn set_if_absent(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<bool> {
        Ok(true)
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn provider_name(&self) -> &str {
        "null"
    }
}

#[linkme::distributed_slice(CACHE_STORES)]
static NULL_STORE: CacheStoreEntry = CacheStoreEntry {
    name: "null",
    description: "Caches nothing (caching disabled)",
    factory: |_config: &CacheStoreConfig| Ok(Arc::new(NullCacheStore::new())),
};
