//! Moka in-process cache store
//!
//! Bounded concurrent cache with a per-entry expiry policy: each entry lives
//! for exactly the TTL it was written with. The conditional set goes through
//! Moka's entry API, which initializes a key at most once across concurrent
//! callers.
//!
//! ## Example
//!
//! ```ignore
//! use quotecache_providers::MokaCacheStore;
//!
//! let store = MokaCacheStore::with_capacity(10_000);
//! ```

use crate::constants::MOKA_DEFAULT_MAX_ENTRIES;
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use quotecache_application::ports::registry::{CACHE_STORES, CacheStoreConfig, CacheStoreEntry};
use quotecache_domain::error::Result;
use quotecache_domain::ports::providers::CacheStore;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredValue {
    bytes: Vec<u8>,
    ttl: Duration,
}

/// Expiry policy reading the TTL carried by each value
struct PerEntryTtl;

impl Expiry<String, StoredValue> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &StoredValue,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &StoredValue,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Moka-backed cache store
#[derive(Clone)]
pub struct MokaCacheStore {
    cache: Cache<String, StoredValue>,
    max_entries: u64,
}

impl Default for MokaCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheStore {
    /// Create a store with the default entry bound
    pub fn new() -> Self {
        Self::with_capacity(MOKA_DEFAULT_MAX_ENTRIES)
    }

    /// Create a store bounded to `max_entries`
    pub fn with_capacity(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache, max_entries }
    }

    /// Entry bound
    pub fn max_entries(&self) -> u64 {
        self.max_entries
    }
}

#[async_trait]
impl CacheStore for MokaCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.cache.get(key).await.map(|v| v.bytes))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let stored = StoredValue {
            bytes: value.to_vec(),
            ttl,
        };
        self.cache.insert(key.to_string(), stored).await;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool> {
        let entry = self
            .cache
            .entry(key.to_string())
            .or_insert_with(async {
                StoredValue {
                    bytes: value.to_vec(),
                    ttl,
                }
            })
            .await;
        Ok(entry.is_fresh())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }

    fn provider_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheStore")
            .field("max_entries", &self.max_entries)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_STORES)]
static MOKA_STORE: CacheStoreEntry = CacheStoreEntry {
    name: "moka",
    description: "Moka bounded in-process cache with per-entry expiry",
    factory: |config: &CacheStoreConfig| {
        let store = match config.max_entries {
            Some(max_entries) => MokaCacheStore::with_capacity(max_entries),
            None => MokaCacheStore::new(),
        };
        Ok(Arc::new(store))
    },
};
