//! In-process cache store
//!
//! A `HashMap` behind a mutex. Every operation holds the lock for its full
//! duration, which makes `set_if_absent` atomic within the process. Entries
//! expire lazily: an expired entry reads as absent and is replaced by the next
//! conditional set.
//!
//! Expiry uses the tokio clock so paused-time tests can advance it.

use crate::constants::MEMORY_PURGE_THRESHOLD;
use async_trait::async_trait;
use quotecache_application::ports::registry::{CACHE_STORES, CacheStoreConfig, CacheStoreEntry};
use quotecache_domain::error::{Error, Result};
use quotecache_domain::ports::providers::CacheStore;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: Vec<u8>,
    expires_at: Instant,
}

impl Entry {
    fn new(value: &[u8], ttl: Duration) -> Self {
        Self {
            value: value.to_vec(),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Mutex-guarded in-process cache store
#[derive(Debug, Default)]
pub struct InMemoryCacheStore {
    entries: Mutex<HashMap<String, Entry>>,
}

impl InMemoryCacheStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> Result<usize> {
        let now = Instant::now();
        Ok(self.lock()?.values().filter(|e| e.is_live(now)).count())
    }

    /// Whether the store holds no live entry
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|n| n == 0)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>> {
        self.entries
            .lock()
            .map_err(|_| Error::internal("in-memory cache store mutex poisoned"))
    }

    fn insert(entries: &mut HashMap<String, Entry>, key: &str, entry: Entry) {
        if entries.len() >= MEMORY_PURGE_THRESHOLD {
            let now = Instant::now();
            entries.retain(|_, e| e.is_live(now));
        }
        entries.insert(key.to_string(), entry);
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Instant::now();
        let entries = self.lock()?;
        Ok(entries
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut entries = self.lock()?;
        Self::insert(&mut entries, key, Entry::new(value, ttl));
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        if entries.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }
        Self::insert(&mut entries, key, Entry::new(value, ttl));
        Ok(true)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        let mut entries = self.lock()?;
        Ok(entries.remove(key).is_some_and(|e| e.is_live(now)))
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

#[linkme::distributed_slice(CACHE_STORES)]
static MEMORY_STORE: CacheStoreEntry = CacheStoreEntry {
    name: "memory",
    description: "In-process map guarded by a mutex",
    factory: |_config: &CacheStoreConfig| Ok(Arc::new(InMemoryCacheStore::new())),
};
