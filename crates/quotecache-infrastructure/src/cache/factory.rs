//! Cache Store Factory
//!
//! Turns [`CacheConfig`] into a concrete [`CacheStore`]. Implementations live
//! in `quotecache-providers` and are looked up by name in the store registry;
//! this module only handles the mapping from configuration.

use crate::config::{CacheBackend, CacheConfig};
use quotecache_application::{CacheStoreConfig, resolve_cache_store};
use quotecache_domain::error::{Error, Result};
use quotecache_domain::CacheStore;
use std::sync::Arc;
use tracing::info;

// Referenced so the linker keeps the self-registering store implementations.
use quotecache_providers as _;

/// Factory for creating cache stores
#[derive(Debug, Clone, Copy)]
pub struct CacheStoreFactory;

impl CacheStoreFactory {
    /// Create a cache store from configuration
    ///
    /// A disabled cache yields the null store regardless of `backend`.
    pub fn create_from_config(config: &CacheConfig) -> Result<Arc<dyn CacheStore>> {
        let backend = config.effective_backend();
        let mut store_config = CacheStoreConfig::new(backend.as_str());
        match backend {
            CacheBackend::Redis => {
                let url = config.redis_url.as_deref().ok_or_else(|| {
                    Error::configuration("Redis URL is required for the redis cache backend")
                })?;
                store_config = store_config.with_uri(url);
            }
            CacheBackend::Moka => {
                store_config = store_config.with_max_entries(config.max_entries);
            }
            CacheBackend::Memory | CacheBackend::Null => {}
        }

        let store = resolve_cache_store(&store_config).map_err(Error::configuration)?;
        info!(backend = %backend, provider = store.provider_name(), "cache store created");
        Ok(store)
    }

    /// Create a pass-through store that never caches
    pub fn create_null() -> Result<Arc<dyn CacheStore>> {
        Self::create_from_config(&CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        })
    }

    /// Create a process-local in-memory store
    pub fn create_memory() -> Result<Arc<dyn CacheStore>> {
        Self::create_from_config(&CacheConfig {
            backend: CacheBackend::Memory,
            ..CacheConfig::default()
        })
    }

    /// Create a bounded Moka store
    pub fn create_moka(max_entries: u64) -> Result<Arc<dyn CacheStore>> {
        Self::create_from_config(&CacheConfig {
            backend: CacheBackend::Moka,
            max_entries,
            ..CacheConfig::default()
        })
    }
}
