//! Cache Store Registry
//!
//! Backends register themselves in the [`CACHE_STORES`] distributed slice and
//! are resolved by name from configuration. There is no environment sniffing:
//! the backend name is always an explicit configuration value.

use quotecache_domain::CacheStore;
use std::sync::Arc;

/// Configuration for cache store creation
///
/// Stores use what they need and ignore the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStoreConfig {
    /// Backend name (e.g., "memory", "moka", "redis", "null")
    pub provider: String,
    /// Connection URI (networked backends)
    pub uri: Option<String>,
    /// Maximum entry count (bounded in-process backends)
    pub max_entries: Option<u64>,
}

impl CacheStoreConfig {
    /// Create a new config with the given backend name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the entry bound
    pub fn with_max_entries(mut self, max_entries: u64) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}

/// Registry entry for cache stores
pub struct CacheStoreEntry {
    /// Unique backend name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create a store instance
    pub factory: fn(&CacheStoreConfig) -> Result<Arc<dyn CacheStore>, String>,
}

#[linkme::distributed_slice]
pub static CACHE_STORES: [CacheStoreEntry] = [..];

/// Resolve a cache store by name from the registry
///
/// # Returns
/// * `Ok(Arc<dyn CacheStore>)` - Created store instance
/// * `Err(String)` - Unknown backend or factory failure
pub fn resolve_cache_store(config: &CacheStoreConfig) -> Result<Arc<dyn CacheStore>, String> {
    let name = config.provider.as_str();

    if let Some(entry) = CACHE_STORES.iter().find(|e| e.name == name) {
        return (entry.factory)(config);
    }

    let available: Vec<&str> = CACHE_STORES.iter().map(|e| e.name).collect();
    Err(format!(
        "Unknown cache backend '{name}'. Available backends: {available:?}"
    ))
}

/// List all registered cache stores as `(name, description)` pairs
pub fn list_cache_stores() -> Vec<(&'static str, &'static str)> {
    let mut stores: Vec<_> = CACHE_STORES.iter().map(|e| (e.name, e.description)).collect();
    stores.sort_unstable_by_key(|(name, _)| *name);
    stores
}
