//! Application bootstrap
//!
//! Composition root: configuration in, a ready [`ReadThroughCache`] out.
//!
//! ```text
//! AppConfig → CacheStoreFactory → Arc<dyn CacheStore> → ReadThroughCache
//!                   ↑
//!             linkme registry
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let quote: Quote = context
//!     .cache()
//!     .fetch("stacklion", "md", ResourceClass::LatestQuote, &params, || fetch_upstream())
//!     .await?;
//! ```

use crate::cache::CacheStoreFactory;
use crate::config::AppConfig;
use crate::logging::log_health_check;
use quotecache_application::ReadThroughCache;
use quotecache_domain::CacheStore;
use quotecache_domain::error::Result;
use std::sync::Arc;
use tracing::info;

/// Application context holding the configured cache
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,
    store: Arc<dyn CacheStore>,
    cache: ReadThroughCache,
}

impl AppContext {
    /// The configured store
    pub fn store(&self) -> Arc<dyn CacheStore> {
        Arc::clone(&self.store)
    }

    /// The read-through cache
    pub fn cache(&self) -> &ReadThroughCache {
        &self.cache
    }

    /// Round-trip to the backend
    pub async fn health_check(&self) -> Result<()> {
        let component = self.store.provider_name();
        match self.store.ping().await {
            Ok(()) => {
                log_health_check(component, true, None);
                Ok(())
            }
            Err(e) => {
                log_health_check(component, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }
}

/// Build the application context from configuration
///
/// Validates timings and key schema, resolves the store and wires the
/// read-through cache.
pub fn init_app(config: AppConfig) -> Result<AppContext> {
    info!("Initializing application context");

    let config = Arc::new(config);

    let settings = config.singleflight.settings();
    settings.validate()?;
    let keys = config.keys.builder()?;

    let store = CacheStoreFactory::create_from_config(&config.cache)?;
    let cache = ReadThroughCache::new(Arc::clone(&store))
        .with_key_builder(keys)
        .with_singleflight(settings);

    info!(
        backend = store.provider_name(),
        schema_version = cache.key_builder().schema_version(),
        "Application context ready"
    );

    Ok(AppContext {
        config,
        store,
        cache,
    })
}
