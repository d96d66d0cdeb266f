//! Read-Through Cache Use Case
//!
//! Sole entry point of the cache core. Builds the key, selects the TTL band,
//! serves hits and delegates misses to the [`SingleflightCoordinator`].
//! Encoding lives here; stores only move bytes.

use crate::codec;
use crate::metrics;
use crate::services::{LoadPath, SingleflightCoordinator, SingleflightSettings};
use quotecache_domain::{
    CacheKey, CacheKeyBuilder, CacheStore, Error, KeyParams, ResourceClass, Result, TtlBand,
    TtlPolicy,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{Span, debug, instrument, warn};

/// Read-through cache with stampede protection
#[derive(Debug, Clone)]
pub struct ReadThroughCache {
    store: Arc<dyn CacheStore>,
    keys: CacheKeyBuilder,
    ttl_policy: TtlPolicy,
    coordinator: SingleflightCoordinator,
}

impl ReadThroughCache {
    /// Create a cache over `store` with default key schema and timings
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        let coordinator = SingleflightCoordinator::new(Arc::clone(&store));
        Self {
            store,
            keys: CacheKeyBuilder::default(),
            ttl_policy: TtlPolicy::new(),
            coordinator,
        }
    }

    /// Use a custom key builder (schema version, tail limit)
    pub fn with_key_builder(mut self, keys: CacheKeyBuilder) -> Self {
        self.keys = keys;
        self
    }

    /// Use custom singleflight timings
    pub fn with_singleflight(mut self, settings: SingleflightSettings) -> Self {
        self.coordinator = SingleflightCoordinator::with_settings(Arc::clone(&self.store), settings);
        self
    }

    /// The injected store
    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    /// The key builder in use
    pub fn key_builder(&self) -> &CacheKeyBuilder {
        &self.keys
    }

    /// Singleflight timings in use
    pub fn singleflight_settings(&self) -> SingleflightSettings {
        self.coordinator.settings()
    }

    /// Key a request would be cached under
    pub fn key_for(
        &self,
        namespace: &str,
        vertical: &str,
        resource: ResourceClass,
        params: &KeyParams,
    ) -> Result<CacheKey> {
        self.keys.build(namespace, vertical, resource, params)
    }

    /// TTL band a request would be cached with
    pub fn band_for(&self, resource: ResourceClass, params: &KeyParams) -> Result<TtlBand> {
        self.ttl_policy.band_for(resource, params)
    }

    /// TTL a request would be cached with
    pub fn ttl_for(&self, resource: ResourceClass, params: &KeyParams) -> Result<Duration> {
        self.ttl_policy.ttl_for(resource, params)
    }

    /// Return the cached value for a request, loading it through `loader` on
    /// a miss.
    ///
    /// Concurrent misses for the same key share a single loader invocation.
    /// Loader errors are returned unchanged and never cached. Backend
    /// failures and undecodable entries only cost latency.
    #[instrument(
        name = "cache_fetch",
        skip_all,
        fields(namespace = %namespace, vertical = %vertical, resource = %resource, key = tracing::field::Empty)
    )]
    pub async fn fetch<T, F, Fut>(
        &self,
        namespace: &str,
        vertical: &str,
        resource: ResourceClass,
        params: &KeyParams,
        loader: F,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let key = self.keys.build(namespace, vertical, resource, params)?;
        let ttl = self.ttl_policy.ttl_for(resource, params)?;
        Span::current().record("key", key.as_str());

        if let Some(value) = self.lookup::<T>(&key).await {
            metrics::record_hit(resource);
            debug!("cache hit");
            return Ok(value);
        }
        metrics::record_miss(resource);
        debug!(ttl = ?ttl, "cache miss");

        let mut pending = Some(loader);
        let mut loaded: Option<T> = None;
        let (pending_slot, slot) = (&mut pending, &mut loaded);
        let outcome = self
            .coordinator
            .load_once(&key, ttl, move || async move {
                let loader = pending_slot
                    .take()
                    .ok_or_else(|| Error::internal("loader invoked twice"))?;
                let value = Self::timed_load(resource, loader).await?;
                let bytes = codec::encode(&value)?;
                *slot = Some(value);
                Ok(bytes)
            })
            .await?;

        if outcome.path == LoadPath::Fallback {
            metrics::record_fallback(resource);
        }
        if let Some(value) = loaded {
            return Ok(value);
        }
        match codec::decode(&outcome.bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(error = %e, path = ?outcome.path, "undecodable shared value, loading directly");
                let loader = pending
                    .take()
                    .ok_or_else(|| Error::internal("loader consumed without a value"))?;
                let value = Self::timed_load(resource, loader).await?;
                let bytes = codec::encode(&value)?;
                if let Err(e) = self.store.set(key.as_str(), &bytes, ttl).await {
                    metrics::record_backend_error("set");
                    warn!(error = %e, "cache write failed, returning loaded value");
                }
                Ok(value)
            }
        }
    }

    async fn timed_load<T, F, Fut>(resource: ResourceClass, loader: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let started = Instant::now();
        let result = loader().await;
        metrics::record_load(resource, started.elapsed());
        result
    }

    /// Drop the cached value for a request
    ///
    /// # Returns
    /// True if an entry was removed
    pub async fn invalidate(
        &self,
        namespace: &str,
        vertical: &str,
        resource: ResourceClass,
        params: &KeyParams,
    ) -> Result<bool> {
        let key = self.keys.build(namespace, vertical, resource, params)?;
        let removed = self.store.delete(key.as_str()).await?;
        debug!(key = %key, removed, "cache entry invalidated");
        Ok(removed)
    }

    /// Read and decode a cached value; failures and corrupt entries are misses
    async fn lookup<T: DeserializeOwned>(&self, key: &CacheKey) -> Option<T> {
        let bytes = match self.store.get(key.as_str()).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                metrics::record_backend_error("get");
                warn!(error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match codec::decode(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "discarding undecodable cache entry");
                if let Err(e) = self.store.delete(key.as_str()).await {
                    metrics::record_backend_error("delete");
                    warn!(error = %e, "failed to drop undecodable cache entry");
                }
                None
            }
        }
    }
}
