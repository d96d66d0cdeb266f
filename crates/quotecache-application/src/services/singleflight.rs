//! Singleflight coordination
//!
//! Collapses concurrent cache misses for one key into a single upstream load
//! using only the store's atomic conditional set.
//!
//! ## Protocol
//!
//! 1. Re-check the data key; return on hit.
//! 2. `set_if_absent("{key}:lock", owner, lock_ttl)`.
//!    - acquired: re-check once more, run the loader, write the value.
//!    - not acquired: poll the data key every `poll_interval` until a value
//!      appears or `wait_timeout` elapses.
//! 3. After `wait_timeout` the waiter loads and writes on its own without
//!    retrying the lock.
//!
//! The lock is never deleted. It expires through its own TTL, so a crashed or
//! cancelled holder costs waiters at most `wait_timeout` and never deadlocks
//! them.
//!
//! Backend failures fail open: a failed read is a miss, a failed lock attempt
//! is treated as acquired and a failed write is logged and dropped.

use crate::metrics;
use quotecache_domain::constants::{
    SINGLEFLIGHT_LOCK_TTL_MS, SINGLEFLIGHT_POLL_INTERVAL_MS, SINGLEFLIGHT_WAIT_TIMEOUT_MS,
};
use quotecache_domain::{CacheKey, CacheStore, Error, Result};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Timing parameters of the lock/wait protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleflightSettings {
    /// Expiry of the lock marker
    pub lock_ttl: Duration,
    /// Upper bound a waiter polls before loading on its own
    pub wait_timeout: Duration,
    /// Delay between two polls of the data key
    pub poll_interval: Duration,
}

impl Default for SingleflightSettings {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_millis(SINGLEFLIGHT_LOCK_TTL_MS),
            wait_timeout: Duration::from_millis(SINGLEFLIGHT_WAIT_TIMEOUT_MS),
            poll_interval: Duration::from_millis(SINGLEFLIGHT_POLL_INTERVAL_MS),
        }
    }
}

impl SingleflightSettings {
    /// Create validated settings
    pub fn new(lock_ttl: Duration, wait_timeout: Duration, poll_interval: Duration) -> Result<Self> {
        let settings = Self {
            lock_ttl,
            wait_timeout,
            poll_interval,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Reject zero durations and a poll interval longer than the wait
    pub fn validate(&self) -> Result<()> {
        if self.lock_ttl.is_zero() || self.wait_timeout.is_zero() || self.poll_interval.is_zero() {
            return Err(Error::configuration(
                "singleflight durations must be greater than zero",
            ));
        }
        if self.poll_interval > self.wait_timeout {
            return Err(Error::configuration(
                "singleflight poll interval must not exceed the wait timeout",
            ));
        }
        Ok(())
    }
}

/// How a value was obtained by [`SingleflightCoordinator::load_once`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPath {
    /// Found by a re-check before or right after taking the lock
    Recheck,
    /// Loaded by this caller as lock holder
    Owner,
    /// Written by another caller while this one waited
    Waited,
    /// Loaded by this caller after the wait timeout, without the lock
    Fallback,
}

impl LoadPath {
    /// Whether this caller invoked the loader
    pub fn invoked_loader(self) -> bool {
        matches!(self, LoadPath::Owner | LoadPath::Fallback)
    }
}

/// Encoded value returned by the coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
    /// Encoded value
    pub bytes: Vec<u8>,
    /// How it was obtained
    pub path: LoadPath,
}

impl Loaded {
    fn new(bytes: Vec<u8>, path: LoadPath) -> Self {
        Self { bytes, path }
    }
}

/// Per-key mutual exclusion over a shared [`CacheStore`]
#[derive(Debug, Clone)]
pub struct SingleflightCoordinator {
    store: Arc<dyn CacheStore>,
    settings: SingleflightSettings,
}

impl SingleflightCoordinator {
    /// Create a coordinator with default timings
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_settings(store, SingleflightSettings::default())
    }

    /// Create a coordinator with explicit timings
    pub fn with_settings(store: Arc<dyn CacheStore>, settings: SingleflightSettings) -> Self {
        Self { store, settings }
    }

    /// Protocol timings
    pub fn settings(&self) -> SingleflightSettings {
        self.settings
    }

    /// Return the value for `key`, invoking `loader` at most once per lock
    /// period across all callers sharing the store.
    ///
    /// Loader errors are returned to this caller only and nothing is cached.
    pub async fn load_once<F, Fut>(&self, key: &CacheKey, ttl: Duration, loader: F) -> Result<Loaded>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>>>,
    {
        if let Some(bytes) = self.probe(key).await {
            return Ok(Loaded::new(bytes, LoadPath::Recheck));
        }

        if self.try_lock(key).await {
            if let Some(bytes) = self.probe(key).await {
                debug!(key = %key, "value appeared between miss and lock acquisition");
                return Ok(Loaded::new(bytes, LoadPath::Recheck));
            }
            let bytes = self.load_and_store(key, ttl, loader).await?;
            return Ok(Loaded::new(bytes, LoadPath::Owner));
        }

        if let Some(bytes) = self.wait_for_value(key).await {
            return Ok(Loaded::new(bytes, LoadPath::Waited));
        }

        warn!(
            key = %key,
            wait_timeout = ?self.settings.wait_timeout,
            "singleflight wait timed out, loading without the lock"
        );
        let bytes = self.load_and_store(key, ttl, loader).await?;
        Ok(Loaded::new(bytes, LoadPath::Fallback))
    }

    /// Read the data key; a backend failure counts as a miss
    async fn probe(&self, key: &CacheKey) -> Option<Vec<u8>> {
        match self.store.get(key.as_str()).await {
            Ok(value) => value,
            Err(e) => {
                metrics::record_backend_error("get");
                warn!(key = %key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    /// Attempt to become the loader for `key`
    async fn try_lock(&self, key: &CacheKey) -> bool {
        let lock_key = key.lock_key();
        let owner = uuid::Uuid::new_v4().to_string();
        match self
            .store
            .set_if_absent(&lock_key, owner.as_bytes(), self.settings.lock_ttl)
            .await
        {
            Ok(acquired) => {
                debug!(lock = %lock_key, acquired, "singleflight lock attempt");
                acquired
            }
            Err(e) => {
                metrics::record_backend_error("set_if_absent");
                warn!(lock = %lock_key, error = %e, "lock acquisition failed, loading unprotected");
                true
            }
        }
    }

    /// Poll the data key until a value appears or the wait bound elapses
    async fn wait_for_value(&self, key: &CacheKey) -> Option<Vec<u8>> {
        let deadline = Instant::now() + self.settings.wait_timeout;
        loop {
            let now = Instant::now();
            if now >= deadline {
                return None;
            }
            tokio::time::sleep(self.settings.poll_interval.min(deadline - now)).await;
            if let Some(bytes) = self.probe(key).await {
                return Some(bytes);
            }
        }
    }

    async fn load_and_store<F, Fut>(&self, key: &CacheKey, ttl: Duration, loader: F) -> Result<Vec<u8>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<u8>>>,
    {
        let bytes = loader().await?;
        if let Err(e) = self.store.set(key.as_str(), &bytes, ttl).await {
            metrics::record_backend_error("set");
            warn!(key = %key, error = %e, "cache write failed, returning loaded value");
        }
        Ok(bytes)
    }
}
