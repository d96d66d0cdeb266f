//! Cache Store Port
//!
//! Port for key/value cache backends. Supports an in-process mutex-guarded
//! map, Moka, Redis, and a null store that caches nothing.
//!
//! ## Atomicity
//!
//! [`CacheStore::set_if_absent`] is the one concurrency primitive the
//! singleflight protocol depends on. It must behave like Redis
//! `SET key value NX PX ttl` even when many processes share the backend.

use crate::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Cache Store Port
///
/// Defines the contract for cache backends. Values are opaque bytes; encoding
/// belongs to the caller. Every entry carries an absolute TTL and expires
/// through the backend's own mechanism.
///
/// # Implementations
///
/// - **Memory**: In-process map behind a mutex (tests, single process)
/// - **Moka**: In-process concurrent cache with per-entry expiry
/// - **Redis**: Shared store for multi-process deployments
/// - **Null**: Stores nothing; every conditional set succeeds
///
/// # Example
///
/// ```ignore
/// use quotecache_domain::ports::providers::CacheStore;
/// use std::time::Duration;
///
/// store.set("stacklion:md:v1:quote:AAPL", b"{}", Duration::from_secs(5)).await?;
/// if store.set_if_absent("stacklion:md:v1:quote:AAPL:lock", b"owner", Duration::from_secs(2)).await? {
///     // this caller owns the load
/// }
/// ```
#[async_trait]
pub trait CacheStore: Send + Sync + std::fmt::Debug {
    /// Get the bytes stored under `key`
    ///
    /// # Returns
    /// The stored value, or `None` if absent or expired
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Unconditionally store `value` under `key` with an absolute TTL
    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()>;

    /// Atomically store `value` only if `key` is absent
    ///
    /// # Returns
    /// True if this call created the entry
    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool>;

    /// Delete a key
    ///
    /// # Returns
    /// True if the key existed
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Get the name/identifier of this store implementation
    ///
    /// # Returns
    /// A string identifier (e.g., "memory", "moka", "redis", "null")
    fn provider_name(&self) -> &str;
}
