//! Redis cache store
//!
//! Shared backend for multi-process deployments. Atomicity of the conditional
//! set is delegated to the server's `SET key value NX PX ttl`, so stampede
//! protection spans every process pointed at the same Redis.
//!
//! The connection is opened lazily on first use and shared afterwards
//! through a reconnecting [`ConnectionManager`].
//!
//! ## Example
//!
//! ```ignore
//! use quotecache_providers::RedisCacheStore;
//!
//! let store = RedisCacheStore::new("redis://localhost:6379")?;
//! ```

use crate::constants::REDIS_MIN_TTL_MS;
use async_trait::async_trait;
use quotecache_application::ports::registry::{CACHE_STORES, CacheStoreConfig, CacheStoreEntry};
use quotecache_domain::error::{Error, Result};
use quotecache_domain::ports::providers::CacheStore;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;

/// Redis-backed cache store
pub struct RedisCacheStore {
    client: Client,
    connection: OnceCell<ConnectionManager>,
}

impl RedisCacheStore {
    /// Create a store for a connection URL (e.g. `redis://localhost:6379`)
    ///
    /// No connection is made until the first operation.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::backend_unavailable_with_source(
                format!("Failed to create Redis client: {e}"),
                e,
            )
        })?;

        Ok(Self {
            client,
            connection: OnceCell::new(),
        })
    }

    async fn connection(&self) -> Result<ConnectionManager> {
        self.connection
            .get_or_try_init(|| async {
                self.client.get_connection_manager().await.map_err(|e| {
                    Error::backend_unavailable_with_source(
                        format!("Failed to connect to Redis: {e}"),
                        e,
                    )
                })
            })
            .await
            .cloned()
    }
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis())
        .unwrap_or(u64::MAX)
        .max(REDIS_MIN_TTL_MS)
}

fn command_error(command: &str, e: redis::RedisError) -> Error {
    Error::backend_unavailable_with_source(format!("Redis {command} failed: {e}"), e)
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.connection().await?;
        let value: Option<Vec<u8>> = conn.get(key).await.map_err(|e| command_error("GET", e))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: () = conn
            .pset_ex(key, value, ttl_millis(ttl))
            .await
            .map_err(|e| command_error("SET", e))?;
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &[u8], ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let reply: Option<String> = redis::cmd("SET")
            .arg(key)
            .arg(value)
            .arg("NX")
            .arg("PX")
            .arg(ttl_millis(ttl))
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("SET NX", e))?;
        Ok(reply.is_some())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(key).await.map_err(|e| command_error("DEL", e))?;
        Ok(removed > 0)
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| command_error("PING", e))?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheStore")
            .field("connected", &self.connection.initialized())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

/// Factory function for creating Redis store instances.
fn redis_store_factory(config: &CacheStoreConfig) -> std::result::Result<Arc<dyn CacheStore>, String> {
    let uri = config
        .uri
        .as_deref()
        .ok_or_else(|| "redis backend requires a connection URI".to_string())?;

    let store =
        RedisCacheStore::new(uri).map_err(|e| format!("Failed to create Redis store: {e}"))?;

    Ok(Arc::new(store))
}

#[linkme::distributed_slice(CACHE_STORES)]
static REDIS_STORE: CacheStoreEntry = CacheStoreEntry {
    name: "redis",
    description: "Redis shared cache (SET NX PX locking across processes)",
    factory: redis_store_factory,
};
