//! Cache Store Implementations
//!
//! ## Store Selection Guide
//!
//! - **Tests / single process**: [`InMemoryCacheStore`]
//! - **Single instance, bounded memory**: [`MokaCacheStore`]
//! - **Multiple instances**: [`RedisCacheStore`] (stampede protection spans processes)
//! - **Caching disabled**: [`NullCacheStore`]

pub mod memory;
#[cfg(feature = "cache-moka")]
pub mod moka;
pub mod null;
#[cfg(feature = "cache-redis")]
pub mod redis;

pub use memory::InMemoryCacheStore;
#[cfg(feature = "cache-moka")]
pub use moka::MokaCacheStore;
pub use null::NullCacheStore;
#[cfg(feature = "cache-redis")]
pub use redis::RedisCacheStore;
