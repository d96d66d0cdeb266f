//! # quotecache - Cache Store Implementations
//!
//! Each store implements the [`CacheStore`] port defined in
//! `quotecache-domain` and registers itself in the application layer's
//! store registry.
//!
//! | Store | Scope | Atomic conditional set |
//! |-------|-------|------------------------|
//! | [`InMemoryCacheStore`] | single process | mutex-guarded map |
//! | [`MokaCacheStore`] | single process | Moka entry API |
//! | [`RedisCacheStore`] | shared | native `SET NX PX` |
//! | [`NullCacheStore`] | none | always succeeds |
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! quotecache-providers = { version = "0.1", default-features = false, features = ["cache-redis"] }
//! ```

pub use quotecache_domain::ports::providers::CacheStore;
pub use quotecache_domain::{Error, Result};

/// Store-specific constants
pub mod constants;

/// Cache store implementations
pub mod cache;

pub use cache::{InMemoryCacheStore, NullCacheStore};
#[cfg(feature = "cache-moka")]
pub use cache::MokaCacheStore;
#[cfg(feature = "cache-redis")]
pub use cache::RedisCacheStore;
