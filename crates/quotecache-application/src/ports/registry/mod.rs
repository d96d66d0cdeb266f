//! Store Registry System
//!
//! Uses the `linkme` crate for compile-time registration of cache store
//! backends that are discovered and instantiated at runtime.
//!
//! ```text
//! 1. Backend defines:   #[linkme::distributed_slice(CACHE_STORES)]
//!                       static ENTRY: CacheStoreEntry = ...
//! 2. Registry declares: #[linkme::distributed_slice]
//!                       pub static CACHE_STORES: [CacheStoreEntry] = [..]
//! 3. Resolver queries:  CACHE_STORES.iter()
//! 4. Config selects:    "backend = redis" -> RedisCacheStore
//! ```
//!
//! ## Registering a store (in quotecache-providers)
//!
//! ```ignore
//! use quotecache_application::ports::registry::{CacheStoreEntry, CACHE_STORES};
//!
//! #[linkme::distributed_slice(CACHE_STORES)]
//! static MEMORY_STORE: CacheStoreEntry = CacheStoreEntry {
//!     name: "memory",
//!     description: "In-process map guarded by a mutex",
//!     factory: |_| Ok(Arc::new(InMemoryCacheStore::new())),
//! };
//! ```

pub mod cache;

pub use cache::{
    CACHE_STORES, CacheStoreConfig, CacheStoreEntry, list_cache_stores, resolve_cache_store,
};
