//! Application Layer - quotecache
//!
//! Orchestrates the pure domain services (key building, TTL banding) and the
//! [`CacheStore`](quotecache_domain::CacheStore) port into a read-through
//! cache with cache-stampede protection.
//!
//! ## Components
//!
//! | Component | Role |
//! |-----------|------|
//! | [`SingleflightCoordinator`] | At most one concurrent loader per key, via the store's atomic conditional set |
//! | [`ReadThroughCache`] | `fetch` entry point: key, TTL, lookup, load-once, encode/decode |
//! | [`codec`] | JSON value codec at the cache boundary |
//! | [`ports::registry`] | Auto-registration of cache store backends |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `quotecache-domain`: value objects, pure services and the store port
//! - Pure Rust libraries for async timers, serialization and telemetry facades

pub mod codec;
pub mod metrics;
pub mod ports;
pub mod services;
pub mod use_cases;

pub use ports::registry::{
    CacheStoreConfig, CacheStoreEntry, list_cache_stores, resolve_cache_store,
};
pub use services::{LoadPath, Loaded, SingleflightCoordinator, SingleflightSettings};
pub use use_cases::ReadThroughCache;
