//! Application ports
//!
//! - **registry/** - Auto-registration system for cache store backends

/// Store registry for backend discovery by name
pub mod registry;

pub use registry::{CacheStoreConfig, CacheStoreEntry, list_cache_stores, resolve_cache_store};
