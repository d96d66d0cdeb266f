//! Provider ports

pub mod cache;

pub use cache::CacheStore;
