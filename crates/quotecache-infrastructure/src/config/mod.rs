//! Configuration
//!
//! Layered configuration: built-in defaults, then `quotecache.toml`, then
//! `QUOTECACHE__*` environment variables.

pub mod loader;
pub mod types;

pub use loader::{ConfigBuilder, ConfigLoader, validate_app_config};
pub use types::{
    AppConfig, CacheBackend, CacheConfig, KeyConfig, LoggingConfig, SingleflightConfig,
};
