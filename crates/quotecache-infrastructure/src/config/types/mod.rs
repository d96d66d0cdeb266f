//! Configuration types module

pub mod app;
pub mod cache;
pub mod keys;
pub mod logging;
pub mod singleflight;

pub use app::AppConfig;
pub use cache::{CacheBackend, CacheConfig};
pub use keys::KeyConfig;
pub use logging::LoggingConfig;
pub use singleflight::SingleflightConfig;
