//! Main application configuration

use super::{CacheConfig, KeyConfig, LoggingConfig, SingleflightConfig};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Cache backend selection
    #[serde(default)]
    pub cache: CacheConfig,
    /// Stampede protection timings
    #[serde(default)]
    pub singleflight: SingleflightConfig,
    /// Cache key schema
    #[serde(default)]
    pub keys: KeyConfig,
}
