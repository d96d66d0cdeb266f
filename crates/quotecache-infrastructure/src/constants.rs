//! Infrastructure layer constants
//!
//! Domain constants (TTL bands, key grammar, singleflight timings) live in
//! `quotecache_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "quotecache.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "quotecache";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "QUOTECACHE";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "QUOTECACHE_LOG";

/// File name stem for rolling log files
pub const LOG_FILE_STEM: &str = "quotecache";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default entry bound for bounded in-process stores
pub const DEFAULT_CACHE_MAX_ENTRIES: u64 = 100_000;

/// Default namespace segment of cache keys
pub const DEFAULT_CACHE_NAMESPACE: &str = "stacklion";

/// Default vertical segment of cache keys
pub const DEFAULT_CACHE_VERTICAL: &str = "md";
