//! Domain layer constants
//!
//! Contains constants that are part of the cache contract (key grammar, TTL
//! bands, singleflight defaults). Infrastructure-specific constants remain in
//! `quotecache_infrastructure::constants`.

// ============================================================================
// CACHE KEY CONSTANTS
// ============================================================================

/// Schema version segment embedded in every cache key
pub const CACHE_SCHEMA_VERSION: &str = "v1";

/// Separator between key segments
pub const CACHE_KEY_SEPARATOR: &str = ":";

/// Separator between tickers inside the ticker segment
pub const CACHE_KEY_TICKER_SEPARATOR: &str = ",";

/// Maximum length, in characters, of the canonical parameter tail before it is hashed
pub const CACHE_KEY_MAX_TAIL_LEN: usize = 200;

/// Prefix of a hashed parameter tail (`q:{hex(sha1(json))}`)
pub const CACHE_KEY_HASH_PREFIX: &str = "q:";

/// Suffix appended to a data key to form its singleflight lock key
pub const CACHE_LOCK_SUFFIX: &str = ":lock";

// ============================================================================
// TTL BAND CONSTANTS
// ============================================================================

/// HOT band: latest-snapshot data such as last quotes
pub const TTL_HOT_SECS: u64 = 5;

/// INTRADAY band: recent sub-daily bar windows
pub const TTL_INTRADAY_SECS: u64 = 30;

/// EOD band: daily-or-coarser historical windows
pub const TTL_EOD_SECS: u64 = 300;

/// REFERENCE band: slow-moving metadata
pub const TTL_REFERENCE_SECS: u64 = 3600;

// ============================================================================
// SINGLEFLIGHT CONSTANTS
// ============================================================================

/// Lifetime of a singleflight lock marker
pub const SINGLEFLIGHT_LOCK_TTL_MS: u64 = 2_000;

/// How long a waiting caller polls before falling back to its own load
pub const SINGLEFLIGHT_WAIT_TIMEOUT_MS: u64 = 750;

/// Delay between polls while another caller holds the lock
pub const SINGLEFLIGHT_POLL_INTERVAL_MS: u64 = 10;
