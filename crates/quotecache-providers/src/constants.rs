//! Store-specific constants

// ============================================================================
// IN-PROCESS STORE CONSTANTS
// ============================================================================

/// Entry count above which the in-memory store sweeps expired entries on write
pub const MEMORY_PURGE_THRESHOLD: usize = 10_000;

/// Default entry bound of the Moka store
pub const MOKA_DEFAULT_MAX_ENTRIES: u64 = 100_000;

// ============================================================================
// REDIS STORE CONSTANTS
// ============================================================================

/// Smallest expiry sent to Redis (`PX 0` is rejected by the server)
pub const REDIS_MIN_TTL_MS: u64 = 1;
