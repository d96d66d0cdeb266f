//! Cache telemetry
//!
//! Thin wrappers over the `metrics` facade. No recorder is installed here;
//! without one every call is a no-op.

use metrics::{counter, histogram};
use quotecache_domain::ResourceClass;
use std::time::Duration;

/// Cache hits, labelled by resource
pub const CACHE_HITS_TOTAL: &str = "quotecache_cache_hits_total";
/// Cache misses, labelled by resource
pub const CACHE_MISSES_TOTAL: &str = "quotecache_cache_misses_total";
/// Swallowed backend failures, labelled by store operation
pub const BACKEND_ERRORS_TOTAL: &str = "quotecache_backend_errors_total";
/// Upstream loader invocations, labelled by resource
pub const LOADER_CALLS_TOTAL: &str = "quotecache_loader_calls_total";
/// Loads performed after the wait timeout, labelled by resource
pub const FALLBACK_LOADS_TOTAL: &str = "quotecache_fallback_loads_total";
/// Upstream loader latency in seconds, labelled by resource
pub const LOADER_DURATION_SECONDS: &str = "quotecache_loader_duration_seconds";

/// Record a cache hit
pub fn record_hit(resource: ResourceClass) {
    counter!(CACHE_HITS_TOTAL, "resource" => resource.as_tag()).increment(1);
}

/// Record a cache miss
pub fn record_miss(resource: ResourceClass) {
    counter!(CACHE_MISSES_TOTAL, "resource" => resource.as_tag()).increment(1);
}

/// Record a backend failure that was swallowed (fail-open)
pub fn record_backend_error(op: &'static str) {
    counter!(BACKEND_ERRORS_TOTAL, "op" => op).increment(1);
}

/// Record one upstream load and its latency
pub fn record_load(resource: ResourceClass, elapsed: Duration) {
    counter!(LOADER_CALLS_TOTAL, "resource" => resource.as_tag()).increment(1);
    histogram!(LOADER_DURATION_SECONDS, "resource" => resource.as_tag())
        .record(elapsed.as_secs_f64());
}

/// Record a load performed without the lock after the wait timeout
pub fn record_fallback(resource: ResourceClass) {
    counter!(FALLBACK_LOADS_TOTAL, "resource" => resource.as_tag()).increment(1);
}
