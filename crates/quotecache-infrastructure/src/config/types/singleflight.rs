//! Singleflight configuration types

use quotecache_application::SingleflightSettings;
use quotecache_domain::constants::{
    SINGLEFLIGHT_LOCK_TTL_MS, SINGLEFLIGHT_POLL_INTERVAL_MS, SINGLEFLIGHT_WAIT_TIMEOUT_MS,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Stampede protection timings, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SingleflightConfig {
    /// Lock marker expiry
    pub lock_ttl_ms: u64,
    /// Maximum time a waiter polls before loading on its own
    pub wait_timeout_ms: u64,
    /// Delay between polls
    pub poll_interval_ms: u64,
}

impl Default for SingleflightConfig {
    fn default() -> Self {
        Self {
            lock_ttl_ms: SINGLEFLIGHT_LOCK_TTL_MS,
            wait_timeout_ms: SINGLEFLIGHT_WAIT_TIMEOUT_MS,
            poll_interval_ms: SINGLEFLIGHT_POLL_INTERVAL_MS,
        }
    }
}

impl SingleflightConfig {
    /// Convert to coordinator settings (unvalidated)
    pub fn settings(&self) -> SingleflightSettings {
        SingleflightSettings {
            lock_ttl: Duration::from_millis(self.lock_ttl_ms),
            wait_timeout: Duration::from_millis(self.wait_timeout_ms),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }
}
