//! TTL band selection
//!
//! Maps a resource class (and, for time series, its bar granularity) to a
//! fixed [`TtlBand`]. There is no fallback band: an unmapped combination is a
//! caller contract violation so TTL drift cannot go unnoticed.

use crate::error::{Error, Result};
use crate::value_objects::{KeyParams, ResourceClass, TtlBand};
use std::time::Duration;

/// Pure TTL policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TtlPolicy;

impl TtlPolicy {
    /// Create the policy
    pub fn new() -> Self {
        Self
    }

    /// Select the band for a request
    pub fn band_for(&self, resource: ResourceClass, params: &KeyParams) -> Result<TtlBand> {
        match resource {
            ResourceClass::LatestQuote => Ok(TtlBand::Hot),
            ResourceClass::Reference => Ok(TtlBand::Reference),
            ResourceClass::Historical => match params.interval {
                Some(interval) if interval.is_daily_or_coarser() => Ok(TtlBand::Eod),
                Some(_) => Ok(TtlBand::Intraday),
                None => Err(Error::ttl_policy(
                    "historical resources require a bar interval",
                )),
            },
        }
    }

    /// Select the TTL duration for a request
    pub fn ttl_for(&self, resource: ResourceClass, params: &KeyParams) -> Result<Duration> {
        self.band_for(resource, params).map(TtlBand::duration)
    }
}
