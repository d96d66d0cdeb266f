//! TTL bands
//!
//! Freshness is chosen per volatility class, never per call. Calling code can
//! reason about freshness through these named bands instead of raw numbers.

use crate::constants::{TTL_EOD_SECS, TTL_HOT_SECS, TTL_INTRADAY_SECS, TTL_REFERENCE_SECS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Named, fixed time-to-live band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TtlBand {
    /// Latest-snapshot data (seconds)
    Hot,
    /// Recent sub-daily windows (tens of seconds)
    Intraday,
    /// Daily-or-coarser historical windows (minutes)
    Eod,
    /// Slow-moving metadata (an hour)
    Reference,
}

impl TtlBand {
    /// Every band, shortest first
    pub const ALL: [TtlBand; 4] = [
        TtlBand::Hot,
        TtlBand::Intraday,
        TtlBand::Eod,
        TtlBand::Reference,
    ];

    /// HOT band duration
    pub const HOT: Duration = Duration::from_secs(TTL_HOT_SECS);
    /// INTRADAY band duration
    pub const INTRADAY: Duration = Duration::from_secs(TTL_INTRADAY_SECS);
    /// EOD band duration
    pub const EOD: Duration = Duration::from_secs(TTL_EOD_SECS);
    /// REFERENCE band duration
    pub const REFERENCE: Duration = Duration::from_secs(TTL_REFERENCE_SECS);

    /// The fixed duration of this band
    pub const fn duration(self) -> Duration {
        match self {
            TtlBand::Hot => Self::HOT,
            TtlBand::Intraday => Self::INTRADAY,
            TtlBand::Eod => Self::EOD,
            TtlBand::Reference => Self::REFERENCE,
        }
    }

    /// Upper-case band name as used in logs
    pub const fn as_str(self) -> &'static str {
        match self {
            TtlBand::Hot => "HOT",
            TtlBand::Intraday => "INTRADAY",
            TtlBand::Eod => "EOD",
            TtlBand::Reference => "REFERENCE",
        }
    }
}

impl fmt::Display for TtlBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
