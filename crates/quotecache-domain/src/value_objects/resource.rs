//! Resource classes
//!
//! A resource class names *what* is cached (latest quotes, historical bars,
//! reference metadata). It contributes the resource segment of a cache key and
//! drives TTL band selection.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cacheable resource class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceClass {
    /// Point-in-time latest quote
    LatestQuote,
    /// Historical OHLCV bars over a date window
    Historical,
    /// Slow-moving reference metadata (exchanges, tickers, currencies)
    Reference,
}

impl ResourceClass {
    /// Every mapped resource class
    pub const ALL: [ResourceClass; 3] = [
        ResourceClass::LatestQuote,
        ResourceClass::Historical,
        ResourceClass::Reference,
    ];

    /// Resource segment rendered into cache keys
    pub const fn as_tag(self) -> &'static str {
        match self {
            ResourceClass::LatestQuote => "quote",
            ResourceClass::Historical => "hist",
            ResourceClass::Reference => "ref",
        }
    }

    /// Whether the resource is a time series keyed by bar granularity
    pub const fn is_time_series(self) -> bool {
        matches!(self, ResourceClass::Historical)
    }
}

impl fmt::Display for ResourceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

impl FromStr for ResourceClass {
    type Err = Error;

    /// Parse a key tag or its long name; unmapped classes fail fast.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quote" | "latest_quote" | "latest-quote" => Ok(ResourceClass::LatestQuote),
            "hist" | "historical" => Ok(ResourceClass::Historical),
            "ref" | "reference" => Ok(ResourceClass::Reference),
            other => Err(Error::ttl_policy(format!(
                "unmapped resource class '{other}'"
            ))),
        }
    }
}
