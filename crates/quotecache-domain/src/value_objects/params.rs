//! Cache key parameters
//!
//! [`KeyParams`] is the raw, caller-supplied parameter set for one request.
//! It is deliberately lenient (any case, any order); canonicalization happens
//! in [`crate::services::CacheKeyBuilder`].

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Bar granularity for historical resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BarInterval {
    /// 1-minute bars
    #[serde(rename = "1m")]
    OneMinute,
    /// 5-minute bars
    #[serde(rename = "5m")]
    FiveMinutes,
    /// 15-minute bars
    #[serde(rename = "15m")]
    FifteenMinutes,
    /// 30-minute bars
    #[serde(rename = "30m")]
    ThirtyMinutes,
    /// 1-hour bars
    #[serde(rename = "1h")]
    OneHour,
    /// 1-day (EOD) bars
    #[serde(rename = "1d")]
    OneDay,
    /// 1-week bars
    #[serde(rename = "1w")]
    OneWeek,
    /// 1-month bars
    #[serde(rename = "1mo")]
    OneMonth,
}

impl BarInterval {
    /// Canonical wire value
    pub const fn as_wire(self) -> &'static str {
        match self {
            BarInterval::OneMinute => "1m",
            BarInterval::FiveMinutes => "5m",
            BarInterval::FifteenMinutes => "15m",
            BarInterval::ThirtyMinutes => "30m",
            BarInterval::OneHour => "1h",
            BarInterval::OneDay => "1d",
            BarInterval::OneWeek => "1w",
            BarInterval::OneMonth => "1mo",
        }
    }

    /// Daily or coarser granularity (end-of-day data)
    pub const fn is_daily_or_coarser(self) -> bool {
        matches!(
            self,
            BarInterval::OneDay | BarInterval::OneWeek | BarInterval::OneMonth
        )
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for BarInterval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        // "1M" is ambiguous between minute and month; wire values are lower-case
        match s.trim() {
            "1m" => Ok(BarInterval::OneMinute),
            "5m" => Ok(BarInterval::FiveMinutes),
            "15m" => Ok(BarInterval::FifteenMinutes),
            "30m" => Ok(BarInterval::ThirtyMinutes),
            "1h" | "1H" => Ok(BarInterval::OneHour),
            "1d" | "1D" => Ok(BarInterval::OneDay),
            "1w" | "1W" => Ok(BarInterval::OneWeek),
            "1mo" | "1MO" => Ok(BarInterval::OneMonth),
            other => Err(Error::key_build(format!("unknown bar interval '{other}'"))),
        }
    }
}

/// Ticker selection of a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tickers {
    /// Unordered set: sorted and de-duplicated during canonicalization
    Set(Vec<String>),
    /// Ordered sequence: caller order is significant and kept
    Ordered(Vec<String>),
}

impl Tickers {
    /// Whether no ticker was supplied
    pub fn is_empty(&self) -> bool {
        match self {
            Tickers::Set(t) | Tickers::Ordered(t) => t.is_empty(),
        }
    }

    /// Upper-cased tickers in canonical order
    pub fn canonical(&self) -> Result<Vec<String>> {
        let raw = match self {
            Tickers::Set(t) | Tickers::Ordered(t) => t,
        };
        let mut out = Vec::with_capacity(raw.len());
        for ticker in raw {
            let symbol = ticker.trim().to_uppercase();
            if symbol.is_empty() {
                return Err(Error::key_build("ticker symbols must not be empty"));
            }
            if symbol.contains(|c: char| c == ':' || c == ',' || c == '=' || c.is_whitespace()) {
                return Err(Error::key_build(format!(
                    "ticker '{symbol}' contains a reserved character"
                )));
            }
            out.push(symbol);
        }
        if matches!(self, Tickers::Set(_)) {
            out.sort();
            out.dedup();
        }
        Ok(out)
    }
}

impl Default for Tickers {
    fn default() -> Self {
        Tickers::Set(Vec::new())
    }
}

/// Raw parameter set identifying one cacheable request
///
/// # Example
///
/// ```
/// use quotecache_domain::{BarInterval, KeyParams};
///
/// let params = KeyParams::new()
///     .with_ticker_set(["msft", "aapl"])
///     .with_interval(BarInterval::OneDay)
///     .with_page(1, 50);
/// assert_eq!(params.interval, Some(BarInterval::OneDay));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyParams {
    /// Ticker selection
    pub tickers: Tickers,
    /// Bar granularity (time-series resources)
    pub interval: Option<BarInterval>,
    /// Inclusive window start
    pub from: Option<DateTime<Utc>>,
    /// Inclusive window end
    pub to: Option<DateTime<Utc>>,
    /// 1-based page number
    pub page: Option<u32>,
    /// Page size
    pub page_size: Option<u32>,
    /// Additional enumerated filters (exchange, currency, ...)
    pub filters: BTreeMap<String, String>,
}

impl KeyParams {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an unordered set of tickers
    pub fn with_ticker_set<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Tickers::Set(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Select an ordered sequence of tickers
    pub fn with_ordered_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = Tickers::Ordered(tickers.into_iter().map(Into::into).collect());
        self
    }

    /// Set the bar interval
    pub fn with_interval(mut self, interval: BarInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// Set the date window from timestamps
    pub fn with_window(mut self, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    /// Set the date window from calendar dates (midnight UTC)
    pub fn with_date_window(self, from: NaiveDate, to: NaiveDate) -> Self {
        let from = from.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let to = to.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        self.with_window(from, to)
    }

    /// Set pagination
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }

    /// Add an enumerated filter
    pub fn with_filter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Whether the parameter set carries nothing at all
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
            && self.interval.is_none()
            && self.from.is_none()
            && self.to.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
            && self.filters.is_empty()
    }
}
