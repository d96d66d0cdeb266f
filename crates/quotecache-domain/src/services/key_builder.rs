//! Cache key construction
//!
//! Canonicalizes request parameters into the bit-exact key grammar
//! `{namespace}:{vertical}:{schemaVersion}:{resource}:{tail}`.
//!
//! The tail joins, in fixed order and with `:` between segments:
//!
//! | Segment | Rendering |
//! |---------|-----------|
//! | tickers | upper-cased, `,`-joined (sets sorted and de-duplicated) |
//! | interval | wire value (`1m`, `1d`, ...) |
//! | window | `from` then `to`, RFC 3339 UTC |
//! | page | `p{page}` |
//! | page size | `s{page_size}` |
//! | filters | `k=v`, sorted by key |
//!
//! Tails longer than the configured limit (in characters) become `q:{hex(sha1(json))}` where
//! the JSON is the key-sorted canonical parameter set.

use crate::constants::{
    CACHE_KEY_HASH_PREFIX, CACHE_KEY_MAX_TAIL_LEN, CACHE_KEY_SEPARATOR,
    CACHE_KEY_TICKER_SEPARATOR, CACHE_SCHEMA_VERSION,
};
use crate::error::{Error, Result};
use crate::value_objects::{CacheKey, KeyParams, ResourceClass};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::collections::BTreeMap;

/// Builds deterministic cache keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKeyBuilder {
    schema_version: String,
    max_tail_len: usize,
}

impl Default for CacheKeyBuilder {
    fn default() -> Self {
        Self {
            schema_version: CACHE_SCHEMA_VERSION.to_string(),
            max_tail_len: CACHE_KEY_MAX_TAIL_LEN,
        }
    }
}

impl CacheKeyBuilder {
    /// Create a builder with an explicit schema version and tail limit
    pub fn new<S: Into<String>>(schema_version: S, max_tail_len: usize) -> Result<Self> {
        let schema_version = schema_version.into();
        validate_segment("schema version", &schema_version)?;
        if max_tail_len == 0 {
            return Err(Error::key_build("tail limit must be greater than zero"));
        }
        Ok(Self {
            schema_version,
            max_tail_len,
        })
    }

    /// Schema version segment
    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Tail length limit
    pub fn max_tail_len(&self) -> usize {
        self.max_tail_len
    }

    /// Build the cache key for one request
    pub fn build(
        &self,
        namespace: &str,
        vertical: &str,
        resource: ResourceClass,
        params: &KeyParams,
    ) -> Result<CacheKey> {
        validate_segment("namespace", namespace)?;
        validate_segment("vertical", vertical)?;

        let canonical = CanonicalParams::from_params(params)?;
        let mut tail = canonical.join();
        if tail.is_empty() {
            return Err(Error::key_build(format!(
                "resource '{resource}' requires at least one key parameter"
            )));
        }
        if tail.chars().count() > self.max_tail_len {
            tail = format!("{CACHE_KEY_HASH_PREFIX}{}", canonical.digest()?);
        }

        let key = [
            namespace,
            vertical,
            self.schema_version.as_str(),
            resource.as_tag(),
            tail.as_str(),
        ]
        .join(CACHE_KEY_SEPARATOR);
        Ok(CacheKey::from_raw(key))
    }
}

fn validate_segment(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::key_build(format!("{name} must not be empty")));
    }
    if value.contains(|c: char| c == ':' || c.is_whitespace() || c.is_control()) {
        return Err(Error::key_build(format!(
            "{name} '{value}' contains a reserved character"
        )));
    }
    Ok(())
}

fn render_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Canonical form shared by the joined tail and the hashed tail.
///
/// Field order is alphabetical so the serialized JSON is key-sorted.
#[derive(Debug, Serialize)]
struct CanonicalParams {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    filters: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interval: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    page_size: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tickers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<String>,
}

impl CanonicalParams {
    fn from_params(params: &KeyParams) -> Result<Self> {
        let tickers = params.tickers.canonical()?;

        let (from, to) = match (params.from, params.to) {
            (Some(from), Some(to)) if from > to => {
                return Err(Error::key_build("'from' must be <= 'to'"));
            }
            (Some(from), Some(to)) => (Some(render_instant(from)), Some(render_instant(to))),
            (None, None) => (None, None),
            _ => {
                return Err(Error::key_build(
                    "date window requires both 'from' and 'to'",
                ));
            }
        };

        if params.page == Some(0) {
            return Err(Error::key_build("page numbers are 1-based"));
        }
        if params.page_size == Some(0) {
            return Err(Error::key_build("page size must be greater than zero"));
        }

        let mut filters = BTreeMap::new();
        for (key, value) in &params.filters {
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            if key.is_empty() || value.is_empty() {
                return Err(Error::key_build("filters must have a name and a value"));
            }
            if key.contains(|c: char| c == ':' || c == '=') || value.contains(':') {
                return Err(Error::key_build(format!(
                    "filter '{key}' contains a reserved character"
                )));
            }
            filters.insert(key, value);
        }

        Ok(Self {
            filters,
            from,
            interval: params.interval.map(|i| i.as_wire()),
            page: params.page,
            page_size: params.page_size,
            tickers,
            to,
        })
    }

    fn join(&self) -> String {
        let mut segments: Vec<String> = Vec::new();
        if !self.tickers.is_empty() {
            segments.push(self.tickers.join(CACHE_KEY_TICKER_SEPARATOR));
        }
        if let Some(interval) = self.interval {
            segments.push(interval.to_string());
        }
        if let (Some(from), Some(to)) = (&self.from, &self.to) {
            segments.push(from.clone());
            segments.push(to.clone());
        }
        if let Some(page) = self.page {
            segments.push(format!("p{page}"));
        }
        if let Some(page_size) = self.page_size {
            segments.push(format!("s{page_size}"));
        }
        for (key, value) in &self.filters {
            segments.push(format!("{key}={value}"));
        }
        segments.join(CACHE_KEY_SEPARATOR)
    }

    fn digest(&self) -> Result<String> {
        let material = serde_json::to_string(self)?;
        Ok(hex::encode(Sha1::digest(material.as_bytes())))
    }
}
