//! # quotecache
//!
//! Read-through cache for market-data lookups. Deterministic keys, TTLs from
//! fixed volatility bands, and singleflight protection so a burst of
//! identical misses costs one upstream call.
//!
//! ## Example
//!
//! ```ignore
//! use quotecache::{ConfigLoader, KeyParams, ResourceClass, init_app};
//!
//! let context = init_app(ConfigLoader::new().load()?)?;
//! let params = KeyParams::new().with_ticker_set(["AAPL", "MSFT"]);
//! let quotes: Vec<Quote> = context
//!     .cache()
//!     .fetch("stacklion", "md", ResourceClass::LatestQuote, &params, || async {
//!         upstream.latest_quotes(&["AAPL", "MSFT"]).await
//!             .map_err(|e| quotecache::Error::loader_with_source("quotes", e))
//!     })
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - keys, TTL bands, the `CacheStore` port, the error type
//! - `application` - singleflight coordinator and the read-through use case
//! - `providers` - memory, Moka, Redis and null stores
//! - `infrastructure` - configuration, logging, store factory, bootstrap

/// Domain layer - keys, TTL policy, store port and errors
pub mod domain {
    pub use quotecache_domain::*;
}

/// Application layer - singleflight and read-through orchestration
pub mod application {
    pub use quotecache_application::*;
}

/// Store implementations
pub mod providers {
    pub use quotecache_providers::*;
}

/// Infrastructure layer - configuration, logging and bootstrap
pub mod infrastructure {
    pub use quotecache_infrastructure::*;
}

pub mod cli;

pub use domain::*;

pub use application::{LoadPath, ReadThroughCache, SingleflightSettings};
pub use infrastructure::{AppConfig, AppContext, ConfigLoader, init_app};
