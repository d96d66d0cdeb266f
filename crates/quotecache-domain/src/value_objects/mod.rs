//! Value Objects
//!
//! Immutable types describing *what* is cached and for how long.

pub mod cache_key;
pub mod params;
pub mod resource;
pub mod ttl;

pub use cache_key::CacheKey;
pub use params::{BarInterval, KeyParams, Tickers};
pub use resource::ResourceClass;
pub use ttl::TtlBand;
