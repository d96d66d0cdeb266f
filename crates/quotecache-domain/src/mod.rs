//! # Domain Layer
//!
//! Core types for the quotecache read-through cache. Everything in this crate
//! is pure: no I/O, no runtime, no backend knowledge.
//!
//! ## Module Categories
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type shared by every layer |
//! | [`constants`] | Key grammar, TTL bands and singleflight defaults |
//! | [`value_objects`] | Cache keys, key parameters, resource classes, TTL bands |
//! | [`services`] | Pure services: [`CacheKeyBuilder`] and [`TtlPolicy`] |
//! | [`ports`] | The [`CacheStore`] port implemented by backend providers |

pub mod constants;
pub mod error;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::providers::cache::CacheStore;
pub use services::{CacheKeyBuilder, TtlPolicy};
pub use value_objects::{BarInterval, CacheKey, KeyParams, ResourceClass, Tickers, TtlBand};
