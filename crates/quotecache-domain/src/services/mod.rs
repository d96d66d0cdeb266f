//! Pure domain services

pub mod key_builder;
pub mod ttl_policy;

pub use key_builder::CacheKeyBuilder;
pub use ttl_policy::TtlPolicy;
