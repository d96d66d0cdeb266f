//! Domain Port Interfaces
//!
//! Boundary contracts implemented outside the domain. Provider crates supply
//! the implementations; the application layer depends only on these traits.

pub mod providers;

pub use providers::CacheStore;
