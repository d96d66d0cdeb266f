//! Application services

pub mod singleflight;

pub use singleflight::{LoadPath, Loaded, SingleflightCoordinator, SingleflightSettings};
