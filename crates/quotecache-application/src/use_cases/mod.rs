//! Use case implementations

pub mod read_through;

pub use read_through::ReadThroughCache;
