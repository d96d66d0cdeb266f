//! Cache store wiring

pub mod factory;

pub use factory::CacheStoreFactory;
