//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns supporting the application and domain
//! layers. Store implementations live in `quotecache-providers`; this crate
//! selects one from configuration and wires it into a read-through cache.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`cache`] | Store factory over the backend registry |
//! | [`bootstrap`] | Composition root ([`AppContext`]) |
//! | [`error_ext`] | Context extension for foreign errors |
//! | [`constants`] | Configuration defaults |

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{AppContext, init_app};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
