//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed source error carried by infrastructure-facing variants
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for quotecache
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid or empty key parameters (caller contract violation)
    #[error("Cache key error: {message}")]
    KeyBuild {
        /// Description of the offending parameter
        message: String,
    },

    /// Resource class that has no TTL band mapping
    #[error("TTL policy error: {message}")]
    TtlPolicy {
        /// Description of the unmapped resource or parameter
        message: String,
    },

    /// The cache backend could not be reached or rejected the operation
    #[error("Cache backend unavailable: {message}")]
    BackendUnavailable {
        /// Description of the failed backend operation
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// The upstream loader failed
    #[error("Loader error: {message}")]
    Loader {
        /// Description of the upstream failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Value encoding or decoding error at the cache boundary
    #[error("Cache codec error: {source}")]
    Codec {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<BoxError>,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Caller contract errors
impl Error {
    /// Create a key build error
    pub fn key_build<S: Into<String>>(message: S) -> Self {
        Self::KeyBuild {
            message: message.into(),
        }
    }

    /// Create a TTL policy error
    pub fn ttl_policy<S: Into<String>>(message: S) -> Self {
        Self::TtlPolicy {
            message: message.into(),
        }
    }
}

// Backend and loader errors
impl Error {
    /// Create a backend unavailable error
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Create a backend unavailable error with source
    pub fn backend_unavailable_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::BackendUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a loader error
    pub fn loader<S: Into<String>>(message: S) -> Self {
        Self::Loader {
            message: message.into(),
            source: None,
        }
    }

    /// Create a loader error wrapping an upstream error
    pub fn loader_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Loader {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Configuration and internal errors
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification
impl Error {
    /// Whether this error came from the cache backend (fail-open candidates)
    pub fn is_backend_unavailable(&self) -> bool {
        matches!(self, Self::BackendUnavailable { .. })
    }

    /// Whether this error came from the upstream loader
    pub fn is_loader(&self) -> bool {
        matches!(self, Self::Loader { .. })
    }

    /// Whether this error is a caller contract violation
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, Self::KeyBuild { .. } | Self::TtlPolicy { .. })
    }
}
