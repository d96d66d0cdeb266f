//! Value codec at the cache boundary
//!
//! Stores move opaque bytes; the orchestrator owns the encoding. Values are
//! serialized as JSON.

use quotecache_domain::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Encode a value for storage
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a stored value
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}
