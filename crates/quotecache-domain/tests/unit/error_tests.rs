//! Error type tests

use quotecache_domain::Error;
use std::error::Error as _;

#[test]
fn test_error_display_includes_message() {
    let err = Error::key_build("ticker symbols must not be empty");
    assert_eq!(
        err.to_string(),
        "Cache key error: ticker symbols must not be empty"
    );
}

#[test]
fn test_backend_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = Error::backend_unavailable_with_source("GET failed", io);

    assert!(err.is_backend_unavailable());
    assert!(!err.is_contract_violation());
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("refused"));
}

#[test]
fn test_loader_error_classification() {
    let err = Error::loader("upstream 503");
    assert!(err.is_loader());
    assert!(!err.is_backend_unavailable());
}

#[test]
fn test_codec_error_from_serde() {
    let parse: Result<u32, _> = serde_json::from_str("not json");
    let err: Error = parse.unwrap_err().into();
    assert!(matches!(err, Error::Codec { .. }));
}

#[test]
fn test_ttl_policy_error_is_contract_violation() {
    assert!(Error::ttl_policy("unmapped").is_contract_violation());
    assert!(!Error::internal("bug").is_contract_violation());
}
