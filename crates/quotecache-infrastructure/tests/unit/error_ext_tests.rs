//! Error extension tests

use quotecache_domain::error::Error;
use quotecache_infrastructure::error_ext::ErrorContext;
use std::io;

fn io_failure() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
}

#[test]
fn test_context_maps_to_internal() {
    let err = io_failure().context("reading snapshot").unwrap_err();
    assert!(matches!(err, Error::Internal { .. }));
    assert!(err.to_string().contains("reading snapshot: missing"));
}

#[test]
fn test_with_context_is_lazy() {
    let ok: Result<u8, io::Error> = Ok(1);
    let value = ok
        .with_context(|| -> String { panic!("context evaluated on success") })
        .unwrap();
    assert_eq!(value, 1);

    let err = io_failure().with_context(|| "lazy").unwrap_err();
    assert!(err.to_string().contains("lazy"));
}

#[test]
fn test_io_context_keeps_source() {
    let err = io_failure().io_context("opening file").unwrap_err();
    match err {
        Error::Io { message, source } => {
            assert!(message.starts_with("opening file"));
            assert!(source.is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_and_backend_context() {
    let err = io_failure().config_context("bad config").unwrap_err();
    assert!(matches!(err, Error::Configuration { source: Some(_), .. }));

    let err = io_failure().backend_context("redis GET").unwrap_err();
    assert!(err.is_backend_unavailable());
}
