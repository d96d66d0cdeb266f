//! Cache key builder tests

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use quotecache_domain::constants::CACHE_KEY_MAX_TAIL_LEN;
use quotecache_domain::{BarInterval, CacheKeyBuilder, KeyParams, ResourceClass};

fn historical_params(tickers: &[&str]) -> KeyParams {
    KeyParams::new()
        .with_ticker_set(tickers.iter().copied())
        .with_interval(BarInterval::OneDay)
        .with_date_window(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        )
        .with_page(1, 50)
}

#[test]
fn test_ticker_set_order_and_case_do_not_fork_keys() {
    let builder = CacheKeyBuilder::default();

    let a = builder
        .build("stacklion", "md", ResourceClass::Historical, &historical_params(&["msft", "aapl"]))
        .unwrap();
    let b = builder
        .build("stacklion", "md", ResourceClass::Historical, &historical_params(&["AAPL", "MSFT"]))
        .unwrap();

    assert_eq!(a, b);
}

#[test]
fn test_historical_key_grammar_is_exact() {
    let key = CacheKeyBuilder::default()
        .build("stacklion", "md", ResourceClass::Historical, &historical_params(&["msft", "aapl"]))
        .unwrap();

    assert_eq!(
        key.as_str(),
        "stacklion:md:v1:hist:AAPL,MSFT:1d:2024-01-02T00:00:00Z:2024-01-31T00:00:00Z:p1:s50"
    );
    assert!(!key.is_hashed());
    assert_eq!(key.lock_key(), format!("{key}:lock"));
}

#[test]
fn test_latest_quote_key() {
    let params = KeyParams::new().with_ticker_set(["aapl"]);
    let key = CacheKeyBuilder::default()
        .build("stacklion", "md", ResourceClass::LatestQuote, &params)
        .unwrap();

    assert_eq!(key.as_str(), "stacklion:md:v1:quote:AAPL");
}

#[test]
fn test_ticker_set_is_deduplicated() {
    let builder = CacheKeyBuilder::default();
    let once = builder
        .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(["aapl"]))
        .unwrap();
    let twice = builder
        .build(
            "ns",
            "md",
            ResourceClass::LatestQuote,
            &KeyParams::new().with_ticker_set(["aapl", "AAPL"]),
        )
        .unwrap();

    assert_eq!(once, twice);
}

#[test]
fn test_ordered_tickers_keep_caller_order() {
    let builder = CacheKeyBuilder::default();
    let forward = builder
        .build(
            "ns",
            "md",
            ResourceClass::LatestQuote,
            &KeyParams::new().with_ordered_tickers(["msft", "aapl"]),
        )
        .unwrap();
    let reverse = builder
        .build(
            "ns",
            "md",
            ResourceClass::LatestQuote,
            &KeyParams::new().with_ordered_tickers(["aapl", "msft"]),
        )
        .unwrap();

    assert_eq!(forward.as_str(), "ns:md:v1:quote:MSFT,AAPL");
    assert_ne!(forward, reverse);
}

#[test]
fn test_page_and_page_size_are_tagged() {
    let builder = CacheKeyBuilder::default();
    let p1 = builder
        .build(
            "ns",
            "md",
            ResourceClass::Reference,
            &KeyParams::new().with_filter("exchange", "XNAS").with_page(1, 25),
        )
        .unwrap();
    let p25 = builder
        .build(
            "ns",
            "md",
            ResourceClass::Reference,
            &KeyParams::new().with_filter("exchange", "XNAS").with_page(25, 1),
        )
        .unwrap();

    assert_eq!(p1.as_str(), "ns:md:v1:ref:p1:s25:exchange=XNAS");
    assert_ne!(p1, p25);
}

#[test]
fn test_timestamps_render_as_utc_iso8601() {
    let from = Utc.with_ymd_and_hms(2024, 3, 1, 14, 30, 0).unwrap();
    let to = Utc.with_ymd_and_hms(2024, 3, 1, 20, 0, 0).unwrap();
    let params = KeyParams::new()
        .with_ticker_set(["aapl"])
        .with_interval(BarInterval::FiveMinutes)
        .with_window(from, to);

    let key = CacheKeyBuilder::default()
        .build("ns", "md", ResourceClass::Historical, &params)
        .unwrap();

    assert_eq!(
        key.as_str(),
        "ns:md:v1:hist:AAPL:5m:2024-03-01T14:30:00Z:2024-03-01T20:00:00Z"
    );
}

#[test]
fn test_long_tail_is_hashed() {
    let tickers: Vec<String> = (0..60).map(|i| format!("tkr{i}")).collect();
    let params = KeyParams::new()
        .with_ticker_set(tickers)
        .with_interval(BarInterval::OneDay);

    let key = CacheKeyBuilder::default()
        .build("ns", "md", ResourceClass::Historical, &params)
        .unwrap();

    assert!(key.is_hashed());
    let tail = key.as_str().strip_prefix("ns:md:v1:hist:q:").unwrap();
    assert_eq!(tail.len(), 40);
    assert!(tail.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_tail_at_limit_is_not_hashed() {
    let builder = CacheKeyBuilder::new("v1", 9).unwrap();
    let key = builder
        .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(["aapl", "msft"]))
        .unwrap();
    assert_eq!(key.as_str(), "ns:md:v1:quote:AAPL,MSFT");

    let hashed = builder
        .build(
            "ns",
            "md",
            ResourceClass::LatestQuote,
            &KeyParams::new().with_ticker_set(["aapl", "msft", "goog"]),
        )
        .unwrap();
    assert!(hashed.is_hashed());
}

#[test]
fn test_tail_limit_counts_characters() {
    let builder = CacheKeyBuilder::new("v1", 9).unwrap();
    // "city=Zürich" is 11 characters
    let key = builder
        .build("ns", "md", ResourceClass::Reference, &KeyParams::new().with_filter("city", "Zürich"))
        .unwrap();
    assert!(key.is_hashed());

    // "c=Zürich" is 8 characters but 9 bytes
    let key = builder
        .build("ns", "md", ResourceClass::Reference, &KeyParams::new().with_filter("c", "Zürich"))
        .unwrap();
    assert_eq!(key.as_str(), "ns:md:v1:ref:c=Zürich");
}

#[test]
fn test_ticker_cannot_mimic_a_filter_segment() {
    let builder = CacheKeyBuilder::default();

    let err = builder
        .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(["1=x"]))
        .unwrap_err();
    assert!(err.is_contract_violation());

    let filtered = builder
        .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_filter("1", "X"))
        .unwrap();
    assert_eq!(filtered.as_str(), "ns:md:v1:quote:1=X");
}

#[test]
fn test_schema_version_is_embedded() {
    let builder = CacheKeyBuilder::new("v2", CACHE_KEY_MAX_TAIL_LEN).unwrap();
    let key = builder
        .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(["aapl"]))
        .unwrap();
    assert_eq!(key.as_str(), "ns:md:v2:quote:AAPL");
}

#[test]
fn test_invalid_parameters_are_rejected() {
    let builder = CacheKeyBuilder::default();
    let quote = KeyParams::new().with_ticker_set(["aapl"]);

    let cases = vec![
        builder.build("", "md", ResourceClass::LatestQuote, &quote),
        builder.build("ns", " ", ResourceClass::LatestQuote, &quote),
        builder.build("stacklion:md", "md", ResourceClass::LatestQuote, &quote),
        builder.build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new()),
        builder.build(
            "ns",
            "md",
            ResourceClass::LatestQuote,
            &KeyParams::new().with_ticker_set(["aapl", "  "]),
        ),
        builder.build(
            "ns",
            "md",
            ResourceClass::Reference,
            &KeyParams::new().with_page(0, 10),
        ),
        builder.build(
            "ns",
            "md",
            ResourceClass::Historical,
            &KeyParams::new().with_ticker_set(["aapl"]).with_date_window(
                NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            ),
        ),
    ];

    for result in cases {
        let err = result.unwrap_err();
        assert!(err.is_contract_violation(), "unexpected error: {err}");
    }
}

#[test]
fn test_half_open_window_is_rejected() {
    let mut params = KeyParams::new().with_ticker_set(["aapl"]);
    params.from = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());

    let result = CacheKeyBuilder::default().build("ns", "md", ResourceClass::Historical, &params);
    assert!(result.is_err());
}

#[test]
fn test_builder_rejects_zero_limit() {
    assert!(CacheKeyBuilder::new("v1", 0).is_err());
    assert!(CacheKeyBuilder::new("", 10).is_err());
}

proptest! {
    #[test]
    fn prop_ticker_permutation_and_case_yield_identical_keys(
        tickers in prop::collection::vec("[a-z]{1,5}", 1..12),
        seed in any::<u64>(),
    ) {
        let builder = CacheKeyBuilder::default();
        let mut shuffled: Vec<String> = tickers.iter().map(|t| t.to_uppercase()).collect();
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);

        let a = builder
            .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(tickers.clone()))
            .unwrap();
        let b = builder
            .build("ns", "md", ResourceClass::LatestQuote, &KeyParams::new().with_ticker_set(shuffled))
            .unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_hashed_keys_ignore_input_order(
        tickers in prop::collection::vec("[a-z]{4,6}", 40..60),
        filters in prop::collection::btree_map("[a-z]{3,8}", "[A-Z0-9]{1,6}", 0..5),
    ) {
        let builder = CacheKeyBuilder::default();
        let mut forward = KeyParams::new()
            .with_ticker_set(tickers.clone())
            .with_interval(BarInterval::OneHour)
            .with_page(3, 100);
        for (k, v) in &filters {
            forward = forward.with_filter(k.clone(), v.clone());
        }

        let mut reversed_tickers = tickers.clone();
        reversed_tickers.reverse();
        let mut backward = KeyParams::new()
            .with_page(3, 100)
            .with_interval(BarInterval::OneHour)
            .with_ticker_set(reversed_tickers);
        for (k, v) in filters.iter().rev() {
            backward = backward.with_filter(k.clone(), v.clone());
        }

        let a = builder.build("ns", "md", ResourceClass::Historical, &forward).unwrap();
        let b = builder.build("ns", "md", ResourceClass::Historical, &backward).unwrap();
        prop_assert!(a.is_hashed());
        prop_assert_eq!(a, b);
    }
}
