//! Redis store tests
//!
//! Require a live server. Run with:
//! `REDIS_URL=redis://localhost:6379 cargo test -p quotecache-providers --test unit -- --ignored`

use futures::future::join_all;
use quotecache_providers::{CacheStore, RedisCacheStore};
use std::sync::Arc;
use std::time::Duration;

fn redis_url() -> String {
    std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string())
}

fn unique_key(name: &str) -> String {
    format!("quotecache-test:{name}:{}", std::process::id())
}

#[test]
fn test_invalid_url_is_rejected() {
    assert!(RedisCacheStore::new("not a url").is_err());
}

#[tokio::test]
async fn test_unreachable_server_is_backend_unavailable() {
    let store = RedisCacheStore::new("redis://127.0.0.1:1").unwrap();
    let err = store.get("k").await.unwrap_err();
    assert!(err.is_backend_unavailable());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_roundtrip_and_expiry() {
    let store = RedisCacheStore::new(&redis_url()).unwrap();
    let key = unique_key("roundtrip");

    store.ping().await.unwrap();
    store.set(&key, b"v", Duration::from_millis(200)).await.unwrap();
    assert_eq!(store.get(&key).await.unwrap(), Some(b"v".to_vec()));

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(store.get(&key).await.unwrap(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "requires a running Redis server"]
async fn test_set_if_absent_has_single_winner() {
    let store = Arc::new(RedisCacheStore::new(&redis_url()).unwrap());
    let key = unique_key("lock");
    store.delete(&key).await.unwrap();

    let attempts = (0..16).map(|i| {
        let store = Arc::clone(&store);
        let key = key.clone();
        tokio::spawn(async move {
            store
                .set_if_absent(&key, format!("owner-{i}").as_bytes(), Duration::from_secs(5))
                .await
                .unwrap()
        })
    });
    let winners = join_all(attempts)
        .await
        .into_iter()
        .filter(|r| *r.as_ref().unwrap())
        .count();

    assert_eq!(winners, 1);
    assert!(store.delete(&key).await.unwrap());
}
