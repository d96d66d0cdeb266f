//! Singleflight coordinator tests

use crate::support::{Calls, FailingStore};
use futures::future::join_all;
use quotecache_application::{LoadPath, SingleflightCoordinator, SingleflightSettings};
use quotecache_domain::{CacheKey, CacheStore, Error};
use quotecache_providers::InMemoryCacheStore;
use std::sync::Arc;
use std::time::Duration;

fn settings(wait_ms: u64) -> SingleflightSettings {
    SingleflightSettings::new(
        Duration::from_secs(1),
        Duration::from_millis(wait_ms),
        Duration::from_millis(5),
    )
    .unwrap()
}

fn key() -> CacheKey {
    CacheKey::from_raw("stacklion:md:v1:quote:AAPL")
}

const TTL: Duration = Duration::from_secs(5);

#[test]
fn test_settings_validation() {
    assert!(SingleflightSettings::default().validate().is_ok());

    let zero = SingleflightSettings::new(Duration::ZERO, Duration::from_millis(10), Duration::from_millis(1));
    assert!(zero.is_err());

    let slow_poll = SingleflightSettings::new(
        Duration::from_secs(1),
        Duration::from_millis(10),
        Duration::from_millis(20),
    );
    assert!(slow_poll.is_err());
}

#[tokio::test]
async fn test_cached_value_skips_loader() {
    let store = Arc::new(InMemoryCacheStore::new());
    store.set(key().as_str(), b"cached", TTL).await.unwrap();
    let coordinator = SingleflightCoordinator::with_settings(store, settings(100));
    let calls = Calls::default();

    let loaded = coordinator
        .load_once(&key(), TTL, || async {
            calls.hit();
            Ok(b"fresh".to_vec())
        })
        .await
        .unwrap();

    assert_eq!(loaded.bytes, b"cached");
    assert_eq!(loaded.path, LoadPath::Recheck);
    assert_eq!(calls.count(), 0);
}

#[tokio::test]
async fn test_owner_loads_and_writes() {
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = SingleflightCoordinator::with_settings(store.clone(), settings(100));

    let loaded = coordinator
        .load_once(&key(), TTL, || async { Ok(b"fresh".to_vec()) })
        .await
        .unwrap();

    assert_eq!(loaded.path, LoadPath::Owner);
    assert!(loaded.path.invoked_loader());
    assert_eq!(store.get(key().as_str()).await.unwrap(), Some(b"fresh".to_vec()));
    assert!(store.get(&key().lock_key()).await.unwrap().is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_misses_collapse_into_one_load() {
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = Arc::new(SingleflightCoordinator::with_settings(store, settings(500)));
    let calls = Calls::default();

    let callers = (0..16).map(|_| {
        let coordinator = Arc::clone(&coordinator);
        let calls = calls.clone();
        tokio::spawn(async move {
            coordinator
                .load_once(&key(), TTL, || async move {
                    calls.hit();
                    tokio::time::sleep(Duration::from_millis(10)).await;
                    Ok(b"value".to_vec())
                })
                .await
                .unwrap()
        })
    });
    let results: Vec<_> = join_all(callers)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();

    assert_eq!(calls.count(), 1);
    assert!(results.iter().all(|r| r.bytes == b"value"));
    let owners = results.iter().filter(|r| r.path == LoadPath::Owner).count();
    assert_eq!(owners, 1);
    assert!(results.iter().all(|r| r.path != LoadPath::Fallback));
}

#[tokio::test(start_paused = true)]
async fn test_ghost_lock_falls_back_after_wait_timeout() {
    let store = Arc::new(InMemoryCacheStore::new());
    store
        .set(&key().lock_key(), b"ghost", Duration::from_secs(60))
        .await
        .unwrap();
    let coordinator = SingleflightCoordinator::with_settings(store.clone(), settings(100));
    let calls = Calls::default();

    let started = tokio::time::Instant::now();
    let loaded = coordinator
        .load_once(&key(), TTL, || async {
            calls.hit();
            Ok(b"fallback".to_vec())
        })
        .await
        .unwrap();

    assert_eq!(loaded.path, LoadPath::Fallback);
    assert_eq!(calls.count(), 1);
    assert!(started.elapsed() >= Duration::from_millis(100));
    assert_eq!(store.get(key().as_str()).await.unwrap(), Some(b"fallback".to_vec()));
}

#[tokio::test(start_paused = true)]
async fn test_waiter_picks_up_value_written_by_holder() {
    let store = Arc::new(InMemoryCacheStore::new());
    store
        .set(&key().lock_key(), b"holder", Duration::from_secs(1))
        .await
        .unwrap();

    let writer = {
        let store = store.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(30)).await;
            store.set(key().as_str(), b"from-holder", TTL).await.unwrap();
        })
    };

    let coordinator = SingleflightCoordinator::with_settings(store, settings(500));
    let calls = Calls::default();
    let loaded = coordinator
        .load_once(&key(), TTL, || async {
            calls.hit();
            Ok(b"unused".to_vec())
        })
        .await
        .unwrap();
    writer.await.unwrap();

    assert_eq!(loaded.path, LoadPath::Waited);
    assert_eq!(loaded.bytes, b"from-holder");
    assert_eq!(calls.count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_lock_lost_mid_load_allows_second_load() {
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = Arc::new(SingleflightCoordinator::with_settings(store.clone(), settings(500)));
    let calls = Calls::default();

    let (started_tx, started_rx) = tokio::sync::oneshot::channel::<()>();
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();

    let first = {
        let coordinator = Arc::clone(&coordinator);
        let calls = calls.clone();
        tokio::spawn(async move {
            coordinator
                .load_once(&key(), TTL, || async move {
                    calls.hit();
                    let _ = started_tx.send(());
                    let _ = release_rx.await;
                    Ok(b"first".to_vec())
                })
                .await
        })
    };

    started_rx.await.unwrap();
    assert!(store.delete(&key().lock_key()).await.unwrap());

    let second = coordinator
        .load_once(&key(), TTL, || async {
            calls.hit();
            Ok(b"second".to_vec())
        })
        .await
        .unwrap();
    release_tx.send(()).unwrap();
    let first = first.await.unwrap().unwrap();

    assert_eq!(second.path, LoadPath::Owner);
    assert_eq!(first.path, LoadPath::Owner);
    assert_eq!(calls.count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_cancelled_holder_does_not_block_waiters() {
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = Arc::new(SingleflightCoordinator::with_settings(store.clone(), settings(100)));

    let stuck = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move {
            coordinator
                .load_once(&key(), TTL, || async {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(b"never".to_vec())
                })
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(1)).await;
    assert!(store.get(&key().lock_key()).await.unwrap().is_some());
    stuck.abort();

    let loaded = coordinator
        .load_once(&key(), TTL, || async { Ok(b"recovered".to_vec()) })
        .await
        .unwrap();

    assert_eq!(loaded.path, LoadPath::Fallback);
    assert_eq!(loaded.bytes, b"recovered");
}

#[tokio::test]
async fn test_loader_error_propagates_and_is_not_cached() {
    let store = Arc::new(InMemoryCacheStore::new());
    let coordinator = SingleflightCoordinator::with_settings(store.clone(), settings(100));

    let err = coordinator
        .load_once(&key(), TTL, || async { Err(Error::loader("upstream 503")) })
        .await
        .unwrap_err();

    assert!(err.is_loader());
    assert_eq!(store.get(key().as_str()).await.unwrap(), None);
}

#[tokio::test]
async fn test_backend_outage_fails_open() {
    let coordinator = SingleflightCoordinator::with_settings(Arc::new(FailingStore), settings(100));
    let calls = Calls::default();

    let loaded = coordinator
        .load_once(&key(), TTL, || async {
            calls.hit();
            Ok(b"direct".to_vec())
        })
        .await
        .unwrap();

    assert_eq!(loaded.bytes, b"direct");
    assert_eq!(loaded.path, LoadPath::Owner);
    assert_eq!(calls.count(), 1);
}
