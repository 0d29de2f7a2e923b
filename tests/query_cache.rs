use eventdeck::cache::{FetchStatus, QueryCache};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn settle<T: Clone + Send + 'static>(cache: &QueryCache<T>, key: &str) -> Option<T> {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        if let Some(entry) = cache.entry(key) {
            match entry.status {
                FetchStatus::Ready => return entry.data,
                FetchStatus::Failed(_) => return entry.data,
                FetchStatus::Loading => {}
            }
        }
        assert!(Instant::now() < deadline, "fetch did not settle");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
#[serial]
fn concurrent_requests_for_one_key_hit_the_loader_once() {
    let ctx = eframe::egui::Context::default();
    let cache: QueryCache<usize> = QueryCache::new();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..8 {
        let calls = Arc::clone(&calls);
        cache.request(&ctx, "users?page=1&search=ana", move || {
            calls.fetch_add(1, Ordering::SeqCst);
            std::thread::sleep(Duration::from_millis(40));
            Ok(1)
        });
    }
    settle(&cache, "users?page=1&search=ana");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn mutation_protocol_invalidates_then_refetches_fresh_data() {
    let ctx = eframe::egui::Context::default();
    let cache: QueryCache<Vec<&'static str>> = QueryCache::new();
    let key = "users?page=1";

    cache.request(&ctx, key, || Ok(vec!["ana"]));
    assert_eq!(settle(&cache, key), Some(vec!["ana"]));

    // A successful add invalidates the collection; the next render
    // refetches under the same query state and sees the new record.
    cache.invalidate();
    assert!(cache.entry(key).is_none());
    cache.request(&ctx, key, || Ok(vec!["ana", "bruno"]));
    assert_eq!(settle(&cache, key), Some(vec!["ana", "bruno"]));
}

#[test]
#[serial]
fn each_response_lands_under_its_own_key() {
    let ctx = eframe::egui::Context::default();
    let cache: QueryCache<u32> = QueryCache::new();

    // The slow page-1 response resolves after page 2 was requested; it must
    // not clobber the page-2 slot.
    cache.request(&ctx, "events?page=1", || {
        std::thread::sleep(Duration::from_millis(60));
        Ok(1)
    });
    cache.request(&ctx, "events?page=2", || Ok(2));

    assert_eq!(settle(&cache, "events?page=2"), Some(2));
    assert_eq!(settle(&cache, "events?page=1"), Some(1));
    assert_eq!(cache.entry("events?page=2").unwrap().data, Some(2));
}

#[test]
fn failed_fetch_reports_and_recovers_via_refetch() {
    let ctx = eframe::egui::Context::default();
    let cache: QueryCache<u32> = QueryCache::new();
    cache.request(&ctx, "resources?page=1", || {
        anyhow::bail!("request failed: connection refused")
    });
    let entry = {
        settle(&cache, "resources?page=1");
        cache.entry("resources?page=1").unwrap()
    };
    match entry.status {
        FetchStatus::Failed(message) => assert!(message.contains("connection refused")),
        other => panic!("expected failure, got {other:?}"),
    }

    cache.refetch(&ctx, "resources?page=1", || Ok(10));
    assert_eq!(settle(&cache, "resources?page=1"), Some(10));
}
