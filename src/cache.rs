use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

/// State of one cached request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Cached response for one query descriptor. The previous payload is kept
/// while a refetch for the same key is in flight so the view keeps showing
/// the last resolved page instead of flickering to empty.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: Option<T>,
    pub status: FetchStatus,
    pub fetched_at: Option<Instant>,
}

/// Key-value store mapping a query descriptor to its fetched state. Requests
/// for a key that is already loading or resolved are deduplicated, so at most
/// one round-trip is outstanding per key. Responses are always written under
/// the key they were requested for, which makes a slow superseded response
/// harmless: it fills a key nothing renders anymore.
pub struct QueryCache<T> {
    entries: Arc<Mutex<HashMap<String, CacheEntry<T>>>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QueryCache<T> {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<T: Clone + Send + 'static> QueryCache<T> {
    /// Snapshot of the entry for `key`, if any.
    pub fn entry(&self, key: &str) -> Option<CacheEntry<T>> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Ensure `key` is resolved: a missing or failed-and-retried entry marks
    /// itself loading and spawns one worker; anything already loading or
    /// ready is left alone.
    pub fn request(
        &self,
        ctx: &eframe::egui::Context,
        key: &str,
        loader: impl FnOnce() -> anyhow::Result<T> + Send + 'static,
    ) {
        {
            let mut entries = match self.entries.lock() {
                Ok(entries) => entries,
                Err(_) => return,
            };
            match entries.get(key).map(|entry| entry.status.clone()) {
                Some(FetchStatus::Loading) | Some(FetchStatus::Ready) => return,
                Some(FetchStatus::Failed(_)) => return,
                None => {}
            }
            entries.insert(
                key.to_string(),
                CacheEntry {
                    data: None,
                    status: FetchStatus::Loading,
                    fetched_at: None,
                },
            );
        }
        self.spawn_fetch(ctx, key, loader);
    }

    /// Re-run the loader for `key` regardless of its current state, keeping
    /// any previous payload visible while the new one is in flight. Used by
    /// the retry affordance on a failed list and for background refreshes.
    pub fn refetch(
        &self,
        ctx: &eframe::egui::Context,
        key: &str,
        loader: impl FnOnce() -> anyhow::Result<T> + Send + 'static,
    ) {
        {
            let mut entries = match self.entries.lock() {
                Ok(entries) => entries,
                Err(_) => return,
            };
            let previous = entries.get(key).and_then(|entry| entry.data.clone());
            if matches!(
                entries.get(key).map(|entry| &entry.status),
                Some(FetchStatus::Loading)
            ) {
                return;
            }
            entries.insert(
                key.to_string(),
                CacheEntry {
                    data: previous,
                    status: FetchStatus::Loading,
                    fetched_at: None,
                },
            );
        }
        self.spawn_fetch(ctx, key, loader);
    }

    fn spawn_fetch(
        &self,
        ctx: &eframe::egui::Context,
        key: &str,
        loader: impl FnOnce() -> anyhow::Result<T> + Send + 'static,
    ) {
        let entries = Arc::clone(&self.entries);
        let key = key.to_string();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let outcome = loader();
            if let Ok(mut entries) = entries.lock() {
                let entry = match outcome {
                    Ok(data) => CacheEntry {
                        data: Some(data),
                        status: FetchStatus::Ready,
                        fetched_at: Some(Instant::now()),
                    },
                    Err(err) => {
                        tracing::warn!(%key, "fetch failed: {err:#}");
                        let previous = entries.get(&key).and_then(|entry| entry.data.clone());
                        CacheEntry {
                            data: previous,
                            status: FetchStatus::Failed(format!("{err:#}")),
                            fetched_at: None,
                        }
                    }
                };
                entries.insert(key, entry);
            }
            ctx.request_repaint();
        });
    }

    /// Drop every key, forcing the next render to refetch with the current
    /// query state. Called after a successful mutation of this resource.
    pub fn invalidate(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }

    pub fn invalidate_key(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn wait_until_settled<T: Clone + Send + 'static>(
        cache: &QueryCache<T>,
        key: &str,
    ) -> CacheEntry<T> {
        let deadline = Instant::now() + Duration::from_secs(2);
        loop {
            if let Some(entry) = cache.entry(key) {
                if entry.status != FetchStatus::Loading {
                    return entry;
                }
            }
            assert!(Instant::now() < deadline, "fetch did not settle in time");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn request_resolves_and_caches() {
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        cache.request(&ctx, "users?page=1", || Ok(7));
        let entry = wait_until_settled(&cache, "users?page=1");
        assert_eq!(entry.status, FetchStatus::Ready);
        assert_eq!(entry.data, Some(7));
        assert!(entry.fetched_at.is_some());
    }

    #[test]
    fn identical_keys_share_one_round_trip() {
        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        for _ in 0..5 {
            cache.request(&ctx, "events?page=1", || {
                CALLS.fetch_add(1, Ordering::SeqCst);
                std::thread::sleep(Duration::from_millis(50));
                Ok(1)
            });
        }
        wait_until_settled(&cache, "events?page=1");
        // Resolved entries are also not refetched.
        cache.request(&ctx, "events?page=1", || {
            CALLS.fetch_add(1, Ordering::SeqCst);
            Ok(2)
        });
        std::thread::sleep(Duration::from_millis(50));
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn distinct_keys_fetch_independently() {
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        cache.request(&ctx, "users?page=1", || Ok(1));
        cache.request(&ctx, "users?page=2", || Ok(2));
        assert_eq!(wait_until_settled(&cache, "users?page=1").data, Some(1));
        assert_eq!(wait_until_settled(&cache, "users?page=2").data, Some(2));
    }

    #[test]
    fn failure_is_recorded_and_retry_recovers() {
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        cache.request(&ctx, "resources?page=1", || anyhow::bail!("boom"));
        let entry = wait_until_settled(&cache, "resources?page=1");
        match entry.status {
            FetchStatus::Failed(message) => assert!(message.contains("boom")),
            other => panic!("expected failure, got {other:?}"),
        }

        // A plain request does not hammer a failed key; retry is explicit.
        cache.request(&ctx, "resources?page=1", || Ok(3));
        std::thread::sleep(Duration::from_millis(30));
        assert_ne!(
            cache.entry("resources?page=1").unwrap().status,
            FetchStatus::Ready
        );

        cache.refetch(&ctx, "resources?page=1", || Ok(3));
        let entry = wait_until_settled(&cache, "resources?page=1");
        assert_eq!(entry.status, FetchStatus::Ready);
        assert_eq!(entry.data, Some(3));
    }

    #[test]
    fn invalidate_forces_refetch() {
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        cache.request(&ctx, "users?page=1", || Ok(1));
        wait_until_settled(&cache, "users?page=1");

        cache.invalidate();
        assert!(cache.entry("users?page=1").is_none());

        cache.request(&ctx, "users?page=1", || Ok(9));
        assert_eq!(wait_until_settled(&cache, "users?page=1").data, Some(9));
    }

    #[test]
    fn refetch_keeps_previous_data_while_loading() {
        let ctx = eframe::egui::Context::default();
        let cache: QueryCache<u32> = QueryCache::new();
        cache.request(&ctx, "events?page=1", || Ok(4));
        wait_until_settled(&cache, "events?page=1");

        cache.refetch(&ctx, "events?page=1", || {
            std::thread::sleep(Duration::from_millis(80));
            Ok(5)
        });
        let entry = cache.entry("events?page=1").unwrap();
        assert_eq!(entry.status, FetchStatus::Loading);
        assert_eq!(entry.data, Some(4));
        assert_eq!(wait_until_settled(&cache, "events?page=1").data, Some(5));
    }
}
