//! Shared fetch/cache/error policy for remote data.
//!
//! [`ResourceCache`] keeps one result per request key in a bounded
//! [`moka`] cache with a time-to-live. Loads for one key run one at a time
//! under the cache's per-key lock: a caller arriving while a load is in
//! flight waits for it and shares its result.
//!
//! Every load is stamped with a ticket from a monotonic counter.
//! [`ResourceCache::clear`] retires every ticket issued so far, so a load
//! that started before the clear still answers its own caller but never
//! lands in the cache, and entries stamped with a retired ticket are never
//! served again.

use crate::error::ApiError;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum ResourceState<T> {
    Ready {
        data: Arc<T>,
    },
    /// `data` is the fallback shown in place of the live result, if any.
    Failed {
        error: String,
        data: Option<Arc<T>>,
    },
}

impl<T> ResourceState<T> {
    pub fn data(&self) -> Option<&Arc<T>> {
        match self {
            ResourceState::Ready { data } => Some(data),
            ResourceState::Failed { data, .. } => data.as_ref(),
        }
    }
}

/// Sequence number stamped on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
struct Slot<T> {
    ticket: Ticket,
    data: Arc<T>,
}

pub struct ResourceCache<K, T> {
    entries: Cache<K, Slot<T>>,
    issued: AtomicU64,
    /// Tickets at or below this were issued before the last clear
    retired: AtomicU64,
}

impl<K, T> ResourceCache<K, T>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
            issued: AtomicU64::new(0),
            retired: AtomicU64::new(0),
        }
    }

    pub fn latest_ticket(&self) -> Ticket {
        Ticket(self.issued.load(Ordering::SeqCst))
    }

    fn issue(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 > self.retired.load(Ordering::SeqCst)
    }

    /// Serve cached data for `key`, or load it. `refresh` skips the cache.
    ///
    /// Failures are never cached; they carry the fallback from `fallback`.
    pub async fn fetch<F, Fut, G>(&self, key: &K, refresh: bool, fetch: F, fallback: G) -> ResourceState<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
        G: FnOnce() -> Option<T>,
    {
        if !refresh {
            if let Some(slot) = self.entries.get(key).await {
                if self.is_current(slot.ticket) {
                    return ResourceState::Ready { data: slot.data };
                }
            }
        }

        let mut own: Option<Arc<T>> = None;
        let own_ref = &mut own;
        let computed = self
            .entries
            .entry(key.clone())
            .and_try_compute_with(|current| async move {
                // filled by the load this caller waited on
                let usable = current.is_some_and(|entry| self.is_current(entry.value().ticket));
                if usable && !refresh {
                    return Ok::<_, ApiError>(Op::Nop);
                }

                let ticket = self.issue();
                let data = Arc::new(fetch().await?);
                *own_ref = Some(data.clone());

                if self.is_current(ticket) {
                    Ok(Op::Put(Slot { ticket, data }))
                } else {
                    tracing::debug!(
                        "Not caching result of ticket {} issued before the last clear",
                        ticket.0
                    );
                    Ok(Op::Nop)
                }
            })
            .await;

        match computed {
            Ok(result) => {
                let stored = match result {
                    CompResult::Inserted(entry)
                    | CompResult::ReplacedWith(entry)
                    | CompResult::Unchanged(entry) => Some(entry.into_value().data),
                    CompResult::Removed(_) | CompResult::StillNone(_) => None,
                };
                match own.or(stored) {
                    Some(data) => ResourceState::Ready { data },
                    None => ResourceState::Failed {
                        error: "load finished without data".to_string(),
                        data: fallback().map(Arc::new),
                    },
                }
            }
            Err(e) => ResourceState::Failed {
                error: e.to_string(),
                data: fallback().map(Arc::new),
            },
        }
    }

    /// Number of live entries, after pending evictions have run.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }

    pub fn clear(&self) {
        self.retired
            .store(self.issued.load(Ordering::SeqCst), Ordering::SeqCst);
        self.entries.invalidate_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::oneshot;

    fn upstream_error() -> ApiError {
        ApiError::Http {
            status: StatusCode::BAD_GATEWAY,
            body: "upstream".to_string(),
        }
    }

    fn cache<K>() -> ResourceCache<K, u32>
    where
        K: Eq + Hash + Clone + Send + Sync + 'static,
    {
        ResourceCache::new(Duration::from_secs(60), 100)
    }

    #[tokio::test]
    async fn test_cache_serves_fresh_data_until_refresh() {
        let cache = cache::<&'static str>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let fetch = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<u32, ApiError>(42)
        };

        cache.fetch(&"overview", false, fetch, || None).await;
        cache.fetch(&"overview", false, fetch, || None).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.fetch(&"overview", true, fetch, || None).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.fetch(&"devices", false, fetch, || None).await;
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(cache.len().await, 2);
    }

    #[tokio::test]
    async fn test_overlapping_loads_share_one_fetch() {
        let cache = cache::<u8>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let slow = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(100)).await;
            Ok::<u32, ApiError>(6)
        };

        let (first, second) = tokio::join!(cache.fetch(&1, false, slow, || None), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cache.fetch(&1, false, slow, || None).await
        });

        assert_eq!(first.data().map(|d| **d), Some(6));
        assert_eq!(second.data().map(|d| **d), Some(6));
        assert!(matches!(first, ResourceState::Ready { .. }));
        assert!(matches!(second, ResourceState::Ready { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clear_keeps_in_flight_result_out_of_cache() {
        let cache = cache::<u8>();
        let (tx, rx) = oneshot::channel::<u32>();

        let (in_flight, _) = tokio::join!(
            cache.fetch(&1, false, || async move { Ok(rx.await.unwrap()) }, || None),
            async {
                while cache.latest_ticket() < Ticket(1) {
                    tokio::task::yield_now().await;
                }
                cache.clear();
                tx.send(7).unwrap();
            }
        );

        // the caller still gets its own answer
        assert_eq!(in_flight.data().map(|d| **d), Some(7));

        let next = cache
            .fetch(&1, false, || async { Ok::<u32, ApiError>(8) }, || None)
            .await;
        assert_eq!(next.data().map(|d| **d), Some(8));
    }

    #[tokio::test]
    async fn test_cleared_entries_are_not_served() {
        let cache = cache::<u8>();
        cache.fetch(&1, false, || async { Ok::<u32, ApiError>(1) }, || None).await;
        cache.clear();

        let state = cache
            .fetch(&1, false, || async { Ok::<u32, ApiError>(2) }, || None)
            .await;
        assert_eq!(state.data().map(|d| **d), Some(2));
    }

    #[tokio::test]
    async fn test_failure_carries_fallback() {
        let cache = ResourceCache::<u8, Vec<u32>>::new(Duration::from_secs(60), 100);
        let state = cache
            .fetch(&1, false, || async { Err(upstream_error()) }, || Some(vec![1, 2, 3]))
            .await;

        match state {
            ResourceState::Failed { error, data } => {
                assert!(error.contains("upstream"));
                assert_eq!(data.unwrap().len(), 3);
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failures_are_not_cached() {
        let cache = cache::<u8>();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let failing = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err::<u32, ApiError>(upstream_error())
        };

        cache.fetch(&1, false, failing, || Some(0)).await;
        cache.fetch(&1, false, failing, || Some(0)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_capacity_bounds_entries() {
        let cache = ResourceCache::<u32, u32>::new(Duration::from_secs(60), 10);
        for key in 0..200u32 {
            cache
                .fetch(&key, false, || async move { Ok::<u32, ApiError>(key) }, || None)
                .await;
        }
        assert!(cache.len().await <= 10);
    }
}
