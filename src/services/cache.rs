use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use chrono::{DateTime, Duration, Utc};
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use crate::config::Config;
use crate::models::error::AppError;

/// Cache key: logical query name plus the serialized, normalized filters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QueryKey {
    query: &'static str,
    filters: String,
}

impl QueryKey {
    pub fn new(query: &'static str, filters: impl Into<String>) -> Self {
        Self {
            query,
            filters: filters.into(),
        }
    }

    pub fn query(&self) -> &'static str {
        self.query
    }
}

/// Type-erased fetch result. Each query type is stored behind `Rc<dyn Any>`
/// so a single cache serves every analysis view.
pub type FetchFuture = LocalBoxFuture<'static, Result<Rc<dyn Any>, AppError>>;
type SharedFetch = Shared<FetchFuture>;

enum Slot {
    Ready {
        value: Rc<dyn Any>,
        fetched_at: DateTime<Utc>,
        last_used: DateTime<Utc>,
    },
    InFlight(SharedFetch),
}

/// Request cache shared by every data-fetching hook.
///
/// Entries go stale after five minutes (refetched on next use) and are
/// evicted after ten minutes without a reader. While a fetch for a key is in
/// flight, every caller for that key awaits the same shared future, so a key
/// never has more than one outstanding network request.
///
/// All mutation happens on the UI thread; the `RefCell` is never held across
/// an await point.
#[derive(Default)]
pub struct QueryCache {
    slots: RefCell<HashMap<QueryKey, Slot>>,
}

enum Lookup {
    Fresh(Rc<dyn Any>),
    Pending(SharedFetch),
    Miss,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache-aware fetch with the current wall clock.
    pub async fn fetch<T, F>(&self, key: QueryKey, fetcher: F) -> Result<Rc<T>, AppError>
    where
        T: 'static,
        F: FnOnce() -> FetchFuture,
    {
        self.fetch_at(key, Utc::now(), fetcher).await
    }

    /// Cache-aware fetch at an explicit point in time. The fetcher runs only
    /// on a miss or a stale entry; failed fetches are never cached.
    pub async fn fetch_at<T, F>(
        &self,
        key: QueryKey,
        now: DateTime<Utc>,
        fetcher: F,
    ) -> Result<Rc<T>, AppError>
    where
        T: 'static,
        F: FnOnce() -> FetchFuture,
    {
        self.evict_idle(now);

        let lookup = {
            let mut slots = self.slots.borrow_mut();
            match slots.get_mut(&key) {
                Some(Slot::Ready {
                    value,
                    fetched_at,
                    last_used,
                }) if now.signed_duration_since(*fetched_at)
                    < Duration::seconds(Config::STALE_AFTER_SECS) =>
                {
                    *last_used = now;
                    Lookup::Fresh(value.clone())
                }
                Some(Slot::InFlight(shared)) => Lookup::Pending(shared.clone()),
                _ => Lookup::Miss,
            }
        };

        match lookup {
            Lookup::Fresh(value) => downcast(value),
            Lookup::Pending(shared) => downcast(shared.await?),
            Lookup::Miss => {
                let shared = fetcher().shared();
                self.slots
                    .borrow_mut()
                    .insert(key.clone(), Slot::InFlight(shared.clone()));

                let result = shared.clone().await;

                let mut slots = self.slots.borrow_mut();
                let still_ours = matches!(
                    slots.get(&key),
                    Some(Slot::InFlight(existing)) if existing.ptr_eq(&shared)
                );
                if still_ours {
                    match &result {
                        Ok(value) => {
                            slots.insert(
                                key,
                                Slot::Ready {
                                    value: value.clone(),
                                    fetched_at: now,
                                    last_used: now,
                                },
                            );
                        }
                        Err(_) => {
                            slots.remove(&key);
                        }
                    }
                }
                drop(slots);

                result.and_then(downcast)
            }
        }
    }

    /// Drops completed entries for a logical query, forcing the next read to
    /// refetch. In-flight fetches are left to finish for their waiters; their
    /// results are not written back.
    pub fn invalidate(&self, query: &'static str) {
        self.slots.borrow_mut().retain(|key, _| key.query != query);
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }

    fn evict_idle(&self, now: DateTime<Utc>) {
        self.slots.borrow_mut().retain(|_, slot| match slot {
            Slot::Ready { last_used, .. } => {
                now.signed_duration_since(*last_used)
                    < Duration::seconds(Config::EVICT_AFTER_IDLE_SECS)
            }
            Slot::InFlight(_) => true,
        });
    }
}

fn downcast<T: 'static>(value: Rc<dyn Any>) -> Result<Rc<T>, AppError> {
    value
        .downcast::<T>()
        .map_err(|_| AppError::DataError("Cache entry type mismatch".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::task::noop_waker;
    use std::cell::Cell;
    use std::future::Future;
    use std::task::{Context, Poll};

    fn minutes(n: i64) -> Duration {
        Duration::minutes(n)
    }

    fn fetcher_returning(calls: &Cell<u32>, value: u32) -> impl FnOnce() -> FetchFuture {
        move || {
            calls.set(calls.get() + 1);
            async move { Ok(Rc::new(value) as Rc<dyn Any>) }.boxed_local()
        }
    }

    #[test]
    fn test_fresh_entry_served_without_request() {
        let cache = QueryCache::new();
        let key = QueryKey::new("regional", "region=gangnam");
        let now = Utc::now();
        let calls = Cell::new(0);

        let first: Rc<u32> =
            block_on(cache.fetch_at(key.clone(), now, fetcher_returning(&calls, 5))).unwrap();
        assert_eq!(*first, 5);
        assert_eq!(calls.get(), 1);

        // Two minutes later the entry is still fresh.
        let second: Rc<u32> = block_on(cache.fetch_at(
            key,
            now + minutes(2),
            fetcher_returning(&calls, 99),
        ))
        .unwrap();
        assert_eq!(*second, 5);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_stale_entry_refetches() {
        let cache = QueryCache::new();
        let key = QueryKey::new("regional", "");
        let now = Utc::now();
        let calls = Cell::new(0);

        let _: Rc<u32> =
            block_on(cache.fetch_at(key.clone(), now, fetcher_returning(&calls, 5))).unwrap();

        let refreshed: Rc<u32> = block_on(cache.fetch_at(
            key,
            now + minutes(6),
            fetcher_returning(&calls, 7),
        ))
        .unwrap();
        assert_eq!(*refreshed, 7);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_idle_entries_evicted() {
        let cache = QueryCache::new();
        let now = Utc::now();
        let calls = Cell::new(0);

        let _: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("regional", "a"),
            now,
            fetcher_returning(&calls, 1),
        ))
        .unwrap();
        assert_eq!(cache.len(), 1);

        // An unrelated fetch eleven minutes later sweeps the idle entry.
        let _: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("trend", "b"),
            now + minutes(11),
            fetcher_returning(&calls, 2),
        ))
        .unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_filters_are_independent_entries() {
        let cache = QueryCache::new();
        let now = Utc::now();
        let calls = Cell::new(0);

        let a: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("regional", "region=gangnam"),
            now,
            fetcher_returning(&calls, 1),
        ))
        .unwrap();
        let b: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("regional", "region=mapo"),
            now,
            fetcher_returning(&calls, 2),
        ))
        .unwrap();

        assert_eq!((*a, *b), (1, 2));
        assert_eq!(calls.get(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_fetches_share_one_request() {
        let cache = QueryCache::new();
        let key = QueryKey::new("regional", "region=songpa");
        let now = Utc::now();
        let calls = Cell::new(0);

        let (tx, rx) = oneshot::channel::<()>();
        let gate = rx.shared();

        let gated_fetcher = |gate: Shared<oneshot::Receiver<()>>| {
            let calls = &calls;
            move || {
                calls.set(calls.get() + 1);
                async move {
                    let _ = gate.await;
                    Ok(Rc::new(42u32) as Rc<dyn Any>)
                }
                .boxed_local()
            }
        };

        let first = cache.fetch_at::<u32, _>(key.clone(), now, gated_fetcher(gate.clone()));
        let second = cache.fetch_at::<u32, _>(key.clone(), now, gated_fetcher(gate));
        let mut joined = Box::pin(futures::future::join(first, second));

        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);

        // Both callers suspend on the same in-flight request.
        assert!(matches!(joined.as_mut().poll(&mut cx), Poll::Pending));
        tx.send(()).unwrap();

        let Poll::Ready((a, b)) = joined.as_mut().poll(&mut cx) else {
            panic!("fetches did not resolve after the gate opened");
        };
        assert_eq!(*a.unwrap(), 42);
        assert_eq!(*b.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_fetches_are_not_cached() {
        let cache = QueryCache::new();
        let key = QueryKey::new("regional", "");
        let now = Utc::now();
        let calls = Cell::new(0);

        let failing = || {
            calls.set(calls.get() + 1);
            async { Err(AppError::ServerError("boom".to_string())) }.boxed_local()
        };

        let first: Result<Rc<u32>, _> = block_on(cache.fetch_at(key.clone(), now, failing));
        assert!(first.is_err());
        assert!(cache.is_empty());

        let second: Rc<u32> =
            block_on(cache.fetch_at(key, now, fetcher_returning(&calls, 3))).unwrap();
        assert_eq!(*second, 3);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_invalidate_clears_only_named_query() {
        let cache = QueryCache::new();
        let now = Utc::now();
        let calls = Cell::new(0);

        let _: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("gap", "a"),
            now,
            fetcher_returning(&calls, 1),
        ))
        .unwrap();
        let _: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("trend", "b"),
            now,
            fetcher_returning(&calls, 2),
        ))
        .unwrap();

        cache.invalidate("gap");
        assert_eq!(cache.len(), 1);

        let _: Rc<u32> = block_on(cache.fetch_at(
            QueryKey::new("gap", "a"),
            now,
            fetcher_returning(&calls, 9),
        ))
        .unwrap();
        assert_eq!(calls.get(), 3);
    }
}
