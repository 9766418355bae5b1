use super::key::QueryKey;
use futures::future::{FutureExt, LocalBoxFuture, Shared};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Errors the cache may retry with backoff.
pub(crate) trait RetryableError {
    fn is_retryable(&self) -> bool;
}

impl RetryableError for crate::api::ApiError {
    fn is_retryable(&self) -> bool {
        crate::api::ApiError::is_retryable(self)
    }
}

/// Bounded exponential backoff applied to retryable fetch failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    #[cfg(test)]
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-based): base * 2^attempt, capped.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

pub(crate) type SleepFn = Rc<dyn Fn(Duration) -> LocalBoxFuture<'static, ()>>;

pub(crate) type Listener = Rc<dyn Fn()>;

type InFlight<V, E> = Shared<LocalBoxFuture<'static, Result<V, E>>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FetchStatus {
    Idle,
    Fetching,
}

struct CacheEntry<V, E> {
    data: Option<V>,
    error: Option<E>,
    /// Set for new and invalidated entries: the next observer should fetch.
    /// Cleared once a fetch settles, successfully or not.
    stale: bool,
    status: FetchStatus,
    /// Bumped by invalidation and seeding; results issued under an older
    /// generation are discarded.
    generation: u64,
    updated_at: u64,
    in_flight: Option<InFlight<V, E>>,
    listeners: Vec<(u64, Listener)>,
}

impl<V, E> Default for CacheEntry<V, E> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            stale: true,
            status: FetchStatus::Idle,
            generation: 0,
            updated_at: 0,
            in_flight: None,
            listeners: Vec::new(),
        }
    }
}

/// Read-only view of one cache entry.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EntrySnapshot<V, E> {
    pub data: Option<V>,
    pub error: Option<E>,
    pub status: FetchStatus,
    pub stale: bool,
    pub updated_at: u64,
}

impl<V, E> EntrySnapshot<V, E> {
    pub fn is_fetching(&self) -> bool {
        self.status == FetchStatus::Fetching
    }

    pub fn is_fresh(&self) -> bool {
        self.data.is_some() && !self.stale
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct DehydratedQuery<V> {
    pub key: QueryKey,
    pub data: V,
}

/// Cache contents exported for (or imported from) a prefetching host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct DehydratedState<V> {
    #[serde(default = "Vec::new")]
    pub queries: Vec<DehydratedQuery<V>>,
}

impl<V> Default for DehydratedState<V> {
    fn default() -> Self {
        Self {
            queries: Vec::new(),
        }
    }
}

struct Inner<V, E> {
    entries: HashMap<QueryKey, CacheEntry<V, E>>,
    next_listener_id: u64,
    clock: u64,
}

/// Key-addressed query cache for a single-threaded runtime.
///
/// Borrows of the inner map are never held across an await point or while
/// listeners run, so listeners may call back into the cache.
pub(crate) struct QueryCache<V, E> {
    inner: Rc<RefCell<Inner<V, E>>>,
    retry: RetryPolicy,
    sleep: SleepFn,
}

impl<V, E> Clone for QueryCache<V, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
            retry: self.retry,
            sleep: Rc::clone(&self.sleep),
        }
    }
}

impl<V, E> QueryCache<V, E>
where
    V: Clone + 'static,
    E: Clone + RetryableError + 'static,
{
    pub fn new(retry: RetryPolicy, sleep: SleepFn) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                entries: HashMap::new(),
                next_listener_id: 1,
                clock: 0,
            })),
            retry,
            sleep,
        }
    }

    pub fn snapshot(&self, key: &QueryKey) -> Option<EntrySnapshot<V, E>> {
        let inner = self.inner.borrow();
        inner.entries.get(key).map(|e| EntrySnapshot {
            data: e.data.clone(),
            error: e.error.clone(),
            status: e.status,
            stale: e.stale,
            updated_at: e.updated_at,
        })
    }

    #[cfg(test)]
    pub fn get_data(&self, key: &QueryKey) -> Option<V> {
        self.inner
            .borrow()
            .entries
            .get(key)
            .and_then(|e| e.data.clone())
    }

    /// Registers `listener` for changes of `key`'s entry. The returned guard
    /// unsubscribes on drop.
    pub fn subscribe(&self, key: &QueryKey, listener: Listener) -> Subscription<V, E> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_listener_id;
        inner.next_listener_id += 1;
        inner
            .entries
            .entry(key.clone())
            .or_default()
            .listeners
            .push((id, listener));

        Subscription {
            inner: Rc::downgrade(&self.inner),
            key: key.clone(),
            id,
        }
    }

    #[cfg(test)]
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.inner
            .borrow()
            .entries
            .get(key)
            .map_or(0, |e| e.listeners.len())
    }

    /// Starts (or joins) the request for `key`.
    ///
    /// While a request is in flight every caller receives the same shared
    /// future; `fetcher` runs only for the caller that starts it. The returned
    /// future must be polled for the request to make progress.
    pub fn fetch<F, Fut>(&self, key: &QueryKey, fetcher: F) -> LocalBoxFuture<'static, Result<V, E>>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        let shared = {
            let mut inner = self.inner.borrow_mut();
            let entry = inner.entries.entry(key.clone()).or_default();
            if let Some(in_flight) = &entry.in_flight {
                return in_flight.clone().boxed_local();
            }

            let shared = self
                .run(key.clone(), entry.generation, fetcher)
                .boxed_local()
                .shared();
            entry.in_flight = Some(shared.clone());
            entry.status = FetchStatus::Fetching;
            shared
        };

        self.notify(key);
        shared.boxed_local()
    }

    /// Cached data when fresh, otherwise a fetch.
    pub fn ensure<F, Fut>(&self, key: &QueryKey, fetcher: F) -> LocalBoxFuture<'static, Result<V, E>>
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        let fresh = self
            .snapshot(key)
            .filter(|s| s.is_fresh())
            .and_then(|s| s.data);
        match fresh {
            Some(data) => futures::future::ready(Ok(data)).boxed_local(),
            None => self.fetch(key, fetcher),
        }
    }

    fn run<F, Fut>(
        &self,
        key: QueryKey,
        generation: u64,
        fetcher: F,
    ) -> impl Future<Output = Result<V, E>> + 'static
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<V, E>> + 'static,
    {
        let weak = Rc::downgrade(&self.inner);
        let retry = self.retry;
        let sleep = Rc::clone(&self.sleep);

        async move {
            let mut attempt = 0;
            let result = loop {
                match fetcher().await {
                    Ok(v) => break Ok(v),
                    Err(e) if e.is_retryable() && attempt < retry.max_retries => {
                        let delay = retry.delay_for(attempt);
                        attempt += 1;
                        sleep(delay).await;
                    }
                    Err(e) => break Err(e),
                }
            };

            if let Some(inner) = weak.upgrade() {
                let listeners = settle(&inner, &key, generation, &result);
                for l in listeners {
                    l();
                }
            }
            result
        }
    }

    /// Marks every entry of `resource` stale and wakes its subscribers.
    /// Returns the number of entries touched.
    pub fn invalidate(&self, resource: &str) -> usize {
        let (count, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let mut count = 0;
            let mut listeners = Vec::new();
            for (key, entry) in inner.entries.iter_mut() {
                if key.resource() != resource {
                    continue;
                }
                entry.stale = true;
                entry.generation += 1;
                count += 1;
                listeners.extend(entry.listeners.iter().map(|(_, l)| Rc::clone(l)));
            }
            (count, listeners)
        };

        for l in listeners {
            l();
        }
        count
    }

    /// Stores externally supplied data as fresh.
    pub fn seed(&self, key: &QueryKey, value: V) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.clock += 1;
            let now = inner.clock;
            let entry = inner.entries.entry(key.clone()).or_default();
            entry.data = Some(value);
            entry.error = None;
            entry.stale = false;
            entry.generation += 1;
            entry.updated_at = now;
        }
        self.notify(key);
    }

    pub fn hydrate(&self, state: DehydratedState<V>) -> usize {
        let n = state.queries.len();
        for q in state.queries {
            self.seed(&q.key, q.data);
        }
        n
    }

    #[cfg(test)]
    pub fn dehydrate(&self) -> DehydratedState<V> {
        let inner = self.inner.borrow();
        let mut queries: Vec<DehydratedQuery<V>> = inner
            .entries
            .iter()
            .filter_map(|(key, e)| {
                e.data.clone().map(|data| DehydratedQuery {
                    key: key.clone(),
                    data,
                })
            })
            .collect();
        queries.sort_by_key(|q| format!("{:?}", q.key));
        DehydratedState { queries }
    }

    #[cfg(test)]
    pub fn remove(&self, key: &QueryKey) -> bool {
        self.inner.borrow_mut().entries.remove(key).is_some()
    }

    fn notify(&self, key: &QueryKey) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .entries
            .get(key)
            .map(|e| e.listeners.iter().map(|(_, l)| Rc::clone(l)).collect())
            .unwrap_or_default();
        for l in listeners {
            l();
        }
    }
}

/// Applies a finished request to its entry and returns the listeners to wake.
fn settle<V: Clone, E: Clone>(
    inner: &Rc<RefCell<Inner<V, E>>>,
    key: &QueryKey,
    generation: u64,
    result: &Result<V, E>,
) -> Vec<Listener> {
    let mut inner = inner.borrow_mut();
    inner.clock += 1;
    let now = inner.clock;
    let Some(entry) = inner.entries.get_mut(key) else {
        return Vec::new();
    };

    entry.in_flight = None;
    entry.status = FetchStatus::Idle;

    if entry.generation == generation {
        match result {
            Ok(v) => {
                entry.data = Some(v.clone());
                entry.error = None;
                entry.updated_at = now;
            }
            Err(e) => {
                entry.error = Some(e.clone());
            }
        }
        entry.stale = false;
    }

    entry.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
}

/// Listener registration guard returned by [`QueryCache::subscribe`].
pub(crate) struct Subscription<V, E> {
    inner: Weak<RefCell<Inner<V, E>>>,
    key: QueryKey,
    id: u64,
}

impl<V, E> Subscription<V, E> {
    pub fn key(&self) -> &QueryKey {
        &self.key
    }
}

impl<V, E> Drop for Subscription<V, E> {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let Ok(mut inner) = inner.try_borrow_mut() else {
            return;
        };
        if let Some(entry) = inner.entries.get_mut(&self.key) {
            entry.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use futures::future::{join, ready};
    use std::cell::Cell;

    #[derive(Clone, Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl RetryableError for TestError {
        fn is_retryable(&self) -> bool {
            matches!(self, TestError::Transient)
        }
    }

    type Sleeps = Rc<RefCell<Vec<Duration>>>;

    fn cache_with(retry: RetryPolicy) -> (QueryCache<u32, TestError>, Sleeps) {
        let sleeps: Sleeps = Rc::new(RefCell::new(Vec::new()));
        let recorded = Rc::clone(&sleeps);
        let sleep: SleepFn = Rc::new(move |d| {
            recorded.borrow_mut().push(d);
            ready(()).boxed_local()
        });
        (QueryCache::new(retry, sleep), sleeps)
    }

    fn cache() -> QueryCache<u32, TestError> {
        cache_with(RetryPolicy::none()).0
    }

    fn key(page: u32) -> QueryKey {
        QueryKey::notes(page, "", "")
    }

    fn counting(
        calls: &Rc<Cell<u32>>,
        value: u32,
    ) -> impl Fn() -> futures::future::Ready<Result<u32, TestError>> + 'static {
        let calls = Rc::clone(calls);
        move || {
            calls.set(calls.get() + 1);
            ready(Ok(value))
        }
    }

    #[test]
    fn test_concurrent_identical_keys_share_one_request() {
        let cache = cache();
        let calls = Rc::new(Cell::new(0));

        let a = cache.fetch(&key(1), counting(&calls, 7));
        let b = cache.fetch(&key(1), counting(&calls, 99));
        let (ra, rb) = block_on(join(a, b));

        assert_eq!(calls.get(), 1);
        assert_eq!(ra, Ok(7));
        assert_eq!(rb, Ok(7));
        assert_eq!(cache.get_data(&key(1)), Some(7));
    }

    #[test]
    fn test_pending_request_is_joined_until_it_settles() {
        let cache = cache();
        let calls = Rc::new(Cell::new(0));
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));

        let fetcher = {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                let rx = rx.borrow_mut().take();
                async move {
                    match rx {
                        Some(rx) => rx.await.map_err(|_| TestError::Fatal),
                        None => Err(TestError::Fatal),
                    }
                }
            }
        };

        let a = cache.fetch(&key(1), fetcher);
        let b = cache.fetch(&key(1), counting(&calls, 1));
        assert!(cache.snapshot(&key(1)).is_some_and(|s| s.is_fetching()));

        let _ = tx.send(42);
        let (ra, rb) = block_on(join(a, b));
        assert_eq!((ra, rb), (Ok(42), Ok(42)));
        assert_eq!(calls.get(), 1);

        // Settled: a new fetch runs the fetcher again.
        let c = block_on(cache.fetch(&key(1), counting(&calls, 43)));
        assert_eq!(c, Ok(43));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_distinct_keys_fetch_independently() {
        let cache = cache();
        let calls = Rc::new(Cell::new(0));
        let (a, b) = block_on(join(
            cache.fetch(&key(1), counting(&calls, 1)),
            cache.fetch(&key(2), counting(&calls, 2)),
        ));
        assert_eq!((a, b), (Ok(1), Ok(2)));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_result_issued_before_invalidation_is_discarded() {
        let cache = cache();
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let fut = cache.fetch(&key(1), move || {
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.map_err(|_| TestError::Fatal),
                    None => Err(TestError::Fatal),
                }
            }
        });

        assert_eq!(cache.invalidate(QueryKey::NOTES), 1);
        let _ = tx.send(5);

        // The awaiting caller still gets its value...
        assert_eq!(block_on(fut), Ok(5));
        // ...but the superseded result never lands in the cache.
        let snap = cache.snapshot(&key(1)).expect("entry exists");
        assert_eq!(snap.data, None);
        assert!(snap.stale);
        assert!(!snap.is_fetching());
    }

    #[test]
    fn test_seed_wins_over_in_flight_result() {
        let cache = cache();
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let fut = cache.fetch(&key(1), move || {
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.map_err(|_| TestError::Fatal),
                    None => Err(TestError::Fatal),
                }
            }
        });

        cache.seed(&key(1), 100);
        let _ = tx.send(1);
        let _ = block_on(fut);
        assert_eq!(cache.get_data(&key(1)), Some(100));
    }

    #[test]
    fn test_ensure_skips_fetch_for_fresh_entries() {
        let cache = cache();
        let calls = Rc::new(Cell::new(0));
        cache.seed(&key(1), 3);

        let v = block_on(cache.ensure(&key(1), counting(&calls, 9)));
        assert_eq!(v, Ok(3));
        assert_eq!(calls.get(), 0);

        cache.invalidate(QueryKey::NOTES);
        let v = block_on(cache.ensure(&key(1), counting(&calls, 9)));
        assert_eq!(v, Ok(9));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_invalidate_only_touches_matching_resource() {
        let cache = cache();
        cache.seed(&key(1), 1);
        cache.seed(&key(2), 2);
        cache.seed(&QueryKey::note("n1"), 3);

        assert_eq!(cache.invalidate(QueryKey::NOTES), 2);
        assert!(cache.snapshot(&key(1)).is_some_and(|s| s.stale));
        assert!(cache.snapshot(&QueryKey::note("n1")).is_some_and(|s| s.is_fresh()));
        // Stale entries keep their data for display until the refetch lands.
        assert_eq!(cache.get_data(&key(2)), Some(2));
    }

    #[test]
    fn test_subscribers_are_notified_and_unsubscribe_on_drop() {
        let cache = cache();
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            cache.subscribe(&key(1), Rc::new(move || hits.set(hits.get() + 1)))
        };
        assert_eq!(sub.key(), &key(1));
        assert_eq!(cache.subscriber_count(&key(1)), 1);

        let calls = Rc::new(Cell::new(0));
        let _ = block_on(cache.fetch(&key(1), counting(&calls, 1)));
        // Once when the request starts, once when it settles.
        assert_eq!(hits.get(), 2);

        cache.invalidate(QueryKey::NOTES);
        assert_eq!(hits.get(), 3);

        drop(sub);
        assert_eq!(cache.subscriber_count(&key(1)), 0);
        cache.invalidate(QueryKey::NOTES);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn test_listener_may_read_the_cache() {
        let cache = cache();
        let seen = Rc::new(Cell::new(0));
        let _sub = {
            let reader = cache.clone();
            let seen = Rc::clone(&seen);
            cache.subscribe(
                &key(1),
                Rc::new(move || {
                    if let Some(v) = reader.get_data(&key(1)) {
                        seen.set(v);
                    }
                }),
            )
        };
        cache.seed(&key(1), 11);
        assert_eq!(seen.get(), 11);
    }

    #[test]
    fn test_failure_keeps_previous_data_and_settles() {
        let cache = cache();
        cache.seed(&key(1), 1);
        cache.invalidate(QueryKey::NOTES);

        let r = block_on(cache.fetch(&key(1), || ready(Err::<u32, _>(TestError::Fatal))));
        assert_eq!(r, Err(TestError::Fatal));

        let snap = cache.snapshot(&key(1)).expect("entry exists");
        assert_eq!(snap.data, Some(1));
        assert_eq!(snap.error, Some(TestError::Fatal));
        assert!(!snap.stale);
    }

    #[test]
    fn test_success_clears_previous_error() {
        let cache = cache();
        let _ = block_on(cache.fetch(&key(1), || ready(Err::<u32, _>(TestError::Fatal))));
        let calls = Rc::new(Cell::new(0));
        let _ = block_on(cache.fetch(&key(1), counting(&calls, 4)));
        let snap = cache.snapshot(&key(1)).expect("entry exists");
        assert_eq!(snap.error, None);
        assert_eq!(snap.data, Some(4));
    }

    #[test]
    fn test_retryable_errors_back_off_then_succeed() {
        let (cache, sleeps) = cache_with(RetryPolicy::default());
        let calls = Rc::new(Cell::new(0));
        let fetcher = {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                if calls.get() < 3 {
                    ready(Err(TestError::Transient))
                } else {
                    ready(Ok(8))
                }
            }
        };

        assert_eq!(block_on(cache.fetch(&key(1), fetcher)), Ok(8));
        assert_eq!(calls.get(), 3);
        assert_eq!(
            *sleeps.borrow(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[test]
    fn test_retries_are_bounded() {
        let (cache, sleeps) = cache_with(RetryPolicy::default());
        let calls = Rc::new(Cell::new(0));
        let fetcher = {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                ready(Err::<u32, _>(TestError::Transient))
            }
        };

        assert_eq!(
            block_on(cache.fetch(&key(1), fetcher)),
            Err(TestError::Transient)
        );
        assert_eq!(calls.get(), 4);
        assert_eq!(sleeps.borrow().len(), 3);
    }

    #[test]
    fn test_non_retryable_errors_fail_fast() {
        let (cache, sleeps) = cache_with(RetryPolicy::default());
        let calls = Rc::new(Cell::new(0));
        let fetcher = {
            let calls = Rc::clone(&calls);
            move || {
                calls.set(calls.get() + 1);
                ready(Err::<u32, _>(TestError::Fatal))
            }
        };
        let _ = block_on(cache.fetch(&key(1), fetcher));
        assert_eq!(calls.get(), 1);
        assert!(sleeps.borrow().is_empty());
    }

    #[test]
    fn test_retry_delay_is_capped() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(0), Duration::from_secs(1));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for(10), Duration::from_secs(30));
        assert_eq!(policy.delay_for(40), Duration::from_secs(30));
    }

    #[test]
    fn test_hydrate_seeds_fresh_entries_and_dehydrate_exports_them() {
        let cache = cache();
        let state = DehydratedState {
            queries: vec![
                DehydratedQuery { key: key(1), data: 10 },
                DehydratedQuery { key: QueryKey::note("a"), data: 20 },
            ],
        };
        assert_eq!(cache.hydrate(state.clone()), 2);
        assert!(cache.snapshot(&key(1)).is_some_and(|s| s.is_fresh()));

        let out = cache.dehydrate();
        assert_eq!(out.queries.len(), 2);
        assert!(out.queries.contains(&DehydratedQuery { key: key(1), data: 10 }));
    }

    #[test]
    fn test_removed_entry_ignores_late_result() {
        let cache = cache();
        let (tx, rx) = oneshot::channel::<u32>();
        let rx = Rc::new(RefCell::new(Some(rx)));
        let fut = cache.fetch(&key(1), move || {
            let rx = rx.borrow_mut().take();
            async move {
                match rx {
                    Some(rx) => rx.await.map_err(|_| TestError::Fatal),
                    None => Err(TestError::Fatal),
                }
            }
        });
        assert!(cache.remove(&key(1)));
        let _ = tx.send(1);
        assert_eq!(block_on(fut), Ok(1));
        assert!(cache.snapshot(&key(1)).is_none());
    }
}
