//! Keyed query cache behind the UI data hooks.
//!
//! Every remote resource the dashboards show is fetched through a
//! [`QueryClient`]. Results are cached per [`QueryKey`] as JSON; concurrent
//! fetches of one key share a single in-flight request. Polling is a
//! [`Stream`] of [`QueryState`] snapshots that sleeps between fetches through
//! the platform [`SleepProvider`]; dropping the stream stops polling.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures_util::future::{FutureExt, Shared};
use futures_util::stream::{self, Stream};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::application::error::ServiceError;
use crate::ports::outbound::{SleepProvider, TimeProvider};

#[cfg(not(target_arch = "wasm32"))]
type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, ServiceError>> + Send>>;
#[cfg(target_arch = "wasm32")]
type FetchFuture = Pin<Box<dyn Future<Output = Result<Value, ServiceError>>>>;

/// `Send` on native targets, nothing on wasm where futures are single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

// =============================================================================
// Keys and policies
// =============================================================================

/// Cache key of a remote resource, e.g. `server/status` or `quests/q1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How long a cached value stays fresh and how often a watcher refetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefetchPolicy {
    /// Poll interval for watchers; `None` fetches once
    pub interval: Option<Duration>,
    /// Cached values younger than this are served without a request
    pub stale_time: Duration,
}

impl RefetchPolicy {
    pub const PLAYERS_ONLINE: Self = Self {
        interval: Some(Duration::from_secs(1)),
        stale_time: Duration::from_millis(500),
    };

    pub const SERVER_STATUS: Self = Self {
        interval: Some(Duration::from_secs(5)),
        stale_time: Duration::from_secs(2),
    };

    pub const PLAYTIME: Self = Self {
        interval: Some(Duration::from_secs(30)),
        stale_time: Duration::from_secs(15),
    };

    pub const BACKUPS: Self = Self {
        interval: Some(Duration::from_secs(60)),
        stale_time: Duration::from_secs(30),
    };

    /// Quest records: fetched when a view asks, never polled.
    pub const ON_DEMAND: Self = Self {
        interval: None,
        stale_time: Duration::from_secs(30),
    };
}

// =============================================================================
// Observable state
// =============================================================================

/// What a view sees of a query: possibly stale data, the last error, and
/// whether a request is outstanding.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub error: Option<ServiceError>,
    pub is_loading: bool,
}

impl<T> QueryState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            error: None,
            is_loading: true,
        }
    }

    /// Fold a fetch result in. Errors keep the previous data.
    pub fn resolve(self, result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => Self {
                data: Some(data),
                error: None,
                is_loading: false,
            },
            Err(error) => Self {
                data: self.data,
                error: Some(error),
                is_loading: false,
            },
        }
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

// =============================================================================
// Cache
// =============================================================================

struct CacheEntry {
    value: Value,
    fetched_at_ms: u64,
}

struct InFlight {
    generation: u64,
    future: Shared<FetchFuture>,
}

#[derive(Default)]
struct QueryCache {
    entries: HashMap<QueryKey, CacheEntry>,
    in_flight: HashMap<QueryKey, InFlight>,
    next_generation: u64,
}

/// Shared cache of remote resources.
#[derive(Clone)]
pub struct QueryClient {
    cache: Arc<Mutex<QueryCache>>,
    time: Arc<dyn TimeProvider>,
}

impl QueryClient {
    pub fn new(time: Arc<dyn TimeProvider>) -> Self {
        Self {
            cache: Arc::new(Mutex::new(QueryCache::default())),
            time,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueryCache> {
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Fetch `key`, serving a fresh cached value or joining an in-flight
    /// request for the same key instead of issuing a new one.
    pub async fn fetch<T, F, Fut>(
        &self,
        key: &QueryKey,
        policy: RefetchPolicy,
        fetcher: F,
    ) -> Result<T, ServiceError>
    where
        T: Serialize + DeserializeOwned + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>> + MaybeSend + 'static,
    {
        let (generation, shared) = {
            let mut cache = self.lock();
            let now = self.time.now_millis();
            if let Some(entry) = cache.entries.get(key) {
                let age = now.saturating_sub(entry.fetched_at_ms);
                if u128::from(age) < policy.stale_time.as_millis() {
                    tracing::trace!(key = %key, age_ms = age, "Serving cached query");
                    return decode(entry.value.clone());
                }
            }

            match cache.in_flight.get(key) {
                Some(in_flight) => {
                    tracing::trace!(key = %key, "Joining in-flight query");
                    (in_flight.generation, in_flight.future.clone())
                }
                None => {
                    let generation = cache.next_generation;
                    cache.next_generation += 1;
                    let future: FetchFuture = Box::pin(fetcher().map(|result| {
                        result.and_then(|data| {
                            serde_json::to_value(data)
                                .map_err(|e| ServiceError::Decode(e.to_string()))
                        })
                    }));
                    let shared = future.shared();
                    cache.in_flight.insert(
                        key.clone(),
                        InFlight {
                            generation,
                            future: shared.clone(),
                        },
                    );
                    (generation, shared)
                }
            }
        };

        let result = shared.await;

        {
            let mut cache = self.lock();
            let owns_slot = cache
                .in_flight
                .get(key)
                .is_some_and(|in_flight| in_flight.generation == generation);
            if owns_slot {
                cache.in_flight.remove(key);
                if let Ok(value) = &result {
                    let fetched_at_ms = self.time.now_millis();
                    cache.entries.insert(
                        key.clone(),
                        CacheEntry {
                            value: value.clone(),
                            fetched_at_ms,
                        },
                    );
                }
            }
        }

        result.and_then(decode)
    }

    /// Last cached value for `key`, however old.
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let cache = self.lock();
        let entry = cache.entries.get(key)?;
        serde_json::from_value(entry.value.clone()).ok()
    }

    /// Drop the cached value so the next fetch goes to the network.
    pub fn invalidate(&self, key: &QueryKey) {
        self.lock().entries.remove(key);
    }

    /// Drop every cached value whose key starts with `prefix`.
    pub fn invalidate_prefix(&self, prefix: &str) {
        self.lock()
            .entries
            .retain(|key, _| !key.as_str().starts_with(prefix));
    }

    /// Poll `key` according to `policy`, yielding a new state after each fetch.
    ///
    /// The first fetch happens immediately. With no interval the stream ends
    /// after one item.
    pub fn watch<T, F, Fut>(
        &self,
        key: QueryKey,
        policy: RefetchPolicy,
        sleep: Arc<dyn SleepProvider>,
        fetcher: F,
    ) -> impl Stream<Item = QueryState<T>>
    where
        T: Serialize + DeserializeOwned + Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, ServiceError>> + MaybeSend + 'static,
    {
        let client = self.clone();
        let initial = QueryState {
            data: self.peek(&key),
            error: None,
            is_loading: true,
        };

        let fetcher = Arc::new(fetcher);

        stream::unfold((initial, false), move |(state, waited)| {
            let client = client.clone();
            let key = key.clone();
            let sleep = sleep.clone();
            let fetcher = fetcher.clone();

            async move {
                if waited {
                    let interval = policy.interval?;
                    sleep.sleep_ms(interval.as_millis() as u64).await;
                }
                let result = client.fetch(&key, policy, || fetcher()).await;
                if let Err(e) = &result {
                    tracing::warn!(key = %key, error = %e, "Query failed");
                }
                let next = state.resolve(result);
                Some((next.clone(), (next, true)))
            }
        })
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ServiceError> {
    serde_json::from_value(value).map_err(|e| ServiceError::Decode(e.to_string()))
}
