//! In-memory query cache keyed by resource + parameters.
//!
//! `fetch` callers join a fetch already in flight for the key; `refetch` always
//! starts a new one and only the newest fetch writes the slot. Values are
//! held type-erased as JSON so one cache serves every resource. Failures are
//! never cached. Mutations call `refetch` explicitly; nothing is invalidated
//! behind their back.
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::ClientError;

pub mod keys;

type FetchOutcome = Result<Arc<Value>, Arc<ClientError>>;
type SharedFetch = Shared<BoxFuture<'static, FetchOutcome>>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    params: Vec<String>,
}

impl QueryKey {
    pub fn new(resource: &'static str) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, param: impl ToString) -> Self {
        self.params.push(param.to_string());
        self
    }

    pub fn resource(&self) -> &str {
        self.resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource)?;
        for param in &self.params {
            write!(f, ":{param}")?;
        }
        Ok(())
    }
}

enum Slot {
    Ready(Arc<Value>),
    InFlight {
        id: u64,
        fetch: SharedFetch,
        stale: Option<Arc<Value>>,
    },
}

#[derive(Default)]
struct CacheInner {
    slots: HashMap<QueryKey, Slot>,
    next_id: u64,
}

#[derive(Clone, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Returns the cached value for `key`, joining or starting a fetch when there is none.
    pub async fn fetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (id, fetch) = {
            let mut inner = self.lock();
            let joined = match inner.slots.get(key) {
                Some(Slot::Ready(value)) => return decode(value),
                Some(Slot::InFlight { id, fetch, .. }) => Some((*id, fetch.clone())),
                None => None,
            };
            match joined {
                Some(joined) => joined,
                None => start(&mut inner, key, None, fetcher),
            }
        };
        self.settle(key, id, fetch).await
    }

    /// Forces a fresh value for `key`. Always starts a new fetch: one already in
    /// flight may predate a mutation, so it is superseded rather than joined. Its
    /// callers still get its result, but only the newest fetch writes the slot.
    /// The previous value stays readable via `peek` meanwhile.
    pub async fn refetch<T, F, Fut>(&self, key: &QueryKey, fetcher: F) -> Result<T, ClientError>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let (id, fetch) = {
            let mut inner = self.lock();
            let stale = match inner.slots.remove(key) {
                Some(Slot::InFlight { stale, .. }) => stale,
                Some(Slot::Ready(value)) => Some(value),
                None => None,
            };
            start(&mut inner, key, stale, fetcher)
        };
        debug!("Refetching {key}");
        self.settle(key, id, fetch).await
    }

    /// Reads the current (possibly stale) value without fetching.
    pub fn peek<T: DeserializeOwned>(&self, key: &QueryKey) -> Option<T> {
        let inner = self.lock();
        let value = match inner.slots.get(key)? {
            Slot::Ready(value) => value.clone(),
            Slot::InFlight { stale, .. } => stale.clone()?,
        };
        T::deserialize(value.as_ref()).ok()
    }

    pub fn is_fetching(&self, key: &QueryKey) -> bool {
        matches!(self.lock().slots.get(key), Some(Slot::InFlight { .. }))
    }

    /// Drops the cached value. A fetch already in flight still completes for its callers.
    pub fn invalidate(&self, key: &QueryKey) {
        self.lock().slots.remove(key);
    }

    pub fn clear(&self) {
        self.lock().slots.clear();
    }

    async fn settle<T: DeserializeOwned>(
        &self,
        key: &QueryKey,
        id: u64,
        fetch: SharedFetch,
    ) -> Result<T, ClientError> {
        let outcome = fetch.await;

        {
            let mut inner = self.lock();
            let owns_slot = matches!(
                inner.slots.get(key),
                Some(Slot::InFlight { id: current, .. }) if *current == id
            );
            if owns_slot {
                match &outcome {
                    Ok(value) => {
                        inner.slots.insert(key.clone(), Slot::Ready(value.clone()));
                    }
                    Err(_) => {
                        // Failures are not cached; fall back to the stale value if any.
                        if let Some(Slot::InFlight {
                            stale: Some(stale), ..
                        }) = inner.slots.remove(key)
                        {
                            inner.slots.insert(key.clone(), Slot::Ready(stale));
                        }
                    }
                }
            }
        }

        match outcome {
            Ok(value) => decode(&value),
            Err(e) => Err(ClientError::Shared(e)),
        }
    }
}

fn start<T, F, Fut>(
    inner: &mut CacheInner,
    key: &QueryKey,
    stale: Option<Arc<Value>>,
    fetcher: F,
) -> (u64, SharedFetch)
where
    T: Serialize + Send + 'static,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, ClientError>> + Send + 'static,
{
    let id = inner.next_id;
    inner.next_id += 1;

    let pending = fetcher();
    let fetch = async move {
        let outcome: FetchOutcome = match pending.await {
            Ok(value) => serde_json::to_value(value)
                .map(Arc::new)
                .map_err(|e| Arc::new(ClientError::from(e))),
            Err(e) => Err(Arc::new(e)),
        };
        outcome
    }
    .boxed()
    .shared();

    debug!("Fetching {key}");
    inner.slots.insert(
        key.clone(),
        Slot::InFlight {
            id,
            fetch: fetch.clone(),
            stale,
        },
    );
    (id, fetch)
}

fn decode<T: DeserializeOwned>(value: &Value) -> Result<T, ClientError> {
    Ok(T::deserialize(value)?)
}
