//! Keyed request coordinator.
//!
//! One entry per [`QueryKey`] holding the last settled state, an in-flight flag and
//! the subscribers to notify. Reads are de-duplicated per key; mutations never touch
//! the cache on their own, callers patch entries after the server confirms a write.

mod patch;

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{Category, CategoryId, Memo, MemoId};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging::warn;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::AsRefStr)]
pub(crate) enum QueryKey {
    #[strum(serialize = "categories")]
    Categories,
    #[strum(serialize = "memos")]
    Memos(CategoryId),
    #[strum(serialize = "memo")]
    Memo(MemoId),
}

impl QueryKey {
    /// The request that fills this key. Called once per attempt.
    pub fn loader(self, api: ApiClient) -> impl Fn() -> LocalBoxFuture<'static, ApiResult<QueryData>> {
        move || {
            let api = api.clone();
            async move {
                match self {
                    QueryKey::Categories => api.get_categories().await.map(QueryData::Categories),
                    QueryKey::Memos(category_id) => {
                        api.get_memos(category_id).await.map(QueryData::Memos)
                    }
                    QueryKey::Memo(memo_id) => api.get_memo(memo_id).await.map(QueryData::Memo),
                }
            }
            .boxed_local()
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum QueryData {
    Categories(Vec<Category>),
    Memos(Vec<Memo>),
    Memo(Memo),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum QueryState {
    /// Never requested, or dropped by a patch.
    #[default]
    Idle,
    Loading,
    Success(QueryData),
    Error(String),
}

impl QueryState {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryState::Loading)
    }

    pub fn data(&self) -> Option<&QueryData> {
        match self {
            QueryState::Success(d) => Some(d),
            _ => None,
        }
    }

    pub fn categories(&self) -> Option<&[Category]> {
        match self.data() {
            Some(QueryData::Categories(v)) => Some(v),
            _ => None,
        }
    }

    pub fn memos(&self) -> Option<&[Memo]> {
        match self.data() {
            Some(QueryData::Memos(v)) => Some(v),
            _ => None,
        }
    }

    pub fn memo(&self) -> Option<&Memo> {
        match self.data() {
            Some(QueryData::Memo(m)) => Some(m),
            _ => None,
        }
    }
}

pub(crate) type Listener = Arc<dyn Fn(&QueryState) + Send + Sync>;
pub(crate) type ErrorHook = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct SubscriptionId(u64);

#[derive(Default)]
struct Entry {
    state: QueryState,
    in_flight: bool,
    /// Bumped whenever a patch overwrites the state; a read that started under an
    /// older generation is discarded when it settles.
    generation: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Entry {
    fn listeners(&self) -> Vec<Listener> {
        self.listeners.iter().map(|(_, l)| l.clone()).collect()
    }
}

#[derive(Default)]
struct Inner {
    entries: HashMap<QueryKey, Entry>,
    next_subscription: u64,
}

/// Shared handle; clones point at the same cache.
#[derive(Clone)]
pub(crate) struct QueryClient {
    inner: Arc<Mutex<Inner>>,
    on_error: ErrorHook,
}

fn notify(listeners: &[Listener], state: &QueryState) {
    for l in listeners {
        l(state);
    }
}

impl QueryClient {
    pub fn new(on_error: ErrorHook) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            on_error,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    #[cfg(test)]
    pub fn get(&self, key: QueryKey) -> QueryState {
        self.lock()
            .entries
            .get(&key)
            .map(|e| e.state.clone())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, key: QueryKey) -> bool {
        self.lock().entries.get(&key).is_some_and(|e| e.in_flight)
    }

    /// Register `listener` for `key` and hand it the current state right away.
    pub fn subscribe(&self, key: QueryKey, listener: Listener) -> SubscriptionId {
        let (id, state) = {
            let mut inner = self.lock();
            inner.next_subscription += 1;
            let id = SubscriptionId(inner.next_subscription);
            let entry = inner.entries.entry(key).or_default();
            entry.listeners.push((id, listener.clone()));
            (id, entry.state.clone())
        };
        listener(&state);
        id
    }

    pub fn unsubscribe(&self, key: QueryKey, id: SubscriptionId) {
        if let Some(entry) = self.lock().entries.get_mut(&key) {
            entry.listeners.retain(|(sid, _)| *sid != id);
        }
    }

    /// Start loading `key` unless it is already cached or in flight.
    ///
    /// Returns the future to spawn when a request has to go out; `None` means the
    /// subscribers are (or will be) served by data or a request that already exists.
    /// A failed attempt is retried once before the entry settles in `Error`.
    pub fn fetch<F>(&self, key: QueryKey, load: F) -> Option<impl Future<Output = ()> + 'static>
    where
        F: Fn() -> LocalBoxFuture<'static, ApiResult<QueryData>> + 'static,
    {
        let (generation, listeners) = {
            let mut inner = self.lock();
            let entry = inner.entries.entry(key).or_default();
            if entry.in_flight || matches!(entry.state, QueryState::Success(_)) {
                return None;
            }
            entry.in_flight = true;
            entry.state = QueryState::Loading;
            (entry.generation, entry.listeners())
        };
        notify(&listeners, &QueryState::Loading);

        let client = self.clone();
        Some(async move {
            let result = match load().await {
                Ok(data) => Ok(data),
                Err(e) => {
                    warn!("query {}: {e}; retrying", key.as_ref());
                    load().await
                }
            };
            client.settle(key, generation, result);
        })
    }

    fn settle(&self, key: QueryKey, generation: u64, result: ApiResult<QueryData>) {
        let (state, error) = match result {
            Ok(data) => (QueryState::Success(data), None),
            Err(e) => {
                let message = e.to_string();
                (QueryState::Error(message.clone()), Some(message))
            }
        };

        let listeners = {
            let mut inner = self.lock();
            let entry = inner.entries.entry(key).or_default();
            if entry.generation != generation {
                // A patch replaced this entry while the request was out.
                return;
            }
            entry.in_flight = false;
            entry.state = state.clone();
            entry.listeners()
        };
        notify(&listeners, &state);

        if let Some(message) = error {
            warn!("query {} failed: {message}", key.as_ref());
            (self.on_error)(&message);
        }
    }

    /// Run a write. No retry; a failure is reported and the cache is left as is.
    pub async fn mutate<T>(&self, fut: impl Future<Output = ApiResult<T>>) -> Option<T> {
        match fut.await {
            Ok(v) => Some(v),
            Err(e) => {
                self.report(&e);
                None
            }
        }
    }

    pub fn report(&self, e: &ApiError) {
        warn!("mutation failed: {e}");
        (self.on_error)(&e.to_string());
    }

    /// Overwrite `key` with confirmed data.
    pub fn set_data(&self, key: QueryKey, data: QueryData) {
        self.replace_state(key, QueryState::Success(data));
    }

    /// Drop the cached value for `key`; the next read fetches again.
    pub fn remove(&self, key: QueryKey) {
        self.replace_state(key, QueryState::Idle);
    }

    /// Overwrite `key` and orphan any request still running for it.
    fn replace_state(&self, key: QueryKey, state: QueryState) {
        let listeners = {
            let mut inner = self.lock();
            let entry = inner.entries.entry(key).or_default();
            entry.generation += 1;
            entry.in_flight = false;
            entry.state = state.clone();
            entry.listeners()
        };
        notify(&listeners, &state);
    }

    /// Edit a loaded memo list in place. Lists that were never loaded are left alone.
    pub fn update_memo_list(&self, category_id: CategoryId, f: impl FnOnce(&mut Vec<Memo>)) {
        let key = QueryKey::Memos(category_id);
        let updated = {
            let mut inner = self.lock();
            match inner.entries.get_mut(&key) {
                Some(entry) => match &mut entry.state {
                    QueryState::Success(QueryData::Memos(list)) => {
                        f(list);
                        Some((entry.state.clone(), entry.listeners()))
                    }
                    _ => None,
                },
                None => None,
            }
        };

        if let Some((state, listeners)) = updated {
            notify(&listeners, &state);
        }
    }
}
