use crate::api::ApiResult;
use crate::query::{Listener, QueryClient, QueryData, QueryKey, QueryState, SubscriptionId};
use crate::state::AppContext;
use futures::future::LocalBoxFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::sync::{Arc, Mutex};

/// A component's hold on at most one cache key at a time.
#[derive(Clone)]
struct Binding {
    client: QueryClient,
    current: Arc<Mutex<Option<(QueryKey, SubscriptionId)>>>,
}

impl Binding {
    fn new(client: QueryClient) -> Self {
        Self {
            client,
            current: Arc::new(Mutex::new(None)),
        }
    }

    fn release(&self) {
        let prev = self.current.lock().ok().and_then(|mut c| c.take());
        if let Some((k, id)) = prev {
            self.client.unsubscribe(k, id);
        }
    }

    /// Move the binding to `next` and return the request to spawn, if any.
    ///
    /// `None` only resets the listener to `Idle`; `load` is not consulted.
    fn switch<L, F>(
        &self,
        next: Option<QueryKey>,
        listener: Listener,
        load: L,
    ) -> Option<impl Future<Output = ()> + 'static>
    where
        L: FnOnce(QueryKey) -> F,
        F: Fn() -> LocalBoxFuture<'static, ApiResult<QueryData>> + 'static,
    {
        self.release();

        let Some(k) = next else {
            listener(&QueryState::Idle);
            return None;
        };

        let id = self.client.subscribe(k, listener);
        if let Ok(mut c) = self.current.lock() {
            *c = Some((k, id));
        }
        self.client.fetch(k, load(k))
    }
}

/// Subscribe the calling component to a cache entry.
///
/// `key` is tracked: when it changes the old entry is released and the new one is
/// loaded. A `None` key disables the read entirely (nothing is requested).
pub(crate) fn use_query(key: impl Fn() -> Option<QueryKey> + 'static) -> Signal<QueryState> {
    let app_state = expect_context::<AppContext>();
    let binding = Binding::new(app_state.0.query_client.clone());
    let state: RwSignal<QueryState> = RwSignal::new(QueryState::Idle);

    Effect::new({
        let binding = binding.clone();
        move |_| {
            let listener: Listener = Arc::new(move |s: &QueryState| {
                let _ = state.try_set(s.clone());
            });
            let request = binding.switch(key(), listener, |k| k.loader(app_state.0.api_client()));
            if let Some(fut) = request {
                spawn_local(fut);
            }
        }
    });

    on_cleanup(move || binding.release());

    state.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tests::{counting_loader, recorder, recording_client};
    use std::cell::Cell;
    use std::rc::Rc;

    fn categories() -> QueryData {
        QueryData::Categories(Vec::new())
    }

    #[test]
    fn test_disabled_key_never_fetches() {
        let (client, _) = recording_client();
        let binding = Binding::new(client.clone());
        let (listener, seen) = recorder();
        let calls = Rc::new(Cell::new(0));

        let request = binding.switch(None, listener, |_| {
            counting_loader(calls.clone(), 0, categories())
        });

        assert!(request.is_none());
        assert_eq!(calls.get(), 0);
        assert!(!client.is_in_flight(QueryKey::Categories));
        assert_eq!(*seen.lock().expect("lock"), vec![QueryState::Idle]);
    }

    #[test]
    fn test_switching_away_releases_the_old_key() {
        let (client, _) = recording_client();
        let binding = Binding::new(client.clone());
        let (listener, seen) = recorder();
        let calls = Rc::new(Cell::new(0));

        let request = binding.switch(Some(QueryKey::Categories), listener.clone(), |_| {
            counting_loader(calls.clone(), 0, categories())
        });
        assert!(request.is_some());
        assert!(client.is_in_flight(QueryKey::Categories));

        binding.switch(None, listener, |_| counting_loader(calls.clone(), 0, categories()));
        client.set_data(QueryKey::Categories, categories());

        assert_eq!(
            *seen.lock().expect("lock"),
            vec![QueryState::Idle, QueryState::Loading, QueryState::Idle]
        );
    }
}
