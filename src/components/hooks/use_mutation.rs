use crate::api::ApiResult;
use crate::query::QueryClient;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;

/// Pending flag plus a runner for one kind of write.
#[derive(Clone, Copy)]
pub(crate) struct Mutation {
    pub pending: RwSignal<bool>,
    client: StoredValue<QueryClient>,
}

impl Mutation {
    fn new(client: QueryClient) -> Self {
        Self {
            pending: RwSignal::new(false),
            client: StoredValue::new(client),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Send the write, then run `on_success` with the server's answer.
    ///
    /// Failures are reported through the toast and leave the cache untouched.
    /// Overlapping runs are not queued; whichever response lands last wins.
    pub fn run<T, Fut>(&self, fut: Fut, on_success: impl FnOnce(T) + 'static)
    where
        T: 'static,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        spawn_local(self.task(fut, on_success));
    }

    /// Raises `pending` now and lowers it once the write has settled either way.
    fn task<T, Fut>(
        &self,
        fut: Fut,
        on_success: impl FnOnce(T) + 'static,
    ) -> impl Future<Output = ()> + 'static
    where
        T: 'static,
        Fut: Future<Output = ApiResult<T>> + 'static,
    {
        let client = self.client.get_value();
        let pending = self.pending;
        pending.set(true);

        async move {
            if let Some(v) = client.mutate(fut).await {
                on_success(v);
            }
            let _ = pending.try_set(false);
        }
    }
}

pub(crate) fn use_mutation() -> Mutation {
    let app_state = expect_context::<AppContext>();
    Mutation::new(app_state.0.query_client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::query::tests::recording_client;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_pending_is_cleared_after_a_failed_write() {
        let owner = Owner::new();
        owner.with(|| {
            let (client, errors) = recording_client();
            let mutation = Mutation::new(client);
            let called = Rc::new(Cell::new(false));

            let flag = called.clone();
            let task = mutation.task(
                async { Err::<bool, _>(ApiError::Transport("offline".to_string())) },
                move |_| flag.set(true),
            );
            assert!(mutation.pending.get_untracked());

            block_on(task);
            assert!(!mutation.pending.get_untracked());
            assert!(!called.get());
            assert_eq!(*errors.lock().expect("lock"), vec!["Network error: offline".to_string()]);
        });
    }

    #[test]
    fn test_success_runs_callback_and_clears_pending() {
        let owner = Owner::new();
        owner.with(|| {
            let (client, errors) = recording_client();
            let mutation = Mutation::new(client);
            let got = Rc::new(Cell::new(None));

            let sink = got.clone();
            block_on(mutation.task(async { Ok(30_i64) }, move |id| sink.set(Some(id))));

            assert_eq!(got.get(), Some(30));
            assert!(!mutation.pending.get_untracked());
            assert!(errors.lock().expect("lock").is_empty());
        });
    }
}
