//! Cancellable, single-flight driver for a list fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::lifecycle::CancelScope;
use crate::mvi::Reducer;

use super::intent::FetchIntent;
use super::reducer::FetchReducer;
use super::source::ListSource;
use super::state::FetchState;
use super::view::{render_policy, FetchView};

/// Owns the [`FetchState`] of one list view and the attempts that drive it.
///
/// Each trigger cancels the attempt before it. Together with the
/// attempt-id check in [`FetchReducer`] this means that only the latest
/// trigger can ever land in the state.
pub struct RemoteListFetcher<T, S> {
    inner: Arc<FetcherInner<T, S>>,
}

struct FetcherInner<T, S> {
    source: S,
    state: Mutex<FetchState<T>>,
    next_attempt: AtomicU64,
    in_flight: Mutex<Option<CancelScope>>,
    view_scope: Mutex<Option<CancelScope>>,
}

/// An issued attempt and the token that cancels it.
struct Attempt {
    id: u64,
    token: CancelScope,
}

impl<T, S> Clone for RemoteListFetcher<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, S> RemoteListFetcher<T, S>
where
    T: Clone + PartialEq + Send + Sync + 'static,
    S: ListSource<T> + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            inner: Arc::new(FetcherInner {
                source,
                state: Mutex::new(FetchState::default()),
                next_attempt: AtomicU64::new(0),
                in_flight: Mutex::new(None),
                view_scope: Mutex::new(None),
            }),
        }
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.inner.state.lock().clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn with_view<R>(&self, max_items: usize, f: impl FnOnce(FetchView<'_, T>) -> R) -> R {
        let state = self.inner.state.lock();
        f(render_policy(&state, max_items))
    }

    fn dispatch(&self, intent: FetchIntent<T>) {
        let mut state = self.inner.state.lock();
        let current = std::mem::take(&mut *state);
        *state = FetchReducer::reduce(current, intent);
    }

    /// Run one attempt inside `scope`.
    ///
    /// Returns once the attempt has been applied or discarded.
    pub async fn trigger(&self, scope: &CancelScope) {
        if let Some(attempt) = self.begin(scope) {
            self.run(attempt).await;
        }
    }

    /// Issue an attempt: supersede the one in flight and show Loading.
    /// `None` when `scope` is already cancelled.
    fn begin(&self, scope: &CancelScope) -> Option<Attempt> {
        if scope.is_cancelled() {
            tracing::debug!("fetch not started: scope already cancelled");
            return None;
        }

        let mut in_flight = self.inner.in_flight.lock();
        let id = self.inner.next_attempt.fetch_add(1, Ordering::SeqCst) + 1;
        let token = scope.child();
        if let Some(previous) = in_flight.replace(token.clone()) {
            previous.cancel();
        }
        self.dispatch(FetchIntent::Started { attempt: id });
        tracing::debug!(attempt = id, source = %self.inner.source.describe(), "fetch started");
        Some(Attempt { id, token })
    }

    async fn run(&self, Attempt { id: attempt, token }: Attempt) {
        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = self.inner.source.fetch() => Some(result),
        };

        let intent = match outcome {
            Some(Ok(data)) if !token.is_cancelled() => {
                tracing::debug!(attempt, items = data.len(), "fetch succeeded");
                FetchIntent::Succeeded { attempt, data }
            }
            Some(Err(e)) if !token.is_cancelled() => {
                tracing::warn!(attempt, error = %e, "fetch failed");
                FetchIntent::Failed {
                    attempt,
                    message: e.to_string(),
                }
            }
            _ => {
                tracing::debug!(attempt, "fetch cancelled");
                FetchIntent::Abandoned { attempt }
            }
        };
        self.dispatch(intent);

        let mut in_flight = self.inner.in_flight.lock();
        if in_flight.as_ref().is_some_and(|t| t.ptr_eq(&token)) {
            *in_flight = None;
        }
    }

    /// Start `scope`'s attempt now and drive it on a task. The state is
    /// already Loading when this returns.
    fn spawn_attempt(&self, scope: &CancelScope) -> JoinHandle<()> {
        let attempt = self.begin(scope);
        let fetcher = self.clone();
        tokio::spawn(async move {
            if let Some(attempt) = attempt {
                fetcher.run(attempt).await;
            }
        })
    }

    /// Activate the view: open its cancellation scope and start the one
    /// implicit attempt. Remounting cancels the previous view scope.
    pub fn mount(&self) -> JoinHandle<()> {
        let scope = CancelScope::new();
        if let Some(previous) = self.inner.view_scope.lock().replace(scope.clone()) {
            previous.cancel();
        }
        self.spawn_attempt(&scope)
    }

    /// User-initiated reload in the current view scope. `None` when the
    /// view is not mounted.
    pub fn reload(&self) -> Option<JoinHandle<()>> {
        let Some(scope) = self.inner.view_scope.lock().clone() else {
            tracing::debug!("reload ignored: view not mounted");
            return None;
        };
        Some(self.spawn_attempt(&scope))
    }

    /// Tear the view down. Attempts still running are discarded.
    pub fn unmount(&self) {
        if let Some(scope) = self.inner.view_scope.lock().take() {
            scope.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.view_scope.lock().is_some()
    }
}
