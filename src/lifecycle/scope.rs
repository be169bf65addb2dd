//! Cancellation scopes tied to a view's active lifetime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;

/// Cancellation handle for a view lifetime or one async attempt inside it.
///
/// Cancelling a scope cancels every child created from it. A child
/// created from an already-cancelled scope starts cancelled.
#[derive(Clone, Default)]
pub struct CancelScope {
    inner: Arc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    cancelled: AtomicBool,
    notify: Notify,
    children: Mutex<Vec<Arc<ScopeInner>>>,
}

impl ScopeInner {
    fn cancel(&self) {
        if self.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        self.notify.notify_waiters();
        let children = std::mem::take(&mut *self.children.lock());
        for child in children {
            child.cancel();
        }
    }
}

impl CancelScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::SeqCst)
    }

    /// A scope that is cancelled with this one, or on its own.
    pub fn child(&self) -> CancelScope {
        let child = CancelScope::new();
        let mut children = self.inner.children.lock();
        // Checked under the lock: cancel() takes the list before walking it.
        if self.is_cancelled() {
            child.inner.cancelled.store(true, Ordering::SeqCst);
        } else {
            children.retain(|c| !c.cancelled.load(Ordering::SeqCst));
            children.push(Arc::clone(&child.inner));
        }
        child
    }

    /// Whether both handles refer to the same scope.
    pub fn ptr_eq(&self, other: &CancelScope) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Resolves once the scope is cancelled.
    pub async fn cancelled(&self) {
        // Subscribe before checking the flag so a cancel() racing with
        // this call cannot be missed.
        let notified = self.inner.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

impl std::fmt::Debug for CancelScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CancelScope")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn cancel_propagates_to_children() {
        let view = CancelScope::new();
        let attempt = view.child();
        let nested = attempt.child();
        view.cancel();
        assert!(attempt.is_cancelled());
        assert!(nested.is_cancelled());
    }

    #[test]
    fn child_cancel_leaves_parent_alone() {
        let view = CancelScope::new();
        let attempt = view.child();
        attempt.cancel();
        assert!(attempt.is_cancelled());
        assert!(!view.is_cancelled());
        assert!(!view.child().is_cancelled());
    }

    #[test]
    fn child_of_cancelled_scope_starts_cancelled() {
        let view = CancelScope::new();
        view.cancel();
        assert!(view.child().is_cancelled());
    }

    #[test]
    fn cancelled_children_are_pruned() {
        let view = CancelScope::new();
        for _ in 0..10 {
            view.child().cancel();
        }
        let _live = view.child();
        assert_eq!(view.inner.children.lock().len(), 1);
    }

    #[tokio::test]
    async fn cancelled_future_wakes_waiter() {
        let scope = CancelScope::new();
        let waiter = {
            let scope = scope.clone();
            tokio::spawn(async move { scope.cancelled().await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        scope.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake")
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_future_is_immediate_after_cancel() {
        let scope = CancelScope::new();
        scope.cancel();
        tokio::time::timeout(Duration::from_millis(100), scope.cancelled())
            .await
            .expect("already cancelled");
    }
}
