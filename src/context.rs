//! Shared state passed down a view tree by explicit injection.
//!
//! An enclosing view calls [`ContextSlot::provide`] and keeps the guard for
//! as long as its subtree is alive. Descendants call
//! [`ContextSlot::consume`] to get a [`Capability`]. Consuming with no live
//! provider is a wiring bug and panics.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

/// Read/write handle on a provided value.
pub struct Capability<T> {
    value: Arc<RwLock<T>>,
}

impl<T> Clone for Capability<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
        }
    }
}

impl<T: Clone> Capability<T> {
    pub fn current(&self) -> T {
        self.value.read().clone()
    }
}

impl<T> Capability<T> {
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.read())
    }

    pub fn set(&self, value: T) {
        *self.value.write() = value;
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.write());
    }
}

/// A named context. Nested providers shadow outer ones.
pub struct ContextSlot<T> {
    provider: &'static str,
    stack: Mutex<Vec<Capability<T>>>,
}

impl<T> ContextSlot<T> {
    pub fn new(provider: &'static str) -> Self {
        Self {
            provider,
            stack: Mutex::new(Vec::new()),
        }
    }

    pub fn provide(&self, value: T) -> ProviderGuard<'_, T> {
        let capability = Capability {
            value: Arc::new(RwLock::new(value)),
        };
        self.stack.lock().push(capability.clone());
        ProviderGuard {
            slot: self,
            capability,
        }
    }

    pub fn try_consume(&self) -> Option<Capability<T>> {
        self.stack.lock().last().cloned()
    }

    /// # Panics
    ///
    /// When no provider for this slot is alive.
    pub fn consume(&self, consumer: &str) -> Capability<T> {
        match self.try_consume() {
            Some(capability) => capability,
            None => panic!("{} must be used within a {}", consumer, self.provider),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}

/// Keeps a provided value reachable. Dropping it ends the provider scope.
pub struct ProviderGuard<'a, T> {
    slot: &'a ContextSlot<T>,
    capability: Capability<T>,
}

impl<T> ProviderGuard<'_, T> {
    /// The provider's own handle on the value.
    pub fn capability(&self) -> &Capability<T> {
        &self.capability
    }
}

impl<T> Drop for ProviderGuard<'_, T> {
    fn drop(&mut self) {
        let mut stack = self.slot.stack.lock();
        if let Some(pos) = stack
            .iter()
            .rposition(|c| Arc::ptr_eq(&c.value, &self.capability.value))
        {
            stack.remove(pos);
        }
    }
}
