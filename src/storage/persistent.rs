//! Local state mirrored to a durable medium.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::medium::DurableMedium;

/// The argument of a write: a literal value, or a function of the
/// previous in-memory value.
pub enum Update<T> {
    Value(T),
    With(Box<dyn FnOnce(&T) -> T + Send>),
}

impl<T> Update<T> {
    pub fn with(f: impl FnOnce(&T) -> T + Send + 'static) -> Self {
        Self::With(Box::new(f))
    }

    fn resolve(self, previous: &T) -> T {
        match self {
            Self::Value(value) => value,
            Self::With(f) => f(previous),
        }
    }
}

impl<T> From<T> for Update<T> {
    fn from(value: T) -> Self {
        Self::Value(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::With(_) => f.write_str("With(..)"),
        }
    }
}

/// Reads and writes JSON-encoded values on a [`DurableMedium`].
///
/// None of the operations fail: persistence problems are logged and the
/// caller carries on with in-memory state.
#[derive(Clone)]
pub struct PersistentValueStore {
    medium: Arc<dyn DurableMedium>,
}

impl PersistentValueStore {
    pub fn new(medium: Arc<dyn DurableMedium>) -> Self {
        Self { medium }
    }

    /// Load the value under `key`, or `default` if it is absent,
    /// malformed, or the medium is unavailable.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let raw = match self.medium.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return default,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage read failed, using default");
                return default;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored value is malformed, using default");
                default
            }
        }
    }

    /// Open a cell seeded from the medium.
    pub fn open<T>(&self, key: impl Into<String>, default: T) -> StoredValue<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let key = key.into();
        let value = self.read(&key, default);
        StoredValue {
            key,
            value,
            store: self.clone(),
        }
    }

    /// Serialize and persist `value`, logging on failure.
    ///
    /// Returns whether the medium accepted the write.
    pub fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_string(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(key, error = %e, "value is not JSON-representable, not persisted");
                return false;
            }
        };

        match self.medium.set(key, &encoded) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key, error = %e, "storage write failed, keeping in-memory value");
                false
            }
        }
    }

    /// Drop whatever is persisted under `key`.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.medium.remove(key) {
            tracing::warn!(key, error = %e, "storage remove failed");
        }
    }
}

/// A named value that behaves like ordinary local state but survives
/// restarts.
///
/// The in-memory copy is authoritative for rendering; the medium only
/// ever lags it when a write failed.
pub struct StoredValue<T> {
    key: String,
    value: T,
    store: PersistentValueStore,
}

impl<T: Serialize> StoredValue<T> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.write(Update::Value(value));
    }

    pub fn update(&mut self, f: impl FnOnce(&T) -> T + Send + 'static) {
        self.write(Update::with(f));
    }

    /// Resolve `next` against the current value, apply it in memory,
    /// then persist it.
    pub fn write(&mut self, next: impl Into<Update<T>>) {
        self.value = next.into().resolve(&self.value);
        self.store.persist(&self.key, &self.value);
    }

    /// Drop the persisted entry. The in-memory value becomes `default`,
    /// which is also what a fresh session will read.
    pub fn clear(&mut self, default: T) {
        self.value = default;
        self.store.remove(&self.key);
    }
}

impl<T: fmt::Debug> fmt::Debug for StoredValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredValue")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryMedium;

    fn store_over(medium: &MemoryMedium) -> PersistentValueStore {
        PersistentValueStore::new(Arc::new(medium.clone()))
    }

    #[test]
    fn read_returns_default_when_absent() {
        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        assert_eq!(store.read("user-name", "fallback".to_string()), "fallback");
    }

    #[test]
    fn read_returns_default_when_disabled() {
        let medium = MemoryMedium::new();
        medium.set("count", "3").unwrap();
        medium.disable();
        let store = store_over(&medium);
        assert_eq!(store.read("count", 0u32), 0);
    }

    #[test]
    fn read_returns_default_when_malformed() {
        let medium = MemoryMedium::new();
        medium.set("count", "not a number").unwrap();
        let store = store_over(&medium);
        assert_eq!(store.read("count", 7u32), 7);
    }

    #[test]
    fn write_function_sees_previous_value() {
        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        let mut count = store.open("count", 5i64);
        count.update(|x| x + 1);
        assert_eq!(*count.get(), 6);
        assert_eq!(medium.raw("count").as_deref(), Some("6"));
    }

    #[test]
    fn write_survives_fresh_session() {
        let medium = MemoryMedium::new();
        let mut name = store_over(&medium).open("user-name", String::new());
        name.set("Ada".to_string());

        let reopened = store_over(&medium).open("user-name", String::new());
        assert_eq!(reopened.get(), "Ada");
    }

    #[test]
    fn failed_persist_keeps_in_memory_value() {
        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        let mut count = store.open("count", 1u32);
        medium.disable();
        count.set(2);
        assert_eq!(*count.get(), 2);
        assert_eq!(medium.raw("count"), None);
    }

    #[test]
    fn quota_failure_is_not_fatal() {
        let medium = MemoryMedium::with_quota(8);
        let store = store_over(&medium);
        let mut note = store.open("note", String::new());
        note.set("far too long for the quota".to_string());
        assert_eq!(note.get(), "far too long for the quota");
        assert_eq!(medium.raw("note"), None);
    }

    #[test]
    fn non_json_map_keys_are_logged_not_panicked() {
        use std::collections::HashMap;

        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        let mut map: HashMap<(u8, u8), u8> = HashMap::new();
        map.insert((1, 2), 3);
        assert!(!store.persist("pairs", &map));
        assert_eq!(medium.raw("pairs"), None);
    }

    #[test]
    fn clear_removes_entry_instead_of_storing_default() {
        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        let mut name = store.open("user-name", String::new());
        name.set("Ada".to_string());

        name.clear(String::new());

        assert_eq!(name.get(), "");
        assert_eq!(medium.raw("user-name"), None);
        assert!(medium.is_empty());
    }

    #[test]
    fn remove_clears_entry() {
        let medium = MemoryMedium::new();
        let store = store_over(&medium);
        store.open("count", 0u32).set(4);
        store.remove("count");
        assert_eq!(store.read("count", 0u32), 0);
    }
}
