//! Process-local durable medium.
//!
//! Clones share the same map, so a second [`PersistentValueStore`] over a
//! clone behaves like a fresh session over the same browser storage.
//!
//! [`PersistentValueStore`]: crate::storage::PersistentValueStore

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::error::{Result, StorageError};
use super::medium::{usage, DurableMedium};

#[derive(Clone, Default)]
pub struct MemoryMedium {
    inner: Arc<RwLock<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        let medium = Self::new();
        medium.inner.write().quota = Some(quota);
        medium
    }

    /// Make every operation fail with [`StorageError::Unavailable`].
    pub fn disable(&self) {
        self.inner.write().disabled = true;
    }

    pub fn enable(&self) {
        self.inner.write().disabled = false;
    }

    /// Raw stored text, bypassing the disabled switch. Test helper.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.read().entries.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DurableMedium for MemoryMedium {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.read();
        if inner.disabled {
            return Err(StorageError::Unavailable("memory medium disabled".to_string()));
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.disabled {
            return Err(StorageError::Unavailable("memory medium disabled".to_string()));
        }

        if let Some(quota) = inner.quota {
            let others = usage(inner.entries.iter().filter(|(k, _)| k.as_str() != key));
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    quota,
                });
            }
        }

        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.write();
        if inner.disabled {
            return Err(StorageError::Unavailable("memory medium disabled".to_string()));
        }
        inner.entries.remove(key);
        Ok(())
    }
}
