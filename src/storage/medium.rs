use super::error::Result;

/// Default capacity of a durable medium, matching a browser origin's
/// local storage allowance.
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Synchronous string-keyed store that outlives the process.
///
/// Last write wins per key. There are no transactions.
pub trait DurableMedium: Send + Sync {
    /// Returns `None` when nothing is stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Bytes charged against a quota for a set of entries.
pub(crate) fn usage<'a>(entries: impl Iterator<Item = (&'a String, &'a String)>) -> usize {
    entries.map(|(k, v)| k.len() + v.len()).sum()
}
