use thiserror::Error;

/// Failures of the durable medium.
///
/// Callers of [`PersistentValueStore`](crate::storage::PersistentValueStore)
/// never see these: they are logged and the in-memory value stands.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium is disabled, missing, or its backing data is unreadable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Writing the entry would exceed the medium's capacity.
    #[error("storage quota exceeded writing '{key}': {needed} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    /// The value could not be encoded or decoded as JSON.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
