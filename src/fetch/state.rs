//! State of one logical list fetch.

use crate::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error {
        message: String,
    },
}

/// Snapshot of a list fetch.
///
/// While loading, `data` still holds the last successful payload. A failed
/// attempt leaves `data` as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub(super) data: Vec<T>,
    pub(super) status: FetchStatus,
    /// Id of the most recently started attempt. Completions carrying any
    /// other id are stale.
    pub(super) attempt: u64,
    /// Status to restore if the current attempt is abandoned.
    pub(super) resume: Option<FetchStatus>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            status: FetchStatus::Idle,
            attempt: 0,
            resume: None,
        }
    }
}

impl<T: Clone + PartialEq + Send + 'static> UiState for FetchState<T> {}

impl<T> FetchState<T> {
    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn current_attempt(&self) -> u64 {
        self.attempt
    }
}
