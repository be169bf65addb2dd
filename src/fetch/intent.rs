use crate::mvi::Intent;

/// Transitions of a list fetch. Every variant carries the attempt id it
/// belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchIntent<T> {
    /// A new attempt was issued.
    Started { attempt: u64 },

    Succeeded { attempt: u64, data: Vec<T> },

    Failed { attempt: u64, message: String },

    /// The attempt was cancelled before its result was applied.
    Abandoned { attempt: u64 },
}

impl<T: Send + 'static> Intent for FetchIntent<T> {}
