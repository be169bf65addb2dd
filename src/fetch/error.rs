use thiserror::Error;

/// Why a fetch attempt failed. Cancellation is not represented here: a
/// cancelled attempt is discarded, never reported.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Client(String),

    /// Host unreachable, connection reset, TLS failure.
    #[error("Failed to reach {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request timeout after {seconds}s")]
    Timeout { seconds: u64 },

    /// The endpoint answered with a non-success status.
    #[error("Network response was not ok (HTTP {status})")]
    Status { status: u16 },

    /// The body was not a JSON array of the expected records.
    #[error("Malformed response payload: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether a manual reload has a chance of succeeding.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FetchError::Request { .. } | FetchError::Timeout { .. } | FetchError::Status { .. }
        )
    }
}
