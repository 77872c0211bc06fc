//! HTTP transport error types.

use std::sync::Arc;

/// Errors from the HTTP transport. Any of these means no response was received.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HttpError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(String),

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { HttpError::Timeout } else { HttpError::Network(Arc::new(err)) }
    }
}
