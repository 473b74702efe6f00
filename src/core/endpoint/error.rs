//! Endpoint error types.

/// Errors from a single endpoint call. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    /// Connection, TLS, or body read failure.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    /// The response body was not JSON.
    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}
