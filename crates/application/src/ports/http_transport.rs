//! HTTP transport port

use async_trait::async_trait;
use thiserror::Error;

use pitchside_domain::{HttpRequest, RawResponse};

/// Errors produced by an HTTP transport.
///
/// Non-2xx responses are not transport errors; a transport only fails
/// when no response was obtained at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The request URL was rejected by the transport.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request exceeded the configured timeout.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The connection could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Port for executing HTTP requests.
///
/// This trait abstracts the HTTP client implementation, allowing the
/// application layer to be independent of specific HTTP libraries.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes an HTTP request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if no response could be obtained due to network
    /// issues, timeout, or an invalid URL.
    async fn execute(&self, request: HttpRequest) -> Result<RawResponse, TransportError>;
}
