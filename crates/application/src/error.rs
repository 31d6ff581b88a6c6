//! Client-facing error taxonomy
//!
//! Every failure surfaced by the fetch, pagination, resource and API
//! layers is one of these variants, so callers can distinguish "the
//! network failed" from "the server said no" from "your local data is
//! corrupted".

use thiserror::Error;

use pitchside_domain::{ApiError, DomainError, ResponseError};

use crate::ports::{StoreError, TransportError};

/// Errors surfaced by the Pitchside client core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// A request descriptor could not be resolved into a URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure: DNS, connection, timeout. Carries no
    /// HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A successful response body was not a parseable `{data}` envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Local data could not be serialized or deserialized.
    #[error("format error: {0}")]
    Format(String),

    /// The persistent key-value store failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// A token-requiring request was attempted without a token.
    #[error("authentication required for {0}")]
    MissingToken(String),
}

impl ClientError {
    /// Returns the HTTP status for API errors, `None` otherwise.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status.as_u16()),
            _ => None,
        }
    }
}

impl From<DomainError> for ClientError {
    fn from(error: DomainError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}

impl From<TransportError> for ClientError {
    fn from(error: TransportError) -> Self {
        Self::Network(error.to_string())
    }
}

impl From<StoreError> for ClientError {
    fn from(error: StoreError) -> Self {
        Self::Storage(error.to_string())
    }
}

impl From<ResponseError> for ClientError {
    fn from(error: ResponseError) -> Self {
        match error {
            ResponseError::Api(api) => Self::Api(api),
            ResponseError::Malformed(message) => Self::MalformedResponse(message),
        }
    }
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
