//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// A request descriptor field is invalid.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
