//! Response envelope decoding and API error classification
//!
//! Every successful Pitchside API response is a JSON body of shape
//! `{ "data": T }`; paginated endpoints wrap a `{ "list", "hasMoreList" }`
//! page inside that envelope. Failed responses carry an optional
//! `message` (possibly nested under `data`), falling back to the HTTP
//! status text.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::response::{RawResponse, StatusCode};

/// The `{data}` wrapper every JSON response body is expected to have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// The payload callers actually receive.
    pub data: T,
}

/// One page of a cursor-paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items in page order.
    #[serde(default = "Vec::new")]
    pub list: Vec<T>,
    /// Whether another page exists past this one.
    #[serde(default)]
    pub has_more_list: bool,
}

/// A failed HTTP response, classified for caller inspection.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} ({status})")]
pub struct ApiError {
    /// HTTP status of the failed response.
    pub status: StatusCode,
    /// Best message available: body `message`, body `data.message`, or
    /// the HTTP status text.
    pub message: String,
    /// Raw response body as JSON; empty object when unparseable.
    pub body: Value,
}

/// Errors produced while decoding a response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResponseError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A 2xx response body was not a parseable `{data}` envelope.
    #[error("malformed response body: {0}")]
    Malformed(String),
}

/// Unwraps the `{data}` field of a successful response.
///
/// # Errors
///
/// Returns [`ResponseError::Api`] for non-2xx responses (classified via
/// [`classify_error`]) and [`ResponseError::Malformed`] when a 2xx body
/// does not decode as a `{data}` envelope.
pub fn unwrap_data<T: DeserializeOwned>(response: &RawResponse) -> Result<T, ResponseError> {
    if !response.status.is_success() {
        return Err(ResponseError::Api(classify_error(response)));
    }
    let envelope: Envelope<T> = serde_json::from_slice(&response.body)
        .map_err(|e| ResponseError::Malformed(e.to_string()))?;
    Ok(envelope.data)
}

/// Classifies a failed response into an [`ApiError`].
///
/// The body is parsed as JSON, falling back to an empty object; the
/// message prefers `message`, then `data.message`, then the status text.
#[must_use]
pub fn classify_error(response: &RawResponse) -> ApiError {
    let body: Value = serde_json::from_slice(&response.body)
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()));
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| {
            body.get("data")
                .and_then(|data| data.get("message"))
                .and_then(Value::as_str)
        })
        .map_or_else(
            || response.status.reason_phrase().to_string(),
            ToString::to_string,
        );
    ApiError {
        status: response.status,
        message,
        body,
    }
}
