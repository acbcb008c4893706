//! Error types for graphline-core.

use thiserror::Error;

/// Failure of a single HTTP round-trip.
///
/// Cloneable so a batch can hand the same failure marker to a handler and
/// keep it in the aggregate map.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {code} with empty body")]
    Status { code: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request aborted: {0}")]
    Aborted(String),

    #[error("transport error: {0}")]
    Other(String),
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else if e.is_body() || e.is_decode() {
            TransportError::Body(e.to_string())
        } else {
            TransportError::Other(e.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("response body is empty")]
    Empty,

    #[error("response body is `false`")]
    False,

    #[error("invalid JSON at line {line}, column {column}: {message}")]
    Json {
        message: String,
        line:    usize,
        column:  usize,
    },
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Json {
            message: e.to_string(),
            line:    e.line(),
            column:  e.column(),
        }
    }
}

/// Input rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("field list contains an empty name")]
    EmptyField,

    #[error("{0} must not be empty")]
    Empty(&'static str),
}
