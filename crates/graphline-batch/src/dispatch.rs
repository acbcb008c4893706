//! Decoding raw batch entries and handing them to the caller.

use std::collections::HashMap;

use graphline_core::{GraphApiError, Identity, ParseError, TransportError, api_error, parse_value};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::executor::{RawBatch, RawResponse};

/// Failure marker stored in place of a payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Graph API error: {0}")]
    Api(GraphApiError),
}

pub type FetchResult<T = Value> = std::result::Result<T, FetchFailure>;

/// Turns a [`RawBatch`] into per-identity [`FetchResult`]s.
#[derive(Debug, Clone)]
pub struct ResultDispatcher {
    detect_api_errors: bool,
}

impl Default for ResultDispatcher {
    fn default() -> Self {
        Self {
            detect_api_errors: true,
        }
    }
}

impl ResultDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a well-formed `{"error": {...}}` body counts as a failure.
    /// On by default.
    #[must_use]
    pub fn detect_api_errors(mut self, enabled: bool) -> Self {
        self.detect_api_errors = enabled;
        self
    }

    /// Decode every entry as JSON, call `handler` once per identity in the
    /// order the batch surfaced them, and return the full mapping.
    pub fn dispatch<F>(&self, raw: RawBatch, handler: F) -> HashMap<Identity, FetchResult>
    where
        F: FnMut(&Identity, &FetchResult),
    {
        self.dispatch_as(raw, handler)
    }

    /// Like [`dispatch`](Self::dispatch) but deserializes into `T`. A body
    /// that is JSON but not a `T` is a [`FetchFailure::Parse`].
    pub fn dispatch_as<T, F>(&self, raw: RawBatch, mut handler: F) -> HashMap<Identity, FetchResult<T>>
    where
        T: DeserializeOwned,
        F: FnMut(&Identity, &FetchResult<T>),
    {
        let mut results = HashMap::with_capacity(raw.len());
        for (identity, response) in raw {
            let result = self.decode(response);
            if let Err(failure) = &result {
                tracing::warn!(identity = %identity, error = %failure, "batch entry failed");
            }
            handler(&identity, &result);
            results.insert(identity, result);
        }
        results
    }

    pub fn decode<T: DeserializeOwned>(&self, response: RawResponse) -> FetchResult<T> {
        let body = response?;
        let value = parse_value(&body)?;
        if self.detect_api_errors
            && let Some(error) = api_error(&value)
        {
            return Err(FetchFailure::Api(error));
        }
        serde_json::from_value(value).map_err(|e| FetchFailure::Parse(e.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use serde::Deserialize;
    use serde_json::json;

    fn ok(body: &str) -> RawResponse {
        Ok(Bytes::from(body.to_string()))
    }

    #[test]
    fn test_decode_object() {
        let d = ResultDispatcher::new();
        let v: FetchResult = d.decode(ok(r#"{"id":"1","name":"Ada"}"#));
        assert_eq!(v.unwrap(), json!({"id": "1", "name": "Ada"}));
    }

    #[test]
    fn test_decode_transport_failure_passes_through() {
        let d = ResultDispatcher::new();
        let v: FetchResult = d.decode(Err(TransportError::Timeout));
        assert_eq!(v.unwrap_err(), FetchFailure::Transport(TransportError::Timeout));
    }

    #[test]
    fn test_decode_malformed() {
        let d = ResultDispatcher::new();
        let v: FetchResult = d.decode(ok("<html>"));
        assert!(matches!(v, Err(FetchFailure::Parse(ParseError::Json { .. }))));
    }

    #[test]
    fn test_decode_api_error_envelope() {
        let d = ResultDispatcher::new();
        let body = r#"{"error":{"message":"Invalid OAuth access token.","type":"OAuthException","code":190}}"#;

        let v: FetchResult = d.decode(ok(body));
        assert_eq!(
            v.unwrap_err(),
            FetchFailure::Api(GraphApiError {
                message: "Invalid OAuth access token.".into(),
                kind:    "OAuthException".into(),
                code:    Some(190),
            })
        );

        let lenient: FetchResult = ResultDispatcher::new().detect_api_errors(false).decode(ok(body));
        assert!(lenient.unwrap()["error"].is_object());
    }

    #[test]
    fn test_error_field_that_is_not_an_envelope() {
        let d = ResultDispatcher::new();
        let v: FetchResult = d.decode(ok(r#"{"error":"none","id":"3"}"#));
        assert_eq!(v.unwrap()["id"], "3");
    }

    #[test]
    fn test_decode_typed_mismatch() {
        #[derive(Debug, Deserialize)]
        struct User {
            #[allow(dead_code)]
            id: String,
        }
        let d = ResultDispatcher::new();
        let v: FetchResult<User> = d.decode(ok(r#"{"name":"no id"}"#));
        assert!(matches!(v, Err(FetchFailure::Parse(_))));
    }
}
