//! Response body decoding.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::error::ParseError;

/// Error object from a Graph `{"error": {...}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("{kind}: {message}")]
pub struct GraphApiError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind:    String,
    #[serde(default)]
    pub code:    Option<i64>,
}

/// Decode a response body into `T`.
///
/// An empty body and the bare literal `false`, which the Graph API returns
/// for "nothing here", are both parse errors.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ParseError> {
    let trimmed = body.trim_ascii();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if trimmed == b"false" {
        return Err(ParseError::False);
    }
    Ok(serde_json::from_slice(trimmed)?)
}

pub fn parse_value(body: &[u8]) -> Result<Value, ParseError> {
    parse_json(body)
}

/// The error object, if `value` is a Graph error envelope.
///
/// A top-level `error` key that does not hold a `message` is not an envelope.
pub fn api_error(value: &Value) -> Option<GraphApiError> {
    let error = value.as_object()?.get("error")?;
    GraphApiError::deserialize(error).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[test]
    fn test_parse_object() {
        let v = parse_value(br#"{"id":"1","name":"Ada"}"#).unwrap();
        assert_eq!(v["name"], "Ada");
    }

    #[test]
    fn test_parse_typed() {
        #[derive(Deserialize)]
        struct User {
            id: String,
        }
        let user: User = parse_json(b" {\"id\":\"9\"}\n").unwrap();
        assert_eq!(user.id, "9");
    }

    #[test]
    fn test_empty_and_false_rejected() {
        assert_eq!(parse_value(b"").unwrap_err(), ParseError::Empty);
        assert_eq!(parse_value(b"  \n").unwrap_err(), ParseError::Empty);
        assert_eq!(parse_value(b"false").unwrap_err(), ParseError::False);
    }

    #[test]
    fn test_api_error_envelope() {
        let v = parse_value(br#"{"error":{"message":"bad","type":"OAuthException","code":190}}"#).unwrap();
        let e = api_error(&v).unwrap();
        assert_eq!(e.kind, "OAuthException");
        assert_eq!(e.code, Some(190));
        assert_eq!(e.to_string(), "OAuthException: bad");

        assert!(api_error(&parse_value(br#"{"error":"none"}"#).unwrap()).is_none());
        assert!(api_error(&parse_value(b"[1,2]").unwrap()).is_none());
    }

    #[test]
    fn test_malformed_reports_position() {
        match parse_value(b"<html>oops</html>").unwrap_err() {
            ParseError::Json { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
