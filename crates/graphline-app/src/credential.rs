use std::fmt;

use graphline_core::{
    DomainKind, Endpoints, GraphConfig, HttpTransport, InvalidInput, Method, Params, Request, api_error,
    parse_value,
};

use crate::error::{AppError, Result};

const TOKEN_PATH: &str = "/oauth/access_token";

#[derive(Clone)]
pub struct AppCredentials {
    app_id:     String,
    app_secret: String,
}

impl AppCredentials {
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<String>) -> Result<Self> {
        let app_id = app_id.into();
        let app_secret = app_secret.into();
        if app_id.is_empty() {
            return Err(InvalidInput::Empty("app id").into());
        }
        if app_secret.is_empty() {
            return Err(InvalidInput::Empty("app secret").into());
        }
        Ok(Self { app_id, app_secret })
    }

    pub fn from_config(config: &GraphConfig) -> Result<Self> {
        Self::new(config.app_id()?, config.app_secret()?)
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .finish()
    }
}

/// App-scoped access token. Treated as non-expiring.
#[derive(Clone, PartialEq, Eq)]
pub struct AppAccessToken(String);

impl AppAccessToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppAccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppAccessToken(<redacted>)")
    }
}

/// Parse a `access_token=...` body. Everything after the first `=` is the
/// token.
pub fn parse_token_response(body: &[u8]) -> Result<AppAccessToken> {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    // credential errors come back as a JSON envelope instead
    if let Some(error) = parse_value(text.as_bytes()).ok().and_then(|v| api_error(&v)) {
        return Err(AppError::AuthExchange(error.to_string()));
    }

    let Some((_, token)) = text.split_once('=') else {
        return Err(AppError::AuthExchange("response has no `=` delimiter".to_string()));
    };

    if token.is_empty() {
        return Err(AppError::AuthExchange("response carries an empty token".to_string()));
    }
    Ok(AppAccessToken(token.to_string()))
}

/// Holds the app access token obtained by a single credential exchange.
#[derive(Debug, Clone)]
pub struct AppCredentialProvider {
    app_id: String,
    token:  AppAccessToken,
}

impl AppCredentialProvider {
    pub async fn exchange<T: HttpTransport>(
        transport: &T,
        endpoints: &Endpoints,
        credentials: &AppCredentials,
    ) -> Result<Self> {
        let params = Params::new()
            .with("client_id", credentials.app_id.as_str())
            .with("client_secret", credentials.app_secret.as_str())
            .with("type", "client_cred");
        let request = Request::new(endpoints, DomainKind::Graph, TOKEN_PATH, Method::Get, params);

        tracing::debug!(app_id = %credentials.app_id, url = %request.url, "exchanging app credentials");
        let body = transport.perform(&request).await?;
        let token = parse_token_response(&body)?;

        Ok(Self {
            app_id: credentials.app_id.clone(),
            token,
        })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn token(&self) -> &AppAccessToken {
        &self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let token = parse_token_response(b"access_token=123|abc\n").unwrap();
        assert_eq!(token.as_str(), "123|abc");
    }

    #[test]
    fn test_token_keeps_later_equals() {
        let token = parse_token_response(b"access_token=abc=def").unwrap();
        assert_eq!(token.as_str(), "abc=def");
    }

    #[test]
    fn test_missing_delimiter() {
        let err = parse_token_response(b"nonsense").unwrap_err();
        assert!(matches!(err, AppError::AuthExchange(ref m) if m.contains("delimiter")));
    }

    #[test]
    fn test_error_envelope_reason() {
        let body = br#"{"error":{"message":"Error validating client secret.","type":"OAuthException"}}"#;
        let err = parse_token_response(body).unwrap_err();
        assert!(matches!(err, AppError::AuthExchange(ref m) if m.contains("client secret")));
    }

    #[test]
    fn test_empty_token() {
        assert!(matches!(
            parse_token_response(b"access_token="),
            Err(AppError::AuthExchange(_))
        ));
    }

    #[test]
    fn test_credentials_validation() {
        assert!(matches!(
            AppCredentials::new("", "s"),
            Err(AppError::InvalidInput(InvalidInput::Empty("app id")))
        ));
        let creds = AppCredentials::new("1", "shh").unwrap();
        assert!(!format!("{creds:?}").contains("shh"));
    }

    #[test]
    fn test_token_debug_redacted() {
        let token = parse_token_response(b"access_token=secret").unwrap();
        assert!(!format!("{token:?}").contains("secret"));
    }
}
