use graphline_core::{ConfigError, GraphApiError, InvalidInput, ParseError, TransportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("app access token exchange failed: {0}")]
    AuthExchange(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Graph API error: {0}")]
    Api(#[from] GraphApiError),

    #[error("unexpected response shape: {0}")]
    Shape(String),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start the I/O runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
