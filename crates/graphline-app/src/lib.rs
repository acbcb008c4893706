//! Per-application Graph API operations.
//!
//! - [`AppCredentialProvider`] exchanges the app id and secret for an app
//!   access token once, and keeps it.
//! - [`GraphApp`] lists and creates real-time update subscriptions for the
//!   application, authenticated with that token.

mod app;
mod credential;
mod error;
mod subscription;

pub use app::GraphApp;
pub use credential::{AppAccessToken, AppCredentialProvider, AppCredentials, parse_token_response};
pub use error::{AppError, Result};
pub use subscription::{FieldList, Subscription, SubscriptionObject};
