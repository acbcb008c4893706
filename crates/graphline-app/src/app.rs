use graphline_core::{
    DomainKind, Endpoints, GraphConfig, HttpTransport, Method, Params, Request, api_error, parse_value,
};
use serde_json::Value;
use tokio::runtime::Runtime;

use crate::credential::{AppAccessToken, AppCredentialProvider, AppCredentials};
use crate::error::{AppError, Result};
use crate::subscription::{FieldList, Subscription, SubscriptionObject};

/// Blocking client for operations scoped to one Graph application.
///
/// The app access token is fetched once in [`connect`](Self::connect) and
/// reused for every call. Like the batch executor, the client owns a
/// current-thread runtime and must not be used from inside another one.
pub struct GraphApp<T: HttpTransport> {
    transport:   T,
    endpoints:   Endpoints,
    credentials: AppCredentialProvider,
    runtime:     Runtime,
}

impl<T: HttpTransport> GraphApp<T> {
    pub fn connect(transport: T, endpoints: Endpoints, credentials: &AppCredentials) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(AppError::Runtime)?;

        let provider =
            runtime.block_on(AppCredentialProvider::exchange(&transport, &endpoints, credentials))?;
        tracing::info!(app_id = %provider.app_id(), "app access token acquired");

        Ok(Self {
            transport,
            endpoints,
            credentials: provider,
            runtime,
        })
    }

    pub fn from_config(transport: T, config: &GraphConfig) -> Result<Self> {
        let credentials = AppCredentials::from_config(config)?;
        Self::connect(transport, Endpoints::from_config(&config.endpoints), &credentials)
    }

    pub fn app_id(&self) -> &str {
        self.credentials.app_id()
    }

    pub fn access_token(&self) -> &AppAccessToken {
        self.credentials.token()
    }

    /// Subscriptions currently registered for this application.
    pub fn subscriptions(&self) -> Result<Vec<Subscription>> {
        let params = Params::new().with("access_token", self.access_token().as_str());
        let value = self.call(Method::Get, params)?;

        let list = match value {
            Value::Array(items) => Value::Array(items),
            Value::Object(mut map) => map
                .remove("data")
                .ok_or_else(|| AppError::Shape("subscription list has no `data` member".to_string()))?,
            other => return Err(AppError::Shape(format!("expected a subscription list, got {other}"))),
        };
        serde_json::from_value(list).map_err(|e| AppError::Parse(e.into()))
    }

    /// Register (or update) the subscription for `object`.
    ///
    /// Returns `Ok(None)` without contacting the API when `fields` is a
    /// [`FieldList::Scalar`]. The callback URL must answer the verification
    /// challenge for the API to accept the subscription.
    pub fn add_subscription(
        &self,
        verify_token: &str,
        callback_url: &str,
        object: impl Into<SubscriptionObject>,
        fields: &FieldList,
    ) -> Result<Option<Value>> {
        let Some(joined) = fields.joined() else {
            tracing::warn!("subscription fields are not a collection, skipping request");
            return Ok(None);
        };
        let joined = joined?;
        let object = object.into();

        let params = Params::new()
            .with("access_token", self.access_token().as_str())
            .with("verify_token", verify_token)
            .with("callback_url", callback_url)
            .with("object", object.as_str())
            .with("fields", joined);

        tracing::debug!(%object, callback_url, "adding subscription");
        self.call(Method::Post, params).map(Some)
    }

    fn call(&self, method: Method, params: Params) -> Result<Value> {
        let path = format!("/{}/subscriptions", self.app_id());
        let request = Request::new(&self.endpoints, DomainKind::Graph, &path, method, params);

        let body = self.runtime.block_on(self.transport.perform(&request))?;
        let value = parse_value(&body)?;
        if let Some(error) = api_error(&value) {
            return Err(error.into());
        }
        Ok(value)
    }
}
