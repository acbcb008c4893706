use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Identity, ParamValue, Params};
use crate::endpoints::{DomainKind, Endpoints};
use crate::error::InvalidInput;

/// HTTP method as understood by the Graph API.
///
/// The wire request is always a form POST; the logical method travels as the
/// `method` override parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready for an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub url:    String,
    pub method: Method,
    pub params: Params,
}

impl Request {
    /// Build a request against `kind`'s host, merging the `method` override
    /// tag into `params`.
    pub fn new(endpoints: &Endpoints, kind: DomainKind, path: &str, method: Method, params: Params) -> Self {
        let params = params.merge_overrides(Params::new().with("method", method.as_str()));
        Self {
            url: endpoints.url(kind, path),
            method,
            params,
        }
    }
}

/// One pending fetch inside a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    identity: Identity,
    path:     String,
    params:   Params,
    method:   Method,
}

impl RequestDescriptor {
    pub fn get(identity: Identity, path: impl Into<String>, params: Params) -> Self {
        Self {
            identity,
            path: path.into(),
            params,
            method: Method::Get,
        }
    }

    /// Descriptor for fetching a user's changed fields after a real-time
    /// update notification.
    ///
    /// The identity is `"{user_id};{fields};{since}"`, so the same user can be
    /// fetched for different field sets within one batch.
    pub fn user_changes(
        user_id: &str,
        fields: &str,
        access_token: &str,
        since: &str,
    ) -> Result<Self, InvalidInput> {
        if user_id.is_empty() {
            return Err(InvalidInput::Empty("user id"));
        }
        let identity = Identity::new([user_id, fields, since].join(";"))?;
        let params = Params::new()
            .with("access_token", access_token)
            .with("fields", fields)
            .with("since", since);

        Ok(Self::get(identity, format!("/{user_id}/"), params))
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    /// Split into the identity and the Graph request it describes.
    pub fn into_request(self, endpoints: &Endpoints) -> (Identity, Request) {
        let request = Request::new(endpoints, DomainKind::Graph, &self.path, self.method, self.params);
        (self.identity, request)
    }
}
