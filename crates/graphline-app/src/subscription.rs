use std::fmt;

use graphline_core::InvalidInput;
use serde::{Deserialize, Deserializer, Serialize};

/// Object type a subscription watches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionObject {
    User,
    Permissions,
    Page,
    Other(String),
}

impl SubscriptionObject {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionObject::User => "user",
            SubscriptionObject::Permissions => "permissions",
            SubscriptionObject::Page => "page",
            SubscriptionObject::Other(name) => name,
        }
    }
}

impl From<String> for SubscriptionObject {
    fn from(s: String) -> Self {
        match s.as_str() {
            "user" => SubscriptionObject::User,
            "permissions" => SubscriptionObject::Permissions,
            "page" => SubscriptionObject::Page,
            _ => SubscriptionObject::Other(s),
        }
    }
}

impl From<&str> for SubscriptionObject {
    fn from(s: &str) -> Self {
        SubscriptionObject::from(s.to_string())
    }
}

impl From<SubscriptionObject> for String {
    fn from(o: SubscriptionObject) -> Self {
        o.as_str().to_string()
    }
}

impl fmt::Display for SubscriptionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered real-time update subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub object:       SubscriptionObject,
    pub callback_url: String,
    #[serde(default, deserialize_with = "field_names")]
    pub fields:       Vec<String>,
    #[serde(default)]
    pub active:       bool,
}

// Fields arrive either as plain names or as `{"name": ..., "version": ...}`.
fn field_names<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Field {
        Name(String),
        Versioned { name: String },
    }

    let fields = Vec::<Field>::deserialize(deserializer)?;
    Ok(fields
        .into_iter()
        .map(|f| match f {
            Field::Name(name) | Field::Versioned { name } => name,
        })
        .collect())
}

/// The `fields` argument of a subscription request.
///
/// Only a [`Collection`](FieldList::Collection) is sent. A
/// [`Scalar`](FieldList::Scalar) is accepted so callers holding a single
/// untyped value can pass it through, but no request is made for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldList {
    Collection(Vec<String>),
    Scalar(String),
}

impl FieldList {
    pub fn collection<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldList::Collection(fields.into_iter().map(Into::into).collect())
    }

    /// Comma-joined names, or `None` for a scalar.
    pub fn joined(&self) -> Option<Result<String, InvalidInput>> {
        match self {
            FieldList::Scalar(_) => None,
            FieldList::Collection(fields) if fields.is_empty() => Some(Err(InvalidInput::Empty("fields"))),
            FieldList::Collection(fields) if fields.iter().any(|f| f.trim().is_empty()) => {
                Some(Err(InvalidInput::EmptyField))
            }
            FieldList::Collection(fields) => Some(Ok(fields.join(","))),
        }
    }
}

impl From<Vec<String>> for FieldList {
    fn from(fields: Vec<String>) -> Self {
        FieldList::Collection(fields)
    }
}

impl From<&[&str]> for FieldList {
    fn from(fields: &[&str]) -> Self {
        FieldList::collection(fields.iter().copied())
    }
}
