use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// A single request parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Text(s) => serializer.serialize_str(s),
            ParamValue::Int(n) => serializer.serialize_i64(*n),
            ParamValue::Float(n) => serializer.serialize_f64(*n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self { ParamValue::Text(s.to_owned()) }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self { ParamValue::Text(s) }
}

impl From<&String> for ParamValue {
    fn from(s: &String) -> Self { ParamValue::Text(s.clone()) }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self { ParamValue::Int(n) }
}

impl From<i32> for ParamValue {
    fn from(n: i32) -> Self { ParamValue::Int(n.into()) }
}

impl From<u32> for ParamValue {
    fn from(n: u32) -> Self { ParamValue::Int(n.into()) }
}

impl From<f64> for ParamValue {
    fn from(n: f64) -> Self { ParamValue::Float(n) }
}

/// String-keyed request parameters, kept in key order so encoded bodies are
/// stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `overrides` into `self`; keys present in both take the override.
    #[must_use]
    pub fn merge_overrides(mut self, overrides: Params) -> Self {
        self.0.extend(overrides.0);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Form-style `key=value` pairs joined with `&`, without percent-encoding.
    /// Intended for logs and test assertions, not for the wire.
    pub fn to_display_query(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
