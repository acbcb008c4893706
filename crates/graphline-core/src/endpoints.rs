//! Host table for the Graph API families and URL construction.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::EndpointsConfig;

/// Which API host a path is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Api,
    ApiRead,
    Cdn,
    Graph,
    Www,
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DomainKind::Api => "api",
            DomainKind::ApiRead => "api_read",
            DomainKind::Cdn => "cdn",
            DomainKind::Graph => "graph",
            DomainKind::Www => "www",
        };
        f.write_str(name)
    }
}

/// Base URLs, one per [`DomainKind`]. Every base ends with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api:      String,
    api_read: String,
    cdn:      String,
    graph:    String,
    www:      String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            api:      "https://api.facebook.com/".to_string(),
            api_read: "https://api-read.facebook.com/".to_string(),
            cdn:      "http://static.ak.fbcdn.net/".to_string(),
            graph:    "https://graph.facebook.com/".to_string(),
            www:      "https://www.facebook.com/".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every host at one base URL. Used for staging hosts and tests.
    pub fn single_host(base: &str) -> Self {
        let base = with_trailing_slash(base);
        Self {
            api:      base.clone(),
            api_read: base.clone(),
            cdn:      base.clone(),
            graph:    base.clone(),
            www:      base,
        }
    }

    pub fn from_config(config: &EndpointsConfig) -> Self {
        let mut endpoints = Self::default();
        let overrides = [
            (DomainKind::Api, &config.api),
            (DomainKind::ApiRead, &config.api_read),
            (DomainKind::Cdn, &config.cdn),
            (DomainKind::Graph, &config.graph),
            (DomainKind::Www, &config.www),
        ];
        for (kind, value) in overrides {
            if let Some(base) = value {
                endpoints = endpoints.with_base(kind, base);
            }
        }
        endpoints
    }

    #[must_use]
    pub fn with_base(mut self, kind: DomainKind, base: &str) -> Self {
        *self.slot_mut(kind) = with_trailing_slash(base);
        self
    }

    pub fn base(&self, kind: DomainKind) -> &str {
        match kind {
            DomainKind::Api => &self.api,
            DomainKind::ApiRead => &self.api_read,
            DomainKind::Cdn => &self.cdn,
            DomainKind::Graph => &self.graph,
            DomainKind::Www => &self.www,
        }
    }

    /// Absolute URL for `path` on `kind`'s host. One leading `/` is dropped.
    pub fn url(&self, kind: DomainKind, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}{}", self.base(kind), path)
    }

    fn slot_mut(&mut self, kind: DomainKind) -> &mut String {
        match kind {
            DomainKind::Api => &mut self.api,
            DomainKind::ApiRead => &mut self.api_read,
            DomainKind::Cdn => &mut self.cdn,
            DomainKind::Graph => &mut self.graph,
            DomainKind::Www => &mut self.www,
        }
    }
}

fn with_trailing_slash(base: &str) -> String {
    if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    }
}
