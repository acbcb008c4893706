//! TOML configuration shared by the client crates and the CLI.
//!
//! Lookup order: an explicit path, then `~/.graphline/config.toml` if it
//! exists, then built-in defaults. `GRAPHLINE_APP_ID` and
//! `GRAPHLINE_APP_SECRET` override the `[app]` section afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_ID_ENV: &str = "GRAPHLINE_APP_ID";
pub const APP_SECRET_ENV: &str = "GRAPHLINE_APP_SECRET";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("missing configuration value: {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub app:       AppConfig,
    pub endpoints: EndpointsConfig,
    pub http:      HttpConfig,
    pub batch:     BatchConfig,
}

#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub id:     Option<String>,
    pub secret: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("id", &self.id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Per-host base URL overrides; `None` keeps the public default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub api:      Option<String>,
    pub api_read: Option<String>,
    pub cdn:      Option<String>,
    pub graph:    Option<String>,
    pub www:      Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub timeout_secs:         u64,
    pub user_agent:           String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            timeout_secs:         60,
            user_agent:           concat!("graphline/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// `0` disables the per-request timeout.
    pub request_timeout_secs: u64,
    pub reject_duplicates:    bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 30,
            reject_duplicates:    false,
        }
    }
}

impl BatchConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

impl GraphConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// `~/.graphline/config.toml`, if a home directory is known.
    pub fn default_path() -> Option<PathBuf> {
        home::home_dir().map(|h| h.join(".graphline").join("config.toml"))
    }

    /// Resolve configuration from `explicit`, the default path, or defaults,
    /// then apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => {
                    tracing::debug!(path = %path.display(), "loading default config");
                    Self::from_file(&path)?
                }
                None => Self::default(),
            },
        };
        Ok(config.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Apply `[app]` overrides from `lookup`, usually the process environment.
    #[must_use]
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(id) = lookup(APP_ID_ENV).filter(|v| !v.is_empty()) {
            self.app.id = Some(id);
        }
        if let Some(secret) = lookup(APP_SECRET_ENV).filter(|v| !v.is_empty()) {
            self.app.secret = Some(secret);
        }
        self
    }

    pub fn app_id(&self) -> Result<&str, ConfigError> {
        self.app.id.as_deref().ok_or(ConfigError::Missing("app.id"))
    }

    pub fn app_secret(&self) -> Result<&str, ConfigError> {
        self.app.secret.as_deref().ok_or(ConfigError::Missing("app.secret"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = GraphConfig::default();
        assert_eq!(c.http.timeout(), Duration::from_secs(60));
        assert_eq!(c.batch.request_timeout(), Some(Duration::from_secs(30)));
        assert!(!c.batch.reject_duplicates);
        assert!(matches!(c.app_id(), Err(ConfigError::Missing("app.id"))));
    }

    #[test]
    fn test_partial_toml() {
        let c = GraphConfig::from_toml_str(
            r#"
            [app]
            id = "123"

            [batch]
            request_timeout_secs = 0
            "#,
        )
        .unwrap();

        assert_eq!(c.app_id().unwrap(), "123");
        assert_eq!(c.batch.request_timeout(), None);
        assert_eq!(c.http.connect_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            GraphConfig::from_toml_str("[app\nid = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_from_file_and_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[app]\nid = \"from-file\"\nsecret = \"s1\"").unwrap();

        let c = GraphConfig::from_file(file.path()).unwrap().with_overrides(|key| match key {
            APP_ID_ENV => Some("from-env".to_string()),
            APP_SECRET_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(c.app_id().unwrap(), "from-env");
        assert_eq!(c.app_secret().unwrap(), "s1");
    }

    #[test]
    fn test_missing_file() {
        let err = GraphConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_secret_redacted_in_debug() {
        let app = AppConfig {
            id:     Some("1".into()),
            secret: Some("hunter2".into()),
        };
        assert!(!format!("{app:?}").contains("hunter2"));
    }
}
