use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub json_format:   bool,
    /// Used when `RUST_LOG` is unset.
    pub default_level: Level,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            json_format:   false,
            default_level: Level::INFO,
        }
    }
}

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays machine readable. Later calls are no-ops.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.to_string()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let _ = if config.json_format {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
