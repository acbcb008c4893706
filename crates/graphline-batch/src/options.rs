use std::time::Duration;

use graphline_core::config::BatchConfig;

/// What `submit` does when the identity is already pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Abort the earlier request and keep the new one. Last submission wins.
    #[default]
    Replace,
    /// Refuse the new request; the earlier one stays in flight.
    Reject,
}

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Upper bound for each request, measured from its first poll.
    /// `None` lets a request run until the transport gives up.
    pub request_timeout: Option<Duration>,
    pub on_duplicate:    DuplicatePolicy,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            request_timeout: Some(Duration::from_secs(30)),
            on_duplicate:    DuplicatePolicy::Replace,
        }
    }
}

impl BatchOptions {
    pub fn from_config(config: &BatchConfig) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            on_duplicate:    if config.reject_duplicates {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::Replace
            },
        }
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn on_duplicate(mut self, policy: DuplicatePolicy) -> Self {
        self.on_duplicate = policy;
        self
    }
}
