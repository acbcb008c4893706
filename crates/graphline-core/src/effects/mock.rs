use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use bytes::Bytes;

use super::HttpTransport;
use crate::data::Request;
use crate::error::TransportError;

/// Scripted reply for one URL.
#[derive(Debug, Clone)]
pub struct MockResponse {
    outcome: Result<Bytes, TransportError>,
    delay:   Duration,
}

impl MockResponse {
    pub fn body(body: impl Into<Bytes>) -> Self {
        Self {
            outcome: Ok(body.into()),
            delay:   Duration::ZERO,
        }
    }

    pub fn json(value: &serde_json::Value) -> Self {
        Self::body(value.to_string())
    }

    pub fn fail(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            delay:   Duration::ZERO,
        }
    }

    /// Delay the reply, to force a particular completion order.
    #[must_use]
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Debug, Default)]
struct MockState {
    routes:   HashMap<String, MockResponse>,
    fallback: Option<MockResponse>,
    calls:    Vec<Request>,
}

/// In-memory transport keyed by absolute URL, with a call log.
///
/// Clones share state, so a test can keep one copy while another is moved
/// into the code under test.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn route(self, url: impl Into<String>, response: MockResponse) -> Self {
        self.set_route(url, response);
        self
    }

    /// Reply used for URLs without a route. Without one they fail to connect.
    #[must_use]
    pub fn fallback(self, response: MockResponse) -> Self {
        self.lock().fallback = Some(response);
        self
    }

    pub fn set_route(&self, url: impl Into<String>, response: MockResponse) {
        self.lock().routes.insert(url.into(), response);
    }

    pub fn calls(&self) -> Vec<Request> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HttpTransport for MockTransport {
    async fn perform(&self, request: &Request) -> Result<Bytes, TransportError> {
        let response = {
            let mut state = self.lock();
            state.calls.push(request.clone());
            state
                .routes
                .get(&request.url)
                .or(state.fallback.as_ref())
                .cloned()
        };

        let Some(response) = response else {
            return Err(TransportError::Connect(format!("no route for {}", request.url)));
        };

        if !response.delay.is_zero() {
            tokio::time::sleep(response.delay).await;
        }
        response.outcome
    }
}
