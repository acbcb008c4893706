//! The batch executor: one runtime, one handle table, many requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use futures_util::StreamExt;
use futures_util::stream::FuturesUnordered;
use graphline_core::{
    Endpoints, HttpTransport, Identity, Params, Request, RequestDescriptor, TransportError,
};
use serde::de::DeserializeOwned;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::dispatch::{FetchResult, ResultDispatcher};
use crate::error::{BatchError, Result};
use crate::options::{BatchOptions, DuplicatePolicy};

/// Raw outcome of one request: the response body or why there is none.
pub type RawResponse = std::result::Result<Bytes, TransportError>;

/// Harvested responses, one per submitted identity, in completion order.
#[derive(Debug, Default)]
pub struct RawBatch {
    entries: Vec<(Identity, RawResponse)>,
}

impl RawBatch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identity: &str) -> Option<&RawResponse> {
        self.entries
            .iter()
            .find(|(id, _)| id.as_str() == identity)
            .map(|(_, response)| response)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &RawResponse)> {
        self.entries.iter().map(|(id, response)| (id, response))
    }

    pub fn into_map(self) -> HashMap<Identity, RawResponse> {
        self.entries.into_iter().collect()
    }
}

impl IntoIterator for RawBatch {
    type Item = (Identity, RawResponse);
    type IntoIter = std::vec::IntoIter<(Identity, RawResponse)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Runs many Graph GETs concurrently on a single thread.
///
/// The executor owns a current-thread tokio runtime for its whole lifetime
/// and a table of in-flight task handles keyed by [`Identity`]. Submissions
/// are queued on the runtime without blocking; they make progress only while
/// [`drain_and_collect`](Self::drain_and_collect) drives it. Every handle is
/// harvested once and then dropped, and the table is empty again afterwards,
/// so one executor serves any number of consecutive batches.
///
/// `drain_and_collect` blocks the calling thread. Calling it, or dropping the
/// executor, from inside another async runtime panics.
pub struct BatchExecutor<T: HttpTransport> {
    transport:  Arc<T>,
    endpoints:  Endpoints,
    options:    BatchOptions,
    dispatcher: ResultDispatcher,
    in_flight:  HashMap<Identity, JoinHandle<RawResponse>>,
    runtime:    Runtime,
}

impl<T: HttpTransport> BatchExecutor<T> {
    pub fn new(transport: T, endpoints: Endpoints, options: BatchOptions) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(BatchError::Runtime)?;

        Ok(Self {
            transport: Arc::new(transport),
            endpoints,
            options,
            dispatcher: ResultDispatcher::default(),
            in_flight: HashMap::new(),
            runtime,
        })
    }

    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: ResultDispatcher) -> Self {
        self.dispatcher = dispatcher;
        self
    }

    /// Number of requests submitted since the last drain.
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_flight.is_empty()
    }

    pub fn is_pending(&self, identity: &str) -> bool {
        self.in_flight.contains_key(identity)
    }

    /// Register a GET for `path` on the Graph host.
    ///
    /// Fails only for an empty identity or, under
    /// [`DuplicatePolicy::Reject`], an identity that is already pending.
    pub fn submit(&mut self, identity: &str, path: &str, params: Params) -> Result<()> {
        let identity = Identity::new(identity)?;
        self.submit_descriptor(RequestDescriptor::get(identity, path, params))
    }

    pub fn submit_descriptor(&mut self, descriptor: RequestDescriptor) -> Result<()> {
        if self.options.on_duplicate == DuplicatePolicy::Reject
            && self.in_flight.contains_key(descriptor.identity())
        {
            return Err(BatchError::DuplicateIdentity(descriptor.identity().clone()));
        }

        let (identity, request) = descriptor.into_request(&self.endpoints);
        tracing::debug!(identity = %identity, url = %request.url, "submitting request");

        let handle = self.spawn(request);
        if let Some(replaced) = self.in_flight.insert(identity.clone(), handle) {
            tracing::warn!(identity = %identity, "identity resubmitted, aborting earlier request");
            replaced.abort();
        }
        Ok(())
    }

    fn spawn(&self, request: Request) -> JoinHandle<RawResponse> {
        let transport = Arc::clone(&self.transport);
        let limit = self.options.request_timeout;

        self.runtime.spawn(async move {
            let call = transport.perform(&request);
            match limit {
                Some(limit) => tokio::time::timeout(limit, call)
                    .await
                    .unwrap_or(Err(TransportError::Timeout)),
                None => call.await,
            }
        })
    }

    /// Block until every submitted request has finished, then return one
    /// entry per identity in completion order.
    ///
    /// Transport failures, timeouts and panicking transports are recorded in
    /// their own entry; they never cut the drain short.
    pub fn drain_and_collect(&mut self) -> RawBatch {
        if self.in_flight.is_empty() {
            return RawBatch::default();
        }

        let started = Instant::now();
        let mut harvest: FuturesUnordered<_> = self
            .in_flight
            .drain()
            .map(|(identity, handle)| async move { (identity, handle.await) })
            .collect();

        let entries = self.runtime.block_on(async move {
            let mut entries = Vec::with_capacity(harvest.len());
            while let Some((identity, joined)) = harvest.next().await {
                let response =
                    joined.unwrap_or_else(|e| Err(TransportError::Aborted(e.to_string())));
                if let Err(error) = &response {
                    tracing::debug!(identity = %identity, error = %error, "request failed");
                } else {
                    tracing::debug!(identity = %identity, "request completed");
                }
                entries.push((identity, response));
            }
            entries
        });

        let failures = entries.iter().filter(|(_, r)| r.is_err()).count();
        tracing::info!(
            entries = entries.len(),
            failures,
            elapsed = ?started.elapsed(),
            "batch drained"
        );

        RawBatch { entries }
    }

    /// Drain the batch and decode every entry as JSON, calling `handler`
    /// once per identity.
    pub fn run<F>(&mut self, handler: F) -> HashMap<Identity, FetchResult>
    where
        F: FnMut(&Identity, &FetchResult),
    {
        let raw = self.drain_and_collect();
        self.dispatcher.dispatch(raw, handler)
    }

    pub fn run_as<R, F>(&mut self, handler: F) -> HashMap<Identity, FetchResult<R>>
    where
        R: DeserializeOwned,
        F: FnMut(&Identity, &FetchResult<R>),
    {
        let raw = self.drain_and_collect();
        self.dispatcher.dispatch_as(raw, handler)
    }
}

impl<T: HttpTransport> Drop for BatchExecutor<T> {
    fn drop(&mut self) {
        if !self.in_flight.is_empty() {
            tracing::debug!(pending = self.in_flight.len(), "dropping executor with undrained requests");
        }
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}
