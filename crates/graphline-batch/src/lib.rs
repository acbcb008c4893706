//! Concurrent batched fetches against a single Graph host.
//!
//! Requests are registered with [`BatchExecutor::submit`] and start moving
//! once the executor's runtime is driven. [`BatchExecutor::drain_and_collect`]
//! blocks until every one of them reaches a terminal state, and the
//! [`ResultDispatcher`] turns the raw bodies into per-identity results.
//!
//! ```no_run
//! use graphline_batch::{BatchExecutor, BatchOptions};
//! use graphline_core::{Endpoints, Params, ReqwestTransport};
//! use graphline_core::config::HttpConfig;
//!
//! let transport = ReqwestTransport::new(&HttpConfig::default()).unwrap();
//! let mut batch = BatchExecutor::new(transport, Endpoints::default(), BatchOptions::default()).unwrap();
//!
//! for id in ["4", "5"] {
//!     let params = Params::new().with("access_token", "token").with("fields", "name");
//!     batch.submit(id, &format!("/{id}/"), params).unwrap();
//! }
//!
//! let results = batch.run(|id, result| println!("{id}: {result:?}"));
//! assert_eq!(results.len(), 2);
//! ```

mod dispatch;
mod error;
mod executor;
mod options;

pub use dispatch::{FetchFailure, FetchResult, ResultDispatcher};
pub use graphline_core::GraphApiError;
pub use error::{BatchError, Result};
pub use executor::{BatchExecutor, RawBatch, RawResponse};
pub use options::{BatchOptions, DuplicatePolicy};
