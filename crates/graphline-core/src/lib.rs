//! Building blocks shared by the Graph API client crates.
//!
//! # Architecture
//!
//! - [`data`] - Immutable request descriptors, identities and parameters
//! - [`endpoints`] - Host table and `build_url`
//! - [`json`] - Response decoding
//! - [`effects`] - The [`HttpTransport`] capability and its implementations
//!
//! Nothing in this crate blocks or spawns. Driving many requests at once is
//! the job of `graphline-batch`.

pub mod config;
pub mod data;
pub mod effects;
pub mod endpoints;
mod error;
pub mod json;

pub use config::{ConfigError, GraphConfig};
pub use data::{Identity, Method, ParamValue, Params, Request, RequestDescriptor};
pub use effects::HttpTransport;
pub use endpoints::{DomainKind, Endpoints};
pub use error::{InvalidInput, ParseError, TransportError};
pub use json::{GraphApiError, api_error, parse_json, parse_value};

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;

#[cfg(feature = "mock")]
pub use effects::{MockResponse, MockTransport};
