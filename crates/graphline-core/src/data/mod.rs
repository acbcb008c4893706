//! Immutable data types describing outbound requests.

mod identity;
mod params;
mod request;

pub use identity::Identity;
pub use params::{ParamValue, Params};
pub use request::{Method, Request, RequestDescriptor};
