//! The transport capability: "perform an HTTP request and return raw bytes
//! or fail".

mod transport;

#[cfg(feature = "mock")]
mod mock;

pub use transport::HttpTransport;

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;

#[cfg(feature = "mock")]
pub use mock::{MockResponse, MockTransport};
