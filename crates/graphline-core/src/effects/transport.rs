use std::future::Future;
use std::sync::Arc;

use bytes::Bytes;

use crate::data::Request;
use crate::error::TransportError;

/// Asynchronous request primitive.
///
/// Implementations own URL signing, TLS and connection handling. A returned
/// body is handed back untouched, including Graph error payloads sent with a
/// 4xx status; only a failed exchange or an empty error response is an `Err`.
pub trait HttpTransport: Send + Sync + 'static {
    fn perform(&self, request: &Request) -> impl Future<Output = Result<Bytes, TransportError>> + Send;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    fn perform(&self, request: &Request) -> impl Future<Output = Result<Bytes, TransportError>> + Send {
        (**self).perform(request)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::config::HttpConfig;

    /// Production transport using `reqwest`.
    ///
    /// Parameters are sent as a form-encoded POST body; the logical method is
    /// the `method` parameter already merged into the request.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        pub fn new(config: &HttpConfig) -> Result<Self, TransportError> {
            let client = reqwest::Client::builder()
                .connect_timeout(config.connect_timeout())
                .timeout(config.timeout())
                .user_agent(config.user_agent.clone())
                .build()?;
            Ok(Self { client })
        }
    }

    impl HttpTransport for ReqwestTransport {
        async fn perform(&self, request: &Request) -> Result<Bytes, TransportError> {
            let response = self
                .client
                .post(&request.url)
                .form(&request.params)
                .send()
                .await?;

            let status = response.status();
            let body = response.bytes().await?;

            if body.is_empty() && !status.is_success() {
                return Err(TransportError::Status {
                    code: status.as_u16(),
                });
            }
            Ok(body)
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestTransport;
