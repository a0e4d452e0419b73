//! The outbound HTTP seam.
//!
//! rustbucket never opens sockets itself. A [`Transport`] receives a fully
//! signed [`HttpRequest`] and returns the raw [`HttpResponse`]; the client
//! never retries. The timeout on the request is a hint the transport should
//! honor.

use std::time::Duration;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};

/// A signed request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    /// Headers, signature included.
    pub headers: HeaderMap,
    /// Request body.
    pub body: Bytes,
    /// Timeout hint.
    pub timeout: Duration,
}

/// A raw response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Header value as a string, if present and valid.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Failure to complete an HTTP exchange.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request did not finish within its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The connection could not be established or broke.
    #[error("connection error: {0}")]
    Connection(String),

    /// Any other transport problem.
    #[error("{0}")]
    Other(String),
}

/// Sends signed requests.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the response, whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_transport::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_transport {
    use tracing::debug;

    use super::{HttpRequest, HttpResponse, Transport, TransportError};

    /// [`Transport`] backed by a shared `reqwest::Client`.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
    }

    impl ReqwestTransport {
        /// Wrap an existing client.
        #[must_use]
        pub fn new(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    #[async_trait::async_trait]
    impl Transport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let timeout = request.timeout;
            let response = self
                .client
                .request(request.method, &request.url)
                .headers(request.headers)
                .body(request.body)
                .timeout(timeout)
                .send()
                .await
                .map_err(|e| map_error(&e, timeout))?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|e| map_error(&e, timeout))?;

            debug!(status = status.as_u16(), bytes = body.len(), "received response");
            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn map_error(err: &reqwest::Error, timeout: std::time::Duration) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(timeout)
        } else if err.is_connect() {
            TransportError::Connection(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}
