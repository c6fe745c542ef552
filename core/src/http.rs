//! Transport seam between the connector and the network.
//!
//! # Design
//! The connector never opens sockets itself. It hands a finished URL (and,
//! for POST, a body) to a `Transport` and receives the status code and raw
//! bytes back as plain data. Non-2xx statuses are data, not errors; only
//! failures to complete the exchange are `TransportError`s. Interpreting the
//! status is the connector's job.
//!
//! Each call carries an optional timeout for that exchange alone. `None`
//! leaves the transport's own default in place.
//!
//! `HttpTransport` is the default, backed by a ureq agent. Tests and embedders
//! substitute their own implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConnectorConfig;
use crate::error::TransportError;

/// Content type the remote expects on POST bodies.
pub const POST_CONTENT_TYPE: &str = "text/html";

/// HTTP method of a dispatched call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Status and body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status <= 299
    }
}

/// Performs the actual HTTP round-trip for the connector.
///
/// Implementations must be shareable across threads; a single `Connector` may
/// be used by many callers at once.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError>;

    fn post(
        &self,
        url: &str,
        body: &[u8],
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        (**self).get(url, timeout)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        (**self).get(url, timeout)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        (**self).get(url, timeout)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        (**self).post(url, body, timeout)
    }
}

/// Blocking transport backed by a ureq agent.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses come back as `HttpResponse` values and reach the connector's
/// status check.
#[derive(Clone)]
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::with_timeout(None)
    }
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `timeout` bounds the whole exchange, connect through body read.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn from_config(config: &ConnectorConfig) -> Self {
        Self::with_timeout(config.timeout())
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str, timeout: Option<Duration>) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.get(url);
        if let Some(timeout) = timeout {
            request = request.config().timeout_global(Some(timeout)).build();
        }
        let response = request.call().map_err(request_error)?;
        read_response(response)
    }

    fn post(
        &self,
        url: &str,
        body: &[u8],
        timeout: Option<Duration>,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url);
        if let Some(timeout) = timeout {
            request = request.config().timeout_global(Some(timeout)).build();
        }
        let response = request
            .content_type(POST_CONTENT_TYPE)
            .send(body)
            .map_err(request_error)?;
        read_response(response)
    }
}

fn read_response(
    mut response: ureq::http::Response<ureq::Body>,
) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_vec().map_err(request_error)?;
    Ok(HttpResponse { status, body })
}

fn request_error(err: ureq::Error) -> TransportError {
    TransportError::Request(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_ends_at_299() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(299, "").is_success());
        assert!(!HttpResponse::new(300, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let transport = HttpTransport::with_timeout(Some(Duration::from_secs(2)));
        // Nothing listens on the discard port.
        let err = transport.get("http://127.0.0.1:9/", None).unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
        assert!(err.to_string().starts_with("fetch error: "));
    }

    #[test]
    fn per_call_timeout_bounds_a_silent_server() {
        // Connections land in the backlog and are never answered.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());

        let transport = HttpTransport::new();
        let started = std::time::Instant::now();
        let err = transport
            .get(&url, Some(Duration::from_millis(300)))
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
        assert!(started.elapsed() < Duration::from_secs(10));

        let err = transport
            .post(&url, &[], Some(Duration::from_millis(300)))
            .unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
        drop(listener);
    }
}
