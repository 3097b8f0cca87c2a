//! HTTP transport types and the injected transport seam.
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! hands it to a `Transport`, and interprets the returned `HttpResponse`
//! itself; the transport never judges status codes. Timeouts, TLS and
//! connection reuse belong to the transport implementation.

use std::sync::Arc;

use crate::error::ApiError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// An HTTP request described as plain data.
///
/// `url` already carries the encoded query string for GET requests.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one request and returns whatever the server answered.
///
/// Non-2xx responses must be returned as `Ok`; `Err` is reserved for failures
/// where no response was received.
pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}

#[cfg(feature = "ureq")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq")]
mod blocking {
    use std::time::Duration;

    use super::{HttpMethod, HttpRequest, HttpResponse, Transport};
    use crate::error::ApiError;

    /// Blocking transport backed by a `ureq` agent.
    ///
    /// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
    /// responses come back as data for the client to interpret.
    #[derive(Debug, Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
    }

    impl UreqTransport {
        pub fn new() -> Self {
            Self::build(None)
        }

        /// Bound every request (connect through body read) by `timeout`.
        pub fn with_timeout(timeout: Duration) -> Self {
            Self::build(Some(timeout))
        }

        fn build(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self { agent }
        }
    }

    impl Default for UreqTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            let result = match (request.method, request.body.as_deref()) {
                (HttpMethod::Get, _) => self.agent.get(&request.url).call(),
                (HttpMethod::Post, body) => {
                    let mut builder = self.agent.post(&request.url);
                    for (name, value) in &request.headers {
                        builder = builder.header(name.as_str(), value.as_str());
                    }
                    builder.send(body.unwrap_or("").as_bytes())
                }
            };
            let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

            let status = response.status();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .body_mut()
                .read_to_string()
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            Ok(HttpResponse {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                headers,
                body,
            })
        }
    }
}
