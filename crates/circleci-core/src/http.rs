//! HTTP transport seam.
//!
//! The client talks to the provider through [`HttpTransport`] so the wire
//! layer can be swapped; [`ReqwestTransport`] is the production adapter.

use std::fmt;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method};

use crate::error::{CoreError, Result};

/// HTTP methods used by the provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// A fully built request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute URL, including any query string.
    pub url: String,
    /// Headers in the order they are sent.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Looks up a header value by exact name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// URL with the query string removed, safe to log.
    #[must_use]
    pub fn url_without_query(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

/// A received response, with the connection metadata used for error
/// reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Reason phrase for the status.
    pub reason: String,
    /// Origin the response came from, e.g. `https://circleci.com`.
    pub host: String,
    /// Request path, without the query string.
    pub path: String,
    /// Raw body.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is within `[200, 300)`.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Turns a non-2xx response into [`CoreError::UnsuccessfulRequest`].
    ///
    /// # Errors
    ///
    /// Returns an error if the status is outside `[200, 300)`.
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }

        Err(CoreError::UnsuccessfulRequest {
            host: self.host,
            path: self.path,
            status: self.status,
            reason: self.reason,
        })
    }
}

/// Executes one request and returns the response, whatever its status.
#[async_trait]
pub trait HttpTransport: Send + Sync + fmt::Debug {
    /// Send a request.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Transport`] if no response was received.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: ReqwestClient,
}

impl ReqwestTransport {
    /// Creates a transport with default settings.
    ///
    /// Header names are written in title case so they reach the provider
    /// exactly as `Circle-Token`, `Content-Type` and `Accept`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self> {
        let client = ReqwestClient::builder()
            .user_agent(concat!("circleci-tasks/", env!("CARGO_PKG_VERSION")))
            .http1_title_case_headers()
            .build()
            .map_err(|e| CoreError::Transport(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport around a custom reqwest client.
    #[must_use]
    pub const fn with_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| CoreError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        let url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| CoreError::Transport(e.without_url().to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            host: url.origin().ascii_serialization(),
            path: url.path().to_string(),
            body,
        })
    }
}
