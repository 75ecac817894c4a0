//! In-memory transport for tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use crate::error::{CoreError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[derive(Debug, Clone)]
struct Stub {
    method: HttpMethod,
    url: String,
    status: u16,
    body: String,
}

/// Records every request and answers from scripted stubs.
///
/// Stubs match on method and full URL and stay active once added. Requests
/// without a matching stub get `200 OK` with an empty JSON object.
#[derive(Debug, Default)]
pub struct StubTransport {
    stubs: Mutex<Vec<Stub>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    /// Create a transport with no stubs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method url` with `status` and `body`.
    ///
    /// A later stub for the same request takes precedence.
    pub fn stub(
        &self,
        method: HttpMethod,
        url: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> &Self {
        lock(&self.stubs).insert(
            0,
            Stub {
                method,
                url: url.into(),
                status,
                body: body.into(),
            },
        );
        self
    }

    /// All requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    /// `(method, url)` of every request received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        lock(&self.requests)
            .iter()
            .map(|request| (request.method, request.url.clone()))
            .collect()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let stub = lock(&self.stubs)
            .iter()
            .find(|stub| stub.method == request.method && stub.url == request.url)
            .cloned();
        let (status, body) = stub.map_or((200, "{}".to_string()), |s| (s.status, s.body));

        let url = Url::parse(&request.url).map_err(|e| CoreError::Transport(e.to_string()))?;
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or_default()
            .to_string();

        lock(&self.requests).push(request);

        Ok(HttpResponse {
            status,
            reason,
            host: url.origin().ascii_serialization(),
            path: url.path().to_string(),
            body,
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
