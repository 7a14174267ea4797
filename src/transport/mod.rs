//! Byte-level exchange with an agent
//!
//! A [`Transport`] moves one request to an agent and brings back status and
//! body. It knows nothing of JSON-RPC; the codec and the protocol service sit
//! on top.

pub mod http;
#[cfg(test)]
pub mod mock;

use std::task::{Context, Poll};

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

pub use crate::protocol::HttpMethod;
use crate::protocol::error::A2AError;

/// A request addressed relative to the agent's base URL
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: HttpMethod,

    /// Path under the agent URL, empty for the JSON-RPC endpoint
    pub path: String,

    pub headers: Vec<(String, String)>,

    /// Only sent with POST
    pub body: Bytes,
}

impl TransportRequest {
    /// A bodiless GET of `path`
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    /// A POST of `body` to `path`
    pub fn post(path: impl Into<String>, body: Bytes) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Add a header, replacing any earlier value under the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Value of header `name`, matched case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back from the agent
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: Bytes::new(),
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human readable reason carried by an error body
    ///
    /// Looks for a top-level `message` or a JSON-RPC `error.message`.
    pub fn error_message(&self) -> Option<String> {
        let json = serde_json::from_slice::<serde_json::Value>(&self.body).ok()?;
        json.get("message")
            .or_else(|| json.pointer("/error/message"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}

/// Moves requests to one agent
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Backpressure hook for the protocol service, ready by default
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError>;

    /// URL the agent is served under
    fn base_url(&self) -> &Url;
}
