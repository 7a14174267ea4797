//! HTTP transport implementation for A2A protocol

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::protocol::error::A2AError;

use super::{HttpMethod, Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// Endpoints are resolved relative to the agent's base URL, which is treated
/// as a directory so agents mounted below a path prefix keep that prefix.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the agent (e.g., "<http://localhost:10010/>")
    pub fn new(base_url: Url) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new HTTP transport with a custom reqwest client
    pub fn with_client(mut base_url: Url, client: reqwest::Client) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Self { client, base_url }
    }

    /// Resolve an endpoint against the base URL
    pub fn endpoint_url(&self, endpoint: &str) -> Result<Url, A2AError> {
        self.base_url
            .join(endpoint.trim_start_matches('/'))
            .map_err(|e| A2AError::Transport(format!("Invalid endpoint {}: {}", endpoint, e)))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        let url = self.endpoint_url(&request.path)?;
        debug!(method = %request.method, %url, "sending A2A request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(url),
            HttpMethod::Post => self.client.post(url).body(request.body),
        };
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(TransportResponse { status, body })
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}
