use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    protocol::error::A2AError,
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Scripted agent for unit tests
///
/// Every request is answered by `handler`, which may also assert on what the
/// client sent.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<dyn Fn(TransportRequest) -> TransportResponse + Send + Sync>,
    base_url: Url,
}

impl MockTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            base_url: Url::parse(MOCK_AGENT_URL).unwrap(),
        }
    }

    /// An agent answering every call with the JSON-RPC `result`
    pub fn rpc_result(result: serde_json::Value) -> Self {
        Self::new(move |_| rpc_reply(&result))
    }
}

/// Base URL of every mock agent
pub(crate) const MOCK_AGENT_URL: &str = "http://agent.test/";

/// A 200 carrying a JSON-RPC success envelope around `result`
pub(crate) fn rpc_reply(result: &serde_json::Value) -> TransportResponse {
    let envelope = serde_json::json!({"jsonrpc": "2.0", "id": "1", "result": result});
    TransportResponse::new(200).with_body(serde_json::to_vec(&envelope).unwrap())
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        Ok((self.handler)(request))
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}
