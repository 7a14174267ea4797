//! JSON-RPC 2.0 codec for A2A protocol
//!
//! Task operations are wrapped in JSON-RPC 2.0 envelopes posted to the agent's
//! base URL. Agent discovery is the one operation outside the envelope: the
//! agent card is served as a plain JSON document.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{
    codec::Codec,
    protocol::{agent::AgentCard, error::A2AError, operation::A2AOperation, task::Task},
    service::response::A2AResponse,
};

/// JSON-RPC 2.0 request envelope
#[derive(Debug, Serialize)]
struct JsonRpcRequest {
    jsonrpc: &'static str,
    id: String,
    method: &'static str,
    params: Value,
}

/// JSON-RPC 2.0 response envelope
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 codec for the task-oriented A2A binding
#[derive(Debug, Clone, Default)]
pub struct JsonRpcCodec;

impl JsonRpcCodec {
    /// Create a new JSON-RPC codec
    pub fn new() -> Self {
        Self
    }

    fn params(operation: &A2AOperation) -> Result<Value, A2AError> {
        let params = match operation {
            A2AOperation::SendTask(params) => serde_json::to_value(params)?,
            A2AOperation::GetTask(params) => serde_json::to_value(params)?,
            A2AOperation::CancelTask(params) => serde_json::to_value(params)?,
            A2AOperation::DiscoverAgent => Value::Null,
        };
        Ok(params)
    }
}

impl Codec for JsonRpcCodec {
    fn encode_request(&self, operation: &A2AOperation) -> Result<Bytes, A2AError> {
        // Discovery is a GET without a body
        if matches!(operation, A2AOperation::DiscoverAgent) {
            return Ok(Bytes::new());
        }

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: Uuid::now_v7().to_string(),
            method: operation.rpc_method(),
            params: Self::params(operation)?,
        };

        let bytes = serde_json::to_vec(&request)?;
        Ok(Bytes::from(bytes))
    }

    fn decode_response(
        &self,
        body: &[u8],
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        if body.is_empty() {
            return Err(A2AError::Protocol(format!(
                "Empty response body for {}",
                operation.rpc_method()
            )));
        }

        if matches!(operation, A2AOperation::DiscoverAgent) {
            let card: AgentCard = serde_json::from_slice(body)?;
            return Ok(A2AResponse::AgentCard(Box::new(card)));
        }

        // Parse JSON-RPC response envelope
        let envelope: JsonRpcResponse = serde_json::from_slice(body)
            .map_err(|e| A2AError::Protocol(format!("Failed to parse JSON-RPC response: {}", e)))?;

        // Check for JSON-RPC error
        if let Some(error) = envelope.error {
            return Err(A2AError::from_rpc(
                error.code,
                error.message,
                operation.task_id(),
            ));
        }

        match envelope.result {
            Some(Value::Null) | None => Err(A2AError::Protocol(
                "JSON-RPC response missing 'result' field".to_string(),
            )),
            Some(result) => {
                let task: Task = serde_json::from_value(result)?;
                Ok(A2AResponse::Task(Box::new(task)))
            }
        }
    }

    fn content_type(&self) -> &str {
        "application/json"
    }
}
