//! Error types for A2A protocol operations

use thiserror::Error;

/// JSON-RPC error code for an unknown task
pub const TASK_NOT_FOUND_CODE: i64 = -32001;

/// JSON-RPC error code for a task that can no longer be canceled
pub const TASK_NOT_CANCELABLE_CODE: i64 = -32002;

/// JSON-RPC error code for incompatible output modes
pub const CONTENT_TYPE_NOT_SUPPORTED_CODE: i64 = -32005;

/// Everything that can go wrong talking to an agent
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Protocol-level error (invalid message format, unexpected response, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request or response)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication or authorization error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Error object returned inside a JSON-RPC envelope
    #[error("JSON-RPC error {code}: {message}")]
    JsonRpc { code: i64, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// Task not found error
    #[error("Task not found: {task_id}")]
    TaskNotFound { task_id: String },

    /// Task already reached a terminal state
    #[error("Task cannot be canceled: {task_id}")]
    TaskNotCancelable { task_id: String },

    /// None of the accepted output modes are produced by the agent
    #[error("Incompatible content types: {0}")]
    ContentTypeNotSupported(String),
}

impl A2AError {
    /// Map a JSON-RPC error object onto the closest error kind
    pub fn from_rpc(code: i64, message: impl Into<String>, task_id: Option<&str>) -> Self {
        let message = message.into();
        match (code, task_id) {
            (TASK_NOT_FOUND_CODE, Some(id)) => A2AError::TaskNotFound {
                task_id: id.to_string(),
            },
            (TASK_NOT_CANCELABLE_CODE, Some(id)) => A2AError::TaskNotCancelable {
                task_id: id.to_string(),
            },
            (CONTENT_TYPE_NOT_SUPPORTED_CODE, _) => A2AError::ContentTypeNotSupported(message),
            _ => A2AError::JsonRpc { code, message },
        }
    }
}

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}
