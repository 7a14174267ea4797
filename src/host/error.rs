//! Errors raised by the host coordinator

use thiserror::Error;

use crate::protocol::error::A2AError;

/// Errors returned by [`HostAgent`](super::HostAgent) operations
#[derive(Debug, Error)]
pub enum HostError {
    /// No agent with this name is registered
    #[error("Agent {0} not found")]
    UnknownAgent(String),

    /// Delegation was attempted before the conversation had a session id
    #[error("Conversation has no session id")]
    MissingSession,

    /// An agent card could not be fetched or was malformed
    #[error("Failed to resolve agent at {address}: {source}")]
    Resolution {
        address: String,
        #[source]
        source: A2AError,
    },

    /// The remote task ended canceled
    #[error("Agent {agent} task {task_id} is cancelled")]
    TaskCanceled { agent: String, task_id: String },

    /// The remote task ended failed
    #[error("Agent {agent} task {task_id} failed")]
    TaskFailed { agent: String, task_id: String },

    /// The call to the remote agent itself failed
    #[error(transparent)]
    Transport(#[from] A2AError),

    /// A file part could not be turned into an artifact
    #[error("Invalid content in file part {name}: {reason}")]
    InvalidFileContent { name: String, reason: String },

    /// The artifact store rejected a file
    #[error("Failed to store artifact {file_id}: {source}")]
    ArtifactStore {
        file_id: String,
        #[source]
        source: anyhow::Error,
    },

    /// An issue record is missing required content
    #[error("Invalid issue: {0}")]
    InvalidIssue(String),

    /// The issue sink failed to record an issue
    #[error("Failed to record issue: {0}")]
    IssueSink(#[source] anyhow::Error),
}

impl HostError {
    /// Whether the error came from the remote task outcome rather than the call
    pub fn is_task_outcome(&self) -> bool {
        matches!(
            self,
            HostError::TaskCanceled { .. } | HostError::TaskFailed { .. }
        )
    }
}
