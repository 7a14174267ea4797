//! A2A task types and lifecycle management

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};

use super::message::{Message, Metadata, Part};

/// A task in the A2A protocol
///
/// Tasks represent units of work performed by agents. A task belongs to a
/// session and moves from submitted to a terminal state, possibly pausing in
/// `input-required` while the agent waits for the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task
    pub id: String,

    /// Session the task belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Current status of the task
    pub status: TaskStatus,

    /// Outputs produced by the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<Vec<Artifact>>,

    /// Messages exchanged while working on the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Message>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Task {
    /// Create a new submitted task
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session_id: None,
            status: TaskStatus::new(TaskState::Submitted),
            artifacts: None,
            history: None,
            metadata: None,
        }
    }

    /// Check if the task is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.state.is_terminal()
    }

    /// Replace the task status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the session ID
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Append an artifact
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifacts.get_or_insert_with(Vec::new).push(artifact);
        self
    }

    /// Append a message to the history
    pub fn with_history_message(mut self, message: Message) -> Self {
        self.history.get_or_insert_with(Vec::new).push(message);
        self
    }

    /// A copy of the task keeping only the last `length` history entries
    ///
    /// A missing or zero length drops the history entirely.
    pub fn with_history_length(&self, length: Option<u32>) -> Self {
        let mut task = self.clone();
        task.history = match (length, task.history.take()) {
            (Some(n), Some(mut history)) if n > 0 => {
                let keep = (n as usize).min(history.len());
                Some(history.split_off(history.len() - keep))
            }
            _ => None,
        };
        task
    }
}

/// Status of a task at a point in time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    /// Lifecycle state
    pub state: TaskState,

    /// Message from the agent accompanying the state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,

    /// When the state was entered
    ///
    /// Timestamps without an offset are read as UTC.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<String>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(timestamp.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(Utc.from_utc_datetime(&naive)))
        .map_err(de::Error::custom)
}

impl TaskStatus {
    /// Create a status stamped with the current time
    pub fn new(state: TaskState) -> Self {
        Self {
            state,
            message: None,
            timestamp: Some(Utc::now()),
        }
    }

    /// Attach an agent message
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }
}

/// Task state in the A2A protocol lifecycle
///
/// Task lifecycle: submitted → working → completed/canceled/failed
/// Non-terminal pause: input-required (awaiting the user)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Task has been received and is queued for processing
    Submitted,

    /// Task is currently being processed
    Working,

    /// Task requires additional input from the user
    InputRequired,

    /// Task completed successfully
    Completed,

    /// Task was canceled
    Canceled,

    /// Task failed with an error
    Failed,

    /// State could not be determined, including states this crate does not know
    #[serde(other)]
    Unknown,
}

impl TaskState {
    /// Check if this is a terminal state
    ///
    /// `Unknown` counts as terminal: nothing more can be expected from the task.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Completed | TaskState::Canceled | TaskState::Failed | TaskState::Unknown
        )
    }

    /// Check if this state requires user action
    pub fn requires_input(&self) -> bool {
        matches!(self, TaskState::InputRequired)
    }
}

/// Artifacts represent task outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// A human readable name for the Artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// A human readable description of the Artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Contents of the Artifact
    pub parts: Vec<Part>,

    /// Position of the artifact among the task's outputs
    #[serde(default)]
    pub index: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_chunk: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Artifact {
    /// Create an artifact from parts
    pub fn new(parts: Vec<Part>) -> Self {
        Self {
            name: None,
            description: None,
            parts,
            index: 0,
            append: None,
            last_chunk: None,
            metadata: None,
        }
    }
}

/// Parameters of a `tasks/send` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSendParams {
    /// Task to create or continue
    pub id: String,

    /// Session the task belongs to
    pub session_id: String,

    /// The message to send
    pub message: Message,

    /// Content types the caller can render
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accepted_output_modes: Option<Vec<String>>,

    /// Number of history entries to return with the task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl TaskSendParams {
    /// Create send parameters for a message
    pub fn new(id: impl Into<String>, session_id: impl Into<String>, message: Message) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            message,
            accepted_output_modes: None,
            history_length: None,
            metadata: None,
        }
    }

    /// Restrict the output modes the agent may answer with
    pub fn with_accepted_output_modes<I, T>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.accepted_output_modes = Some(modes.into_iter().map(Into::into).collect());
        self
    }

    /// Set the request metadata
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Parameters of a `tasks/get` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskQueryParams {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<u32>,
}

/// Parameters of a `tasks/cancel` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskIdParams {
    pub id: String,
}
