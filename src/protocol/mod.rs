//! Core A2A protocol types and definitions

pub mod agent;
pub mod error;
pub mod message;
pub mod operation;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill};
pub use error::A2AError;
pub use message::{DataPart, FileContent, FilePart, Message, Metadata, Part, Role, TextPart};
pub use operation::{A2AOperation, HttpMethod, AGENT_CARD_PATH};
pub use task::{
    Artifact, Task, TaskIdParams, TaskQueryParams, TaskSendParams, TaskState, TaskStatus,
};
