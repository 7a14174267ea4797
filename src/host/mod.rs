//! The host coordinator and its collaborators
//!
//! A chat layer decides which agent should handle a user message; the
//! [`HostAgent`] takes it from there. It resolves and registers agents in an
//! [`AgentDirectory`], sends the task with the conversation's session and
//! task ids, tracks whether the conversation still has an open task, and
//! turns the agent's answer into [`ResponsePart`]s.

pub mod config;
pub mod connection;
pub mod convert;
pub mod delegator;
pub mod directory;
pub mod error;
pub mod issue;
pub mod state;

pub use config::{ConfigError, HostConfig, ResolutionPolicy};
pub use connection::{RemoteAgentConnection, RemoteConnection};
pub use convert::{
    convert_part, convert_parts, ArtifactStore, InMemoryArtifactStore, ResponsePart,
    StoredArtifact,
};
pub use delegator::{Delegation, HostAgent};
pub use directory::{AgentDirectory, AgentEntry, AgentSummary};
pub use error::HostError;
pub use issue::{Issue, IssueSink, LoggingIssueSink};
pub use state::{ConversationState, ConversationStore, ToolActions};
