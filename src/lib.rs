//! # A2A Host
//!
//! A Tower-based host coordinator for the task-oriented Agent2Agent (A2A)
//! protocol.
//!
//! The host keeps a directory of remote agents resolved from their published
//! cards and delegates user messages to them over JSON-RPC, carrying the
//! conversation's session and task ids from turn to turn. Agent answers come
//! back as text and data parts, with returned files saved to an artifact
//! store.
//!
//! ## Layout
//!
//! - [`protocol`]: wire types (cards, tasks, messages, parts, errors)
//! - [`codec`], [`transport`], [`service`], [`layer`]: the Tower client stack
//! - [`client`]: [`AgentClient`](client::AgentClient), its builder and card resolution
//! - [`server`]: serve a local [`Agent`](server::Agent) as an A2A service
//! - [`host`]: the [`HostAgent`](host::HostAgent) coordinator
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_host::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HostConfig::from_env()?;
//!     let (host, _skipped) = HostAgent::connect(config).await?;
//!
//!     println!("{}", host.agents_summary().await);
//!
//!     let delegation = host
//!         .delegate("conversation-1", "ceb Agent", "Any power outages in Colombo?")
//!         .await?;
//!     for part in delegation.parts {
//!         println!("{}", serde_json::to_string(&part)?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod host;
pub mod layer;
pub mod protocol;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{A2AClientBuilder, AgentClient, CardResolver},
        host::{
            ConversationState, Delegation, HostAgent, HostConfig, HostError, Issue,
            ResolutionPolicy, ResponsePart,
        },
        protocol::error::A2AError,
        protocol::{
            A2AOperation, AgentCard, Message, Part, Role, Task, TaskSendParams, TaskState,
            TaskStatus,
        },
        server::{Agent, AgentResponse, AgentTaskManager},
    };
}
