//! Talking to one agent
//!
//! [`A2AClientBuilder`] assembles the service stack behind an [`AgentClient`].
//! [`CardResolver`] fetches agent cards before any client exists.

pub mod agent;
pub mod builder;
pub mod config;
pub mod resolver;

pub use agent::AgentClient;
pub use builder::A2AClientBuilder;
pub use config::ClientConfig;
pub use resolver::CardResolver;
