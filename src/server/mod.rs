//! Serving local agents over the A2A task protocol
//!
//! An [`Agent`] answers one query at a time. [`AgentTaskManager`] wraps it
//! into a Tower service that tracks tasks, so a local agent can be addressed
//! exactly like a remote one.

pub mod agent;
pub mod task_manager;

pub use agent::{Agent, AgentResponse};
pub use task_manager::AgentTaskManager;
