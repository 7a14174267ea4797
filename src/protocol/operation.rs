//! A2A protocol operations

use std::fmt;

use super::task::{TaskIdParams, TaskQueryParams, TaskSendParams};

/// Path of the agent card relative to an agent's base URL
pub const AGENT_CARD_PATH: &str = ".well-known/agent.json";

/// HTTP verb carrying an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A2A protocol operations
///
/// Task operations travel as JSON-RPC calls posted to the agent's base URL;
/// discovery is a plain GET of the agent card.
#[derive(Debug, Clone)]
pub enum A2AOperation {
    /// Create or continue a task with a new message
    SendTask(TaskSendParams),

    /// Get a task by ID
    GetTask(TaskQueryParams),

    /// Cancel a task
    CancelTask(TaskIdParams),

    /// Discover agent capabilities (fetch Agent Card)
    DiscoverAgent,
}

impl A2AOperation {
    /// Get the endpoint path for this operation, relative to the agent URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            A2AOperation::DiscoverAgent => AGENT_CARD_PATH,
            _ => "",
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> HttpMethod {
        match self {
            A2AOperation::DiscoverAgent => HttpMethod::Get,
            _ => HttpMethod::Post,
        }
    }

    /// Get the JSON-RPC method name for this operation
    pub fn rpc_method(&self) -> &'static str {
        match self {
            A2AOperation::SendTask(_) => "tasks/send",
            A2AOperation::GetTask(_) => "tasks/get",
            A2AOperation::CancelTask(_) => "tasks/cancel",
            A2AOperation::DiscoverAgent => "agent/discover",
        }
    }

    /// The task this operation targets, if any
    pub fn task_id(&self) -> Option<&str> {
        match self {
            A2AOperation::SendTask(params) => Some(&params.id),
            A2AOperation::GetTask(params) => Some(&params.id),
            A2AOperation::CancelTask(params) => Some(&params.id),
            A2AOperation::DiscoverAgent => None,
        }
    }
}
