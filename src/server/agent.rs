//! The agent contract served by the task manager

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Content types agents accept and produce unless they say otherwise
pub const DEFAULT_CONTENT_TYPES: [&str; 2] = ["text", "text/plain"];

/// What an agent reports after handling one query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    /// The agent considers the task done
    pub is_task_complete: bool,

    /// The agent needs more information from the user
    pub require_user_input: bool,

    /// Reply text
    pub content: String,
}

impl AgentResponse {
    /// A final answer
    pub fn completed(content: impl Into<String>) -> Self {
        Self {
            is_task_complete: true,
            require_user_input: false,
            content: content.into(),
        }
    }

    /// A follow-up question for the user
    pub fn input_required(content: impl Into<String>) -> Self {
        Self {
            is_task_complete: false,
            require_user_input: true,
            content: content.into(),
        }
    }

    /// A progress update
    pub fn working(content: impl Into<String>) -> Self {
        Self {
            is_task_complete: false,
            require_user_input: false,
            content: content.into(),
        }
    }
}

/// A conversational agent that answers queries within a session
///
/// Implementations keep their own per-session memory keyed by `session_id`.
#[async_trait]
pub trait Agent: Send + Sync + 'static {
    /// Answer `query` in the context of `session_id`
    async fn invoke(&self, query: &str, session_id: &str) -> anyhow::Result<AgentResponse>;
}

/// [`DEFAULT_CONTENT_TYPES`] as owned strings, for agent cards
pub fn default_content_types() -> Vec<String> {
    DEFAULT_CONTENT_TYPES.iter().map(|t| t.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_constructors() {
        let done = AgentResponse::completed("No outages today");
        assert!(done.is_task_complete && !done.require_user_input);

        let question = AgentResponse::input_required("Which city?");
        assert!(!question.is_task_complete && question.require_user_input);

        let progress = AgentResponse::working("Looking it up");
        assert!(!progress.is_task_complete && !progress.require_user_input);
    }

    #[test]
    fn test_response_wire_names() {
        let value = serde_json::to_value(AgentResponse::completed("ok")).unwrap();
        assert_eq!(value["is_task_complete"], true);
        assert_eq!(value["require_user_input"], false);
        assert_eq!(value["content"], "ok");
    }
}
