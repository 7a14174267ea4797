//! Settings of one agent client

use std::time::Duration;

/// Deadline applied to each call unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the agent, used for logging and request context
    pub agent_url: String,

    /// Per-call deadline, `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Whether the stack validates requests and answers
    pub validate_responses: bool,
}

impl ClientConfig {
    /// Settings for `agent_url` with the default deadline and validation on
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            timeout: Some(DEFAULT_TIMEOUT),
            validate_responses: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }
}
