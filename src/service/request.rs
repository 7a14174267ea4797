//! Requests flowing through the client stack

use std::time::Duration;

use crate::{
    client::config::DEFAULT_TIMEOUT,
    layer::auth::AuthCredentials,
    protocol::operation::A2AOperation,
};

/// One operation addressed to one agent
#[derive(Debug, Clone)]
pub struct A2ARequest {
    pub operation: A2AOperation,
    pub context: RequestContext,
}

impl A2ARequest {
    pub fn new(operation: A2AOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }

    /// Shorthand for the JSON-RPC method name, `agent/discover` for card fetches
    pub fn rpc_method(&self) -> &'static str {
        self.operation.rpc_method()
    }
}

/// Per-call settings read by the layers
///
/// The auth layer fills `auth` when it is unset and the deadline layer
/// enforces `timeout`. `headers` are sent as-is.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Agent URL, for logs
    pub agent_url: String,

    pub auth: Option<AuthCredentials>,

    /// Budget for the whole call, `None` waits indefinitely
    pub timeout: Option<Duration>,

    /// Extra headers for the agent
    pub headers: Vec<(String, String)>,
}

impl RequestContext {
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            ..Self::default()
        }
    }

    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn without_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Use `timeout` as given, `None` removing the deadline
    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            agent_url: String::new(),
            auth: None,
            timeout: Some(DEFAULT_TIMEOUT),
            headers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_defaults_to_client_timeout() {
        let context = RequestContext::new("http://localhost:10010/");

        assert_eq!(context.agent_url, "http://localhost:10010/");
        assert_eq!(context.timeout, Some(DEFAULT_TIMEOUT));
        assert!(context.auth.is_none());
    }

    #[test]
    fn test_context_timeouts() {
        let context = RequestContext::default().with_timeout(Duration::from_secs(60));
        assert_eq!(context.timeout, Some(Duration::from_secs(60)));

        assert!(context.clone().without_timeout().timeout.is_none());
        assert!(context.with_optional_timeout(None).timeout.is_none());
    }

    #[test]
    fn test_request_names_rpc_method() {
        let context = RequestContext::default().with_header("X-Trace", "abc");
        let request = A2ARequest::new(A2AOperation::DiscoverAgent, context);
        assert_eq!(request.rpc_method(), "agent/discover");
        assert_eq!(request.context.headers, vec![("X-Trace".to_string(), "abc".to_string())]);
    }
}
