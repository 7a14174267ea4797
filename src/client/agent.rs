//! High-level A2A agent client

use tower::ServiceExt;
use tracing::debug;

use crate::{
    client::config::ClientConfig,
    protocol::{
        error::A2AError, AgentCard, A2AOperation, Task, TaskIdParams, TaskQueryParams,
        TaskSendParams,
    },
    service::{A2AService, A2ARequest, A2AResponse, RequestContext},
};

/// High-level A2A client for interacting with agents
///
/// This client wraps a Tower service and provides convenient methods for the
/// task-oriented A2A operations. Every call clones the inner service, so a
/// shared client can serve many conversations at once.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_host::prelude::*;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://localhost:10010".parse().unwrap();
/// let client = A2AClientBuilder::new_http(url).build()?;
///
/// let params = TaskSendParams::new("task-1", "session-1", Message::user("Any outages today?"));
/// let task = client.send_task(params).await?;
/// println!("Task {} is {:?}", task.id, task.status.state);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentClient<S> {
    service: S,
    config: ClientConfig,
}

impl<S> AgentClient<S>
where
    S: A2AService,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request context from the client configuration
    fn build_context(&self) -> RequestContext {
        // Credentials come from the auth layer
        RequestContext::new(self.config.agent_url.clone())
            .with_optional_timeout(self.config.timeout)
    }

    async fn call(&self, operation: A2AOperation) -> Result<A2AResponse, A2AError> {
        debug!(
            agent_url = %self.config.agent_url,
            method = operation.rpc_method(),
            "calling remote agent"
        );

        let request = A2ARequest::new(operation, self.build_context());
        self.service.clone().oneshot(request).await
    }

    fn expect_task(response: A2AResponse, operation: &str) -> Result<Task, A2AError> {
        response.into_task().ok_or_else(|| {
            A2AError::Protocol(format!("Expected task response from {}", operation))
        })
    }

    /// Submit a task (`tasks/send`) and wait for the agent's answer
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails to send or the response is invalid
    pub async fn send_task(&self, params: TaskSendParams) -> Result<Task, A2AError> {
        let response = self.call(A2AOperation::SendTask(params)).await?;
        Self::expect_task(response, "send_task")
    }

    /// Get a task by ID, optionally with its last `history_length` messages
    ///
    /// # Errors
    ///
    /// Returns `A2AError::TaskNotFound` if the task doesn't exist
    pub async fn get_task(
        &self,
        task_id: impl Into<String>,
        history_length: Option<u32>,
    ) -> Result<Task, A2AError> {
        let operation = A2AOperation::GetTask(TaskQueryParams {
            id: task_id.into(),
            history_length,
        });

        let response = self.call(operation).await?;
        Self::expect_task(response, "get_task")
    }

    /// Cancel a task by ID
    ///
    /// Returns the updated task in the `canceled` state.
    pub async fn cancel_task(&self, task_id: impl Into<String>) -> Result<Task, A2AError> {
        let operation = A2AOperation::CancelTask(TaskIdParams { id: task_id.into() });

        let response = self.call(operation).await?;
        Self::expect_task(response, "cancel_task")
    }

    /// Discover agent capabilities by fetching the Agent Card
    ///
    /// This retrieves the agent's metadata from `.well-known/agent.json`
    /// below the agent's base URL.
    pub async fn discover(&self) -> Result<AgentCard, A2AError> {
        let response = self.call(A2AOperation::DiscoverAgent).await?;

        response.into_agent_card().ok_or_else(|| {
            A2AError::Protocol("Expected agent card response from discover".into())
        })
    }
}
