//! Connections from the host to remote agents

use async_trait::async_trait;
use tracing::debug;

use crate::{
    client::AgentClient,
    protocol::{error::A2AError, Task, TaskSendParams},
    service::A2AService,
};

/// Submits tasks to one remote agent
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteConnection: Send + Sync {
    /// Send a task and wait for the agent's answer
    async fn send_task(&self, params: TaskSendParams) -> Result<Task, A2AError>;
}

/// [`RemoteConnection`] backed by an [`AgentClient`]
///
/// The client decides the transport: HTTP for remote agents, or an
/// in-process task manager.
#[derive(Clone)]
pub struct RemoteAgentConnection<S> {
    client: AgentClient<S>,
}

impl<S: A2AService> RemoteAgentConnection<S> {
    pub fn new(client: AgentClient<S>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AgentClient<S> {
        &self.client
    }
}

#[async_trait]
impl<S: A2AService> RemoteConnection for RemoteAgentConnection<S> {
    async fn send_task(&self, params: TaskSendParams) -> Result<Task, A2AError> {
        let task = self.client.send_task(params).await?;
        debug!(
            agent_url = %self.client.config().agent_url,
            task_id = %task.id,
            state = ?task.status.state,
            "remote task answered"
        );
        Ok(task)
    }
}
