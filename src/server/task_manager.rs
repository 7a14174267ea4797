//! In-memory task manager serving an [`Agent`] as an A2A service

use std::{
    collections::HashMap,
    sync::Arc,
    task::{Context, Poll},
};

use tokio::sync::Mutex;
use tower_service::Service;
use tracing::{debug, info, warn};

use crate::{
    client::{AgentClient, ClientConfig},
    protocol::{
        error::A2AError,
        message::{Message, Part},
        AgentCard, A2AOperation, Artifact, Task, TaskIdParams, TaskQueryParams, TaskSendParams,
        TaskState, TaskStatus,
    },
    server::agent::{Agent, AgentResponse},
    service::{A2AFuture, A2ARequest, A2AResponse},
};

/// Serves an [`Agent`] over the A2A task operations
///
/// Tasks live in memory for the lifetime of the manager. Clones share the
/// agent, card and task store.
pub struct AgentTaskManager<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    agent: A,
    card: AgentCard,
    tasks: Mutex<HashMap<String, Task>>,
}

impl<A> Clone for AgentTaskManager<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A: Agent> AgentTaskManager<A> {
    /// Create a task manager publishing `card`
    pub fn new(agent: A, card: AgentCard) -> Self {
        Self {
            inner: Arc::new(Inner {
                agent,
                card,
                tasks: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// The card this manager publishes
    pub fn card(&self) -> &AgentCard {
        &self.inner.card
    }

    /// An in-process client addressing this manager
    pub fn client(&self) -> AgentClient<Self> {
        AgentClient::new(self.clone(), ClientConfig::new(self.inner.card.url.clone()))
    }

    /// Number of tasks seen so far
    pub async fn task_count(&self) -> usize {
        self.inner.tasks.lock().await.len()
    }
}

impl<A: Agent> Inner<A> {
    async fn handle(&self, operation: A2AOperation) -> Result<A2AResponse, A2AError> {
        match operation {
            A2AOperation::SendTask(params) => self.on_send_task(params).await.map(Into::into),
            A2AOperation::GetTask(params) => self.on_get_task(params).await.map(Into::into),
            A2AOperation::CancelTask(params) => self.on_cancel_task(params).await.map(Into::into),
            A2AOperation::DiscoverAgent => Ok(self.card.clone().into()),
        }
    }

    async fn on_send_task(&self, params: TaskSendParams) -> Result<Task, A2AError> {
        if let Some(accepted) = &params.accepted_output_modes {
            if !self.card.produces_any(accepted) {
                warn!(
                    agent = %self.card.name,
                    ?accepted,
                    supported = ?self.card.default_output_modes,
                    "unsupported output mode"
                );
                return Err(A2AError::ContentTypeNotSupported(format!(
                    "{} produces none of {:?}",
                    self.card.name, accepted
                )));
            }
        }

        let query = params.message.text();
        if query.is_empty() {
            return Err(A2AError::Validation("Only text parts are supported".into()));
        }

        self.upsert_task(&params).await;
        info!(
            agent = %self.card.name,
            task_id = %params.id,
            session_id = %params.session_id,
            "invoking agent"
        );

        let outcome = match self.invoke(&query, &params.session_id).await {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(agent = %self.card.name, task_id = %params.id, error = %err, "agent failed");
                Outcome {
                    status: TaskStatus::new(TaskState::Failed)
                        .with_message(Message::agent(format!("Error invoking agent: {}", err))),
                    artifact: None,
                }
            }
        };

        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .get_mut(&params.id)
            .ok_or_else(|| A2AError::TaskNotFound {
                task_id: params.id.clone(),
            })?;

        // A cancel that raced the agent call wins
        if task.status.state != TaskState::Canceled {
            if let Some(message) = &outcome.status.message {
                task.history.get_or_insert_with(Vec::new).push(message.clone());
            }
            if let Some(mut artifact) = outcome.artifact {
                let artifacts = task.artifacts.get_or_insert_with(Vec::new);
                artifact.index = artifacts.len() as u32;
                artifacts.push(artifact);
            }
            task.status = outcome.status;
        }

        debug!(task_id = %task.id, state = ?task.status.state, "task updated");
        Ok(task.with_history_length(params.history_length))
    }

    async fn invoke(&self, query: &str, session_id: &str) -> anyhow::Result<Outcome> {
        let response = self.agent.invoke(query, session_id).await?;
        Ok(Outcome::from(response))
    }

    async fn upsert_task(&self, params: &TaskSendParams) {
        let mut tasks = self.tasks.lock().await;
        let task = tasks.entry(params.id.clone()).or_insert_with(|| {
            Task::new(params.id.clone()).with_session_id(params.session_id.clone())
        });

        task.history
            .get_or_insert_with(Vec::new)
            .push(params.message.clone());
        task.status = TaskStatus::new(TaskState::Working);
    }

    async fn on_get_task(&self, params: TaskQueryParams) -> Result<Task, A2AError> {
        let tasks = self.tasks.lock().await;
        tasks
            .get(&params.id)
            .map(|task| task.with_history_length(params.history_length))
            .ok_or(A2AError::TaskNotFound { task_id: params.id })
    }

    async fn on_cancel_task(&self, params: TaskIdParams) -> Result<Task, A2AError> {
        let mut tasks = self.tasks.lock().await;
        let task = tasks
            .get_mut(&params.id)
            .ok_or_else(|| A2AError::TaskNotFound {
                task_id: params.id.clone(),
            })?;

        if task.is_terminal() {
            return Err(A2AError::TaskNotCancelable { task_id: params.id });
        }

        info!(agent = %self.card.name, task_id = %task.id, "task canceled");
        task.status = TaskStatus::new(TaskState::Canceled);
        Ok(task.with_history_length(None))
    }
}

/// Task status and artifact derived from an agent response
struct Outcome {
    status: TaskStatus,
    artifact: Option<Artifact>,
}

impl From<AgentResponse> for Outcome {
    fn from(response: AgentResponse) -> Self {
        if response.require_user_input {
            Outcome {
                status: TaskStatus::new(TaskState::InputRequired)
                    .with_message(Message::agent(response.content)),
                artifact: None,
            }
        } else if response.is_task_complete {
            Outcome {
                status: TaskStatus::new(TaskState::Completed),
                artifact: Some(Artifact::new(vec![Part::text(response.content)])),
            }
        } else {
            Outcome {
                status: TaskStatus::new(TaskState::Working)
                    .with_message(Message::agent(response.content)),
                artifact: None,
            }
        }
    }
}

impl<A: Agent> Service<A2ARequest> for AgentTaskManager<A> {
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = A2AFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let inner = self.inner.clone();
        Box::pin(async move { inner.handle(req.operation).await })
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::server::agent::default_content_types;

    /// Asks for a city first, then answers
    struct ClinicAgent;

    #[async_trait]
    impl Agent for ClinicAgent {
        async fn invoke(&self, query: &str, _session_id: &str) -> anyhow::Result<AgentResponse> {
            if query.contains("Colombo") {
                Ok(AgentResponse::completed("Visit X Clinic"))
            } else if query.contains("broken") {
                anyhow::bail!("model unavailable")
            } else if query.contains("wait") {
                Ok(AgentResponse::working("Still looking"))
            } else {
                Ok(AgentResponse::input_required("Which city?"))
            }
        }
    }

    fn manager() -> AgentTaskManager<ClinicAgent> {
        let card = AgentCard::new("Health Agent", "Healthcare info", "http://health.test/")
            .with_modes(default_content_types(), default_content_types());
        AgentTaskManager::new(ClinicAgent, card)
    }

    fn send(id: &str, text: &str) -> TaskSendParams {
        TaskSendParams::new(id, "session-1", Message::user(text))
    }

    #[tokio::test]
    async fn test_input_required_then_completed() {
        let client = manager().client();

        let task = client.send_task(send("task-1", "find a clinic")).await.unwrap();
        assert_eq!(task.status.state, TaskState::InputRequired);
        assert_eq!(task.status.message.unwrap().text(), "Which city?");

        let task = client.send_task(send("task-1", "Colombo")).await.unwrap();
        assert_eq!(task.status.state, TaskState::Completed);
        let artifacts = task.artifacts.unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].parts, vec![Part::text("Visit X Clinic")]);
    }

    #[tokio::test]
    async fn test_history_is_kept_and_trimmed() {
        let manager = manager();
        let client = manager.client();

        client.send_task(send("task-1", "find a clinic")).await.unwrap();
        client.send_task(send("task-1", "Colombo")).await.unwrap();

        let task = client.get_task("task-1", Some(2)).await.unwrap();
        let history = task.history.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].text(), "Colombo");

        let task = client.get_task("task-1", None).await.unwrap();
        assert!(task.history.is_none());
        assert_eq!(manager.task_count().await, 1);
    }

    #[tokio::test]
    async fn test_working_response_keeps_task_open() {
        let client = manager().client();

        let task = client.send_task(send("task-1", "wait")).await.unwrap();
        assert_eq!(task.status.state, TaskState::Working);
        assert!(!task.is_terminal());
    }

    #[tokio::test]
    async fn test_agent_failure_fails_task() {
        let client = manager().client();

        let task = client.send_task(send("task-1", "broken")).await.unwrap();
        assert_eq!(task.status.state, TaskState::Failed);
        assert!(task
            .status
            .message
            .unwrap()
            .text()
            .contains("model unavailable"));
    }

    #[tokio::test]
    async fn test_incompatible_output_modes() {
        let client = manager().client();

        let params = send("task-1", "Colombo").with_accepted_output_modes(["image/png"]);
        let err = client.send_task(params).await.unwrap_err();
        assert!(matches!(err, A2AError::ContentTypeNotSupported(_)));
    }

    #[tokio::test]
    async fn test_cancel() {
        let client = manager().client();

        client.send_task(send("task-1", "find a clinic")).await.unwrap();
        let task = client.cancel_task("task-1").await.unwrap();
        assert_eq!(task.status.state, TaskState::Canceled);

        let err = client.cancel_task("task-1").await.unwrap_err();
        assert!(matches!(err, A2AError::TaskNotCancelable { .. }));

        let err = client.cancel_task("missing").await.unwrap_err();
        assert!(matches!(err, A2AError::TaskNotFound { .. }));
    }

    #[tokio::test]
    async fn test_get_unknown_task() {
        let client = manager().client();

        let err = client.get_task("missing", None).await.unwrap_err();
        assert!(matches!(err, A2AError::TaskNotFound { task_id } if task_id == "missing"));
    }

    #[tokio::test]
    async fn test_discover() {
        let client = manager().client();

        let card = client.discover().await.unwrap();
        assert_eq!(card.name, "Health Agent");
    }
}
