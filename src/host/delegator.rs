//! The host coordinator
//!
//! [`HostAgent`] owns the directory of remote agents and routes one message
//! at a time to the agent chosen by the chat layer. Delegation state lives in
//! a [`ConversationState`] the caller passes in, so any number of
//! conversations can share one host.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::{
    client::{A2AClientBuilder, CardResolver},
    host::{
        config::{HostConfig, ResolutionPolicy},
        connection::{RemoteAgentConnection, RemoteConnection},
        convert::{convert_parts, ArtifactStore, InMemoryArtifactStore, ResponsePart},
        directory::{AgentDirectory, AgentSummary},
        error::HostError,
        issue::{Issue, IssueSink, LoggingIssueSink},
        state::{ConversationState, ConversationStore, ToolActions},
    },
    protocol::{error::A2AError, AgentCard, Message, Metadata, TaskSendParams, TaskState},
    transport::HttpTransport,
};

const CONVERSATION_ID_KEY: &str = "conversation_id";
const MESSAGE_ID_KEY: &str = "message_id";

/// Result of one delegation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Delegation {
    /// Id of the remote task
    pub task_id: String,

    /// State the remote task reported
    pub state: TaskState,

    /// Status message parts followed by artifact parts
    pub parts: Vec<ResponsePart>,

    /// Signals for the chat layer
    pub actions: ToolActions,
}

impl Delegation {
    /// Whether the agent is waiting for the user
    pub fn needs_input(&self) -> bool {
        self.state.requires_input()
    }
}

/// Routes tasks from a conversation to remote agents
pub struct HostAgent {
    config: HostConfig,
    directory: RwLock<AgentDirectory>,
    conversations: ConversationStore,
    resolver: CardResolver,
    artifacts: Arc<dyn ArtifactStore>,
    issues: Arc<dyn IssueSink>,
}

impl HostAgent {
    /// Create a host with no agents, storing artifacts in memory and logging issues
    pub fn new(config: HostConfig) -> Self {
        let resolver = CardResolver::new()
            .with_timeout(config.request_timeout)
            .with_auth(config.auth.clone());

        Self {
            config,
            directory: RwLock::new(AgentDirectory::new()),
            conversations: ConversationStore::new(),
            resolver,
            artifacts: Arc::new(InMemoryArtifactStore::new()),
            issues: Arc::new(LoggingIssueSink),
        }
    }

    /// Create a host and register every agent listed in `config`
    ///
    /// Under [`ResolutionPolicy::SkipUnreachable`] the agents that failed to
    /// resolve are returned next to the host.
    pub async fn connect(config: HostConfig) -> Result<(Self, Vec<HostError>), HostError> {
        let host = Self::new(config);
        let skipped = host.connect_remote_agents().await?;
        Ok((host, skipped))
    }

    pub fn with_artifact_store(mut self, store: Arc<dyn ArtifactStore>) -> Self {
        self.artifacts = store;
        self
    }

    pub fn with_issue_sink(mut self, sink: Arc<dyn IssueSink>) -> Self {
        self.issues = sink;
        self
    }

    pub fn config(&self) -> &HostConfig {
        &self.config
    }

    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Resolve the configured agent addresses concurrently and register them
    ///
    /// Agents are registered in configuration order.
    pub async fn connect_remote_agents(&self) -> Result<Vec<HostError>, HostError> {
        let addresses = &self.config.remote_agents;
        let cards = join_all(addresses.iter().map(|address| self.resolver.resolve(address))).await;

        let mut resolved = Vec::with_capacity(cards.len());
        let mut skipped = Vec::new();
        for (address, card) in addresses.iter().zip(cards) {
            match card {
                Ok(card) => resolved.push(card),
                Err(source) => {
                    let err = HostError::Resolution {
                        address: address.to_string(),
                        source,
                    };
                    match self.config.resolution_policy {
                        ResolutionPolicy::FailFast => return Err(err),
                        ResolutionPolicy::SkipUnreachable => {
                            warn!(%address, error = %err, "skipping unreachable agent");
                            skipped.push(err);
                        }
                    }
                }
            }
        }

        for card in resolved {
            self.register_agent_card(card).await?;
        }

        info!(
            agents = self.directory.read().await.len(),
            skipped = skipped.len(),
            "remote agents connected"
        );
        Ok(skipped)
    }

    /// Register `card` with an HTTP connection to the card's URL
    pub async fn register_agent_card(&self, card: AgentCard) -> Result<(), HostError> {
        let url = Url::parse(&card.url).map_err(|e| HostError::Resolution {
            address: card.url.clone(),
            source: A2AError::Validation(format!("invalid agent url: {}", e)),
        })?;

        let transport = HttpTransport::with_client(url.clone(), self.resolver.http_client().clone());
        let client = A2AClientBuilder::new(url)
            .with_transport(transport)
            .with_optional_auth(self.config.auth.clone())
            .with_optional_timeout(self.config.request_timeout)
            .with_validation(self.config.validate_responses)
            .build()?;

        let connection = RemoteAgentConnection::new(client);
        self.register_connection(card, Arc::new(connection)).await;
        Ok(())
    }

    /// Register `card` with an explicit connection
    pub async fn register_connection(&self, card: AgentCard, connection: Arc<dyn RemoteConnection>) {
        let name = card.name.clone();
        let replaced = self.directory.write().await.register(card, connection);
        info!(agent = %name, replaced = replaced.is_some(), "registered agent");
    }

    /// Name and description of each registered agent
    pub async fn list_remote_agents(&self) -> Vec<AgentSummary> {
        self.directory.read().await.list_agents()
    }

    /// One JSON object per line describing each agent, for model prompts
    pub async fn agents_summary(&self) -> String {
        self.list_remote_agents()
            .await
            .iter()
            .filter_map(|agent| serde_json::to_string(agent).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The card registered under `name`
    pub async fn agent_card(&self, name: &str) -> Option<AgentCard> {
        self.directory
            .read()
            .await
            .get(name)
            .map(|entry| entry.card.clone())
    }

    /// Send `message` to `agent_name` on behalf of the conversation in `state`
    ///
    /// `state` must already carry a session id (see
    /// [`ConversationState::begin_turn`]). The agent is recorded as the
    /// conversation's agent before the call is made. Once the agent answers,
    /// `active` and `task_id` follow the task: an open task is continued on
    /// the next delegation to the same agent, a terminal one is forgotten.
    /// Switching agents forgets the previous agent's task even if the call fails.
    pub async fn send_task(
        &self,
        agent_name: &str,
        message: &str,
        state: &mut ConversationState,
    ) -> Result<Delegation, HostError> {
        let connection = self
            .directory
            .read()
            .await
            .get(agent_name)
            .map(|entry| entry.connection.clone())
            .ok_or_else(|| HostError::UnknownAgent(agent_name.to_string()))?;
        let session_id = state.session_id.clone().ok_or(HostError::MissingSession)?;

        // An open task id belongs to `state.agent_name` and is dropped on a switch
        let continuing = state.active && state.agent_name.as_deref() == Some(agent_name);
        if !continuing {
            state.task_id = None;
        }
        let task_id = state
            .task_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        state.agent_name = Some(agent_name.to_string());

        let params = self.task_params(&task_id, &session_id, message, &state.input_metadata);
        info!(agent = agent_name, %task_id, %session_id, continuing, "delegating task");

        let task = connection.send_task(params).await.map_err(|err| {
            warn!(agent = agent_name, %task_id, error = %err, "delegation failed");
            HostError::Transport(err)
        })?;

        let task_state = task.status.state;
        state.active = !task_state.is_terminal();
        state.task_id = state.active.then(|| task.id.clone());
        debug!(agent = agent_name, task_id = %task.id, state = ?task_state, "agent answered");

        let mut actions = ToolActions::default();
        match task_state {
            TaskState::InputRequired => actions.escalate_to_user(),
            TaskState::Canceled => {
                return Err(HostError::TaskCanceled {
                    agent: agent_name.to_string(),
                    task_id: task.id,
                })
            }
            TaskState::Failed => {
                return Err(HostError::TaskFailed {
                    agent: agent_name.to_string(),
                    task_id: task.id,
                })
            }
            _ => {}
        }

        let store = self.artifacts.as_ref();
        let mut parts = Vec::new();
        if let Some(message) = &task.status.message {
            parts.extend(convert_parts(&message.parts, &mut actions, store).await?);
        }
        for artifact in task.artifacts.iter().flatten() {
            parts.extend(convert_parts(&artifact.parts, &mut actions, store).await?);
        }

        Ok(Delegation {
            task_id: task.id,
            state: task_state,
            parts,
            actions,
        })
    }

    /// [`send_task`](Self::send_task) within a stored conversation
    ///
    /// Holds the conversation's lock for the whole call and starts the turn,
    /// so the session id exists and concurrent delegations for one
    /// conversation run one after another.
    pub async fn delegate(
        &self,
        conversation_id: &str,
        agent_name: &str,
        message: &str,
    ) -> Result<Delegation, HostError> {
        let mut state = self.conversations.acquire(conversation_id).await;
        state.begin_turn();
        self.send_task(agent_name, message, &mut state).await
    }

    /// Validate `issue` and hand it to the issue sink
    pub async fn create_issue(&self, issue: Issue) -> Result<(), HostError> {
        issue.validate()?;
        self.issues.record(&issue).await.map_err(HostError::IssueSink)?;
        info!(title = %issue.title, "Issue created successfully");
        Ok(())
    }

    fn task_params(
        &self,
        task_id: &str,
        session_id: &str,
        message: &str,
        input_metadata: &Metadata,
    ) -> TaskSendParams {
        let message_id = input_metadata
            .get(MESSAGE_ID_KEY)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let mut message_metadata = input_metadata.clone();
        message_metadata.insert(CONVERSATION_ID_KEY.to_string(), Value::from(session_id));
        message_metadata.insert(MESSAGE_ID_KEY.to_string(), Value::from(message_id));

        let mut task_metadata = Metadata::new();
        task_metadata.insert(CONVERSATION_ID_KEY.to_string(), Value::from(session_id));

        TaskSendParams::new(
            task_id,
            session_id,
            Message::user(message).with_metadata_map(message_metadata),
        )
        .with_accepted_output_modes(self.config.accepted_output_modes.clone())
        .with_metadata(task_metadata)
    }
}

impl std::fmt::Debug for HostAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostAgent")
            .field("config", &self.config)
            .field("directory", &self.directory)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::{
        host::{connection::MockRemoteConnection, convert::MockArtifactStore, issue::MockIssueSink},
        protocol::{Artifact, Part, Task, TaskStatus},
    };

    fn health_card() -> AgentCard {
        AgentCard::new("Health", "Healthcare information", "http://health.test/")
    }

    fn answering(state: TaskState, message: Option<&str>) -> MockRemoteConnection {
        let message = message.map(Message::agent);
        let mut connection = MockRemoteConnection::new();
        connection.expect_send_task().returning(move |params| {
            let mut status = TaskStatus::new(state);
            status.message = message.clone();
            Ok(Task::new(params.id).with_status(status))
        });
        connection
    }

    async fn host_with(connection: MockRemoteConnection) -> HostAgent {
        let host = HostAgent::new(HostConfig::new());
        host.register_connection(health_card(), Arc::new(connection)).await;
        host
    }

    fn started() -> ConversationState {
        let mut state = ConversationState::new();
        state.begin_turn();
        state
    }

    #[tokio::test]
    async fn test_completed_task() {
        let host = host_with(answering(TaskState::Completed, Some("Visit X Clinic"))).await;
        let mut state = started();

        let delegation = host
            .send_task("Health", "find a clinic in Colombo", &mut state)
            .await
            .unwrap();

        assert_eq!(delegation.parts, vec![ResponsePart::Text("Visit X Clinic".into())]);
        assert!(!delegation.actions.is_raised());
        assert!(!state.active);
        assert!(state.task_id.is_none());
    }

    #[tokio::test]
    async fn test_failed_task() {
        let host = host_with(answering(TaskState::Failed, None)).await;
        let mut state = started();

        let err = host.send_task("Health", "hello", &mut state).await.unwrap_err();

        assert!(matches!(err, HostError::TaskFailed { ref agent, .. } if agent == "Health"));
        assert!(!state.active);
        assert_eq!(state.agent_name.as_deref(), Some("Health"));
    }

    #[tokio::test]
    async fn test_canceled_task() {
        let host = host_with(answering(TaskState::Canceled, None)).await;
        let mut state = started();

        let err = host.send_task("Health", "hello", &mut state).await.unwrap_err();
        assert!(matches!(err, HostError::TaskCanceled { .. }));
        assert!(!state.active);
    }

    #[tokio::test]
    async fn test_input_required_escalates() {
        let host = host_with(answering(TaskState::InputRequired, Some("Which city?"))).await;
        let mut state = started();

        let delegation = host
            .send_task("Health", "find a clinic", &mut state)
            .await
            .unwrap();

        assert_eq!(delegation.parts, vec![ResponsePart::Text("Which city?".into())]);
        assert!(delegation.needs_input());
        assert!(delegation.actions.skip_summarization && delegation.actions.escalate);
        assert!(state.active);
        assert_eq!(state.task_id.as_deref(), Some(delegation.task_id.as_str()));
        assert_eq!(state.active_agent(), Some("Health"));
    }

    #[tokio::test]
    async fn test_open_task_is_continued() {
        let mut connection = MockRemoteConnection::new();
        connection
            .expect_send_task()
            .withf(|params| params.id == "task-open")
            .times(1)
            .returning(|params| {
                Ok(Task::new(params.id).with_status(TaskStatus::new(TaskState::Completed)))
            });
        let host = host_with(connection).await;

        let mut state = started();
        state.agent_name = Some("Health".into());
        state.task_id = Some("task-open".into());

        assert_ok!(host.send_task("Health", "Colombo", &mut state).await);
    }

    #[tokio::test]
    async fn test_new_task_id_is_minted() {
        let mut connection = MockRemoteConnection::new();
        connection
            .expect_send_task()
            .withf(|params| params.id != "task-open" && Uuid::parse_str(&params.id).is_ok())
            .times(1)
            .returning(|params| {
                Ok(Task::new(params.id).with_status(TaskStatus::new(TaskState::Completed)))
            });
        let host = host_with(connection).await;

        // The open task belongs to another agent
        let mut state = started();
        state.agent_name = Some("Power".into());
        state.task_id = Some("task-open".into());

        assert_ok!(host.send_task("Health", "hello", &mut state).await);
    }

    #[tokio::test]
    async fn test_request_shape() {
        let mut connection = MockRemoteConnection::new();
        connection.expect_send_task().times(1).returning(|params| {
            let session_id = params.session_id.as_str();
            let message_metadata = params.message.metadata.clone().unwrap();
            assert_eq!(message_metadata["conversation_id"], session_id);
            assert_eq!(message_metadata["message_id"], "m-42");
            assert_eq!(message_metadata["channel"], "web");
            assert_eq!(params.metadata.clone().unwrap()["conversation_id"], session_id);
            assert_eq!(params.message.text(), "any outages?");
            assert_eq!(
                params.accepted_output_modes.clone().unwrap(),
                vec!["text", "text/plain", "image/png"]
            );

            Ok(Task::new(params.id).with_status(TaskStatus::new(TaskState::Completed)))
        });
        let host = host_with(connection).await;

        let metadata = json!({"message_id": "m-42", "channel": "web", "conversation_id": "stale"});
        let mut state = started().with_input_metadata(metadata.as_object().unwrap().clone());

        assert_ok!(host.send_task("Health", "any outages?", &mut state).await);
    }

    #[tokio::test]
    async fn test_unknown_agent_leaves_state_untouched() {
        let host = host_with(MockRemoteConnection::new()).await;
        let mut state = started();
        let before = state.clone();

        let err = host.send_task("Police", "hello", &mut state).await.unwrap_err();

        assert!(matches!(err, HostError::UnknownAgent(name) if name == "Police"));
        assert_eq!(state, before);
    }

    #[tokio::test]
    async fn test_missing_session() {
        let host = host_with(MockRemoteConnection::new()).await;
        let mut state = ConversationState::new();

        let err = host.send_task("Health", "hello", &mut state).await.unwrap_err();
        assert!(matches!(err, HostError::MissingSession));
        assert_eq!(state, ConversationState::new());
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_intent() {
        let mut connection = MockRemoteConnection::new();
        connection
            .expect_send_task()
            .returning(|_| Err(A2AError::Timeout));
        let host = host_with(connection).await;

        let mut state = started();
        state.agent_name = Some("Health".into());
        state.task_id = Some("task-open".into());

        let err = host.send_task("Health", "hello", &mut state).await.unwrap_err();

        assert!(matches!(err, HostError::Transport(A2AError::Timeout)));
        assert_eq!(state.agent_name.as_deref(), Some("Health"));
        assert!(state.active);
        assert_eq!(state.task_id.as_deref(), Some("task-open"));
    }

    #[tokio::test]
    async fn test_failed_switch_drops_other_agents_task() {
        let mut power = MockRemoteConnection::new();
        power.expect_send_task().times(1).returning(|params| {
            Ok(Task::new(params.id).with_status(TaskStatus::new(TaskState::InputRequired)))
        });

        // First call times out, the retry completes
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let mut health = MockRemoteConnection::new();
        let health_seen = seen.clone();
        health.expect_send_task().times(2).returning(move |params| {
            let mut seen = health_seen.lock().unwrap();
            seen.push(params.id.clone());
            if seen.len() == 1 {
                Err(A2AError::Timeout)
            } else {
                Ok(Task::new(params.id).with_status(TaskStatus::new(TaskState::Completed)))
            }
        });

        let host = host_with(health).await;
        let power_card = AgentCard::new("Power", "Outage updates", "http://power.test/");
        host.register_connection(power_card, Arc::new(power)).await;

        let mut state = started();
        let power_task = host
            .send_task("Power", "any outages?", &mut state)
            .await
            .unwrap()
            .task_id;

        assert_err!(host.send_task("Health", "find a clinic", &mut state).await);
        assert_eq!(state.agent_name.as_deref(), Some("Health"));
        assert!(state.task_id.is_none());

        assert_ok!(host.send_task("Health", "find a clinic", &mut state).await);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.iter().all(|id| *id != power_task));
    }

    #[tokio::test]
    async fn test_open_states_keep_task() {
        for task_state in [TaskState::Submitted, TaskState::Working] {
            let host = host_with(answering(task_state, Some("Looking it up"))).await;
            let mut state = started();

            let delegation = host
                .send_task("Health", "find a clinic", &mut state)
                .await
                .unwrap();

            assert_eq!(delegation.state, task_state);
            assert_eq!(delegation.parts, vec![ResponsePart::Text("Looking it up".into())]);
            assert!(!delegation.actions.is_raised());
            assert!(state.active);
            assert_eq!(state.task_id.as_deref(), Some(delegation.task_id.as_str()));
        }
    }

    #[tokio::test]
    async fn test_unknown_state_closes_task() {
        let host = host_with(answering(TaskState::Unknown, None)).await;
        let mut state = started();

        let delegation = host.send_task("Health", "hello", &mut state).await.unwrap();

        assert_eq!(delegation.state, TaskState::Unknown);
        assert!(delegation.parts.is_empty());
        assert!(!delegation.actions.is_raised());
        assert!(!state.active);
        assert!(state.task_id.is_none());
    }

    #[tokio::test]
    async fn test_status_then_artifact_parts_with_file() {
        let mut connection = MockRemoteConnection::new();
        connection.expect_send_task().returning(|params| {
            let status = TaskStatus::new(TaskState::Completed).with_message(Message::agent("Here is the map"));
            Ok(Task::new(params.id)
                .with_status(status)
                .with_artifact(Artifact::new(vec![Part::text("Clinic hours 8-5")]))
                .with_artifact(Artifact::new(vec![Part::file_with_bytes("map.png", "image/png", "AAEC")])))
        });

        let mut store = MockArtifactStore::new();
        store
            .expect_save()
            .withf(|file_id, mime_type, bytes| {
                file_id == "map.png"
                    && mime_type == "image/png"
                    && *bytes == bytes::Bytes::from_static(&[0, 1, 2])
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let host = host_with(connection).await.with_artifact_store(Arc::new(store));
        let mut state = started();

        let delegation = host.send_task("Health", "map please", &mut state).await.unwrap();

        assert_eq!(delegation.parts.len(), 3);
        assert_eq!(delegation.parts[0].as_text(), Some("Here is the map"));
        assert_eq!(delegation.parts[1].as_text(), Some("Clinic hours 8-5"));
        assert_eq!(
            delegation.parts[2].as_data().unwrap()["artifact-file-id"],
            "map.png"
        );
        assert!(delegation.actions.escalate);
    }

    #[tokio::test]
    async fn test_list_and_summary() {
        let host = host_with(MockRemoteConnection::new()).await;
        let power = AgentCard::new("Power", "Outage updates", "http://power.test/");
        host.register_connection(power, Arc::new(MockRemoteConnection::new()))
            .await;

        let agents = host.list_remote_agents().await;
        assert_eq!(agents.len(), 2);
        assert_eq!(agents[0].name, "Health");

        assert_eq!(
            host.agents_summary().await,
            "{\"name\":\"Health\",\"description\":\"Healthcare information\"}\n\
             {\"name\":\"Power\",\"description\":\"Outage updates\"}"
        );
        assert!(host.agent_card("Power").await.is_some());
    }

    #[tokio::test]
    async fn test_register_agent_card_requires_valid_url() {
        let host = HostAgent::new(HostConfig::new());

        let err = host
            .register_agent_card(AgentCard::new("Broken", "", "not a url"))
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::Resolution { .. }));

        assert_ok!(host.register_agent_card(health_card()).await);
        assert_eq!(host.list_remote_agents().await.len(), 1);
    }

    #[tokio::test]
    async fn test_connect_policies() {
        let unreachable = Url::parse("http://127.0.0.1:9/").unwrap();
        let config = HostConfig::new()
            .with_remote_agent(unreachable)
            .with_request_timeout(Some(std::time::Duration::from_secs(2)));

        assert_err!(HostAgent::connect(config.clone()).await);

        let config = config.with_resolution_policy(ResolutionPolicy::SkipUnreachable);
        let (host, skipped) = HostAgent::connect(config).await.unwrap();
        assert_eq!(skipped.len(), 1);
        assert!(host.list_remote_agents().await.is_empty());
    }

    #[tokio::test]
    async fn test_delegate_starts_turn() {
        let host = host_with(answering(TaskState::InputRequired, Some("Which city?"))).await;

        let first = host.delegate("c-1", "Health", "find a clinic").await.unwrap();
        let state = host.conversations().acquire("c-1").await;

        assert!(state.session_id.is_some());
        assert_eq!(state.task_id.as_deref(), Some(first.task_id.as_str()));
    }

    #[tokio::test]
    async fn test_create_issue() {
        let mut sink = MockIssueSink::new();
        sink.expect_record()
            .withf(|issue| issue.title == "Broken streetlight")
            .times(1)
            .returning(|_| Ok(()));
        let host = HostAgent::new(HostConfig::new()).with_issue_sink(Arc::new(sink));

        let issue = Issue::new("Broken streetlight", "Dark for a week").with_urgency(0.5);
        assert_ok!(host.create_issue(issue).await);

        let err = host.create_issue(Issue::new("", "no title")).await.unwrap_err();
        assert!(matches!(err, HostError::InvalidIssue(_)));
    }

    #[tokio::test]
    async fn test_issue_sink_failure_propagates() {
        let mut sink = MockIssueSink::new();
        sink.expect_record()
            .returning(|_| Err(anyhow::anyhow!("database offline")));
        let host = HostAgent::new(HostConfig::new()).with_issue_sink(Arc::new(sink));

        let err = host
            .create_issue(Issue::new("Pothole", "Main street"))
            .await
            .unwrap_err();
        assert!(matches!(err, HostError::IssueSink(_)));
    }
}
