//! Per-conversation delegation state

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::protocol::Metadata;

/// Delegation state of one conversation
///
/// `session_id` is minted once per conversation by [`begin_turn`](Self::begin_turn)
/// and sent with every task. `task_id` is kept between turns while a task
/// with `agent_name` is still open.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub session_id: Option<String>,
    pub task_id: Option<String>,

    /// Agent most recently delegated to
    pub agent_name: Option<String>,

    /// Whether the conversation has an open task with `agent_name`
    pub active: bool,

    /// Metadata of the incoming user message, forwarded to agents
    #[serde(default)]
    pub input_metadata: Metadata,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the state before the model handles a user turn
    ///
    /// Mints the session id on first use and reopens the conversation.
    pub fn begin_turn(&mut self) {
        if !self.active {
            if self.session_id.is_none() {
                self.session_id = Some(Uuid::new_v4().to_string());
            }
            self.active = true;
        }
    }

    /// The agent the conversation is currently talking to, if any
    pub fn active_agent(&self) -> Option<&str> {
        match (&self.session_id, self.active) {
            (Some(_), true) => self.agent_name.as_deref(),
            _ => None,
        }
    }

    /// Set the metadata of the incoming user message
    pub fn with_input_metadata(mut self, metadata: Metadata) -> Self {
        self.input_metadata = metadata;
        self
    }
}

/// Signals for the chat layer raised while handling agent output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolActions {
    /// Show the agent's output as-is instead of summarizing it
    pub skip_summarization: bool,

    /// Hand control back to the user
    pub escalate: bool,
}

impl ToolActions {
    /// Raise both signals
    pub fn escalate_to_user(&mut self) {
        self.skip_summarization = true;
        self.escalate = true;
    }

    pub fn is_raised(&self) -> bool {
        self.skip_summarization || self.escalate
    }
}

/// Conversation states with one exclusion lock per conversation
///
/// Holding the guard from [`acquire`](Self::acquire) serializes delegations
/// within a conversation while different conversations proceed in parallel.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: Mutex<HashMap<String, Arc<Mutex<ConversationState>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock the state of `conversation_id`, creating it on first use
    pub async fn acquire(&self, conversation_id: &str) -> OwnedMutexGuard<ConversationState> {
        let state = {
            let mut conversations = self.conversations.lock().await;
            conversations
                .entry(conversation_id.to_string())
                .or_default()
                .clone()
        };
        state.lock_owned().await
    }

    /// Drop the state of `conversation_id`
    ///
    /// A guard that is still held keeps working on the detached state.
    pub async fn discard(&self, conversation_id: &str) -> bool {
        self.conversations
            .lock()
            .await
            .remove(conversation_id)
            .is_some()
    }

    pub async fn len(&self) -> usize {
        self.conversations.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.conversations.lock().await.is_empty()
    }
}
