//! Answers flowing back through the client stack

use crate::protocol::{agent::AgentCard, task::Task};

/// What an agent answered
///
/// Every task operation answers with the task; discovery with the card.
#[derive(Debug, Clone)]
pub enum A2AResponse {
    Task(Box<Task>),
    AgentCard(Box<AgentCard>),
}

impl A2AResponse {
    pub fn into_task(self) -> Option<Task> {
        match self {
            A2AResponse::Task(task) => Some(*task),
            A2AResponse::AgentCard(_) => None,
        }
    }

    pub fn into_agent_card(self) -> Option<AgentCard> {
        match self {
            A2AResponse::AgentCard(card) => Some(*card),
            A2AResponse::Task(_) => None,
        }
    }
}

impl From<Task> for A2AResponse {
    fn from(task: Task) -> Self {
        A2AResponse::Task(Box::new(task))
    }
}

impl From<AgentCard> for A2AResponse {
    fn from(card: AgentCard) -> Self {
        A2AResponse::AgentCard(Box::new(card))
    }
}
