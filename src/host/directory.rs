//! Registry of the remote agents a host can delegate to

use std::{collections::HashMap, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{host::connection::RemoteConnection, protocol::AgentCard};

/// Name and description of a registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
}

/// A registered agent: its card and the connection derived from it
#[derive(Clone)]
pub struct AgentEntry {
    pub card: AgentCard,
    pub connection: Arc<dyn RemoteConnection>,
}

/// Agents keyed by card name, in registration order
///
/// Re-registering a name replaces its card and connection but keeps the
/// position of the first registration.
#[derive(Default, Clone)]
pub struct AgentDirectory {
    entries: Vec<AgentEntry>,
    positions: HashMap<String, usize>,
}

impl AgentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the agent named by `card`
    ///
    /// Returns the entry it replaced, if any.
    pub fn register(
        &mut self,
        card: AgentCard,
        connection: Arc<dyn RemoteConnection>,
    ) -> Option<AgentEntry> {
        let entry = AgentEntry { card, connection };
        match self.positions.get(&entry.card.name) {
            Some(&position) => Some(std::mem::replace(&mut self.entries[position], entry)),
            None => {
                self.positions
                    .insert(entry.card.name.clone(), self.entries.len());
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&AgentEntry> {
        self.positions.get(name).map(|&position| &self.entries[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Name and description of every agent, in registration order
    pub fn list_agents(&self) -> Vec<AgentSummary> {
        self.entries
            .iter()
            .map(|entry| AgentSummary {
                name: entry.card.name.clone(),
                description: entry.card.description.clone(),
            })
            .collect()
    }

    pub fn cards(&self) -> impl Iterator<Item = &AgentCard> {
        self.entries.iter().map(|entry| &entry.card)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for AgentDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|entry| &entry.card.name))
            .finish()
    }
}
