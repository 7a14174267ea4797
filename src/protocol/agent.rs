//! Agent discovery and capability types

use serde::{Deserialize, Serialize};

fn default_modes() -> Vec<String> {
    vec!["text".to_string()]
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Agent Card for agent discovery
///
/// The Agent Card is published at `/.well-known/agent.json` and describes
/// the agent's capabilities, the content modes it speaks, and where tasks
/// should be sent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Name of the agent, unique within a host directory
    pub name: String,

    /// Human-readable description of the agent
    #[serde(default)]
    pub description: String,

    /// Base URL that accepts task RPCs
    pub url: String,

    /// Organization publishing the agent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AgentProvider>,

    /// Agent version
    #[serde(default = "default_version")]
    pub version: String,

    /// URL to agent documentation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation_url: Option<String>,

    /// Agent capabilities
    #[serde(default)]
    pub capabilities: AgentCapabilities,

    /// Supported authentication schemes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication: Option<AgentAuthentication>,

    /// Content types the agent accepts
    #[serde(default = "default_modes")]
    pub default_input_modes: Vec<String>,

    /// Content types the agent produces
    #[serde(default = "default_modes")]
    pub default_output_modes: Vec<String>,

    /// Advertised skills
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

impl AgentCard {
    /// Create a new agent card
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            provider: None,
            version: default_version(),
            documentation_url: None,
            capabilities: AgentCapabilities::default(),
            authentication: None,
            default_input_modes: default_modes(),
            default_output_modes: default_modes(),
            skills: Vec::new(),
        }
    }

    /// Set the agent capabilities
    pub fn with_capabilities(mut self, capabilities: AgentCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the accepted and produced content modes
    pub fn with_modes(mut self, input: Vec<String>, output: Vec<String>) -> Self {
        self.default_input_modes = input;
        self.default_output_modes = output;
        self
    }

    /// Add a skill
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Set the agent version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Whether any of `accepted` is among the agent's output modes
    ///
    /// An empty `accepted` list accepts anything.
    pub fn produces_any(&self, accepted: &[String]) -> bool {
        accepted.is_empty()
            || accepted
                .iter()
                .any(|mode| self.default_output_modes.contains(mode))
    }
}

/// Organization publishing an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentProvider {
    pub organization: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Agent capabilities
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Supports streaming responses
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(default)]
    pub push_notifications: bool,

    /// Keeps a history of task state transitions
    #[serde(default)]
    pub state_transition_history: bool,
}

impl AgentCapabilities {
    /// Create capabilities with default values (all false)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Enable push notifications
    pub fn with_push_notifications(mut self) -> Self {
        self.push_notifications = true;
        self
    }
}

/// Authentication requirements published by an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentAuthentication {
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<String>,
}

/// A skill the agent advertises
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_modes: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_modes: Option<Vec<String>>,
}

impl AgentSkill {
    /// Create a skill with an id and display name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: Vec::new(),
            examples: Vec::new(),
            input_modes: None,
            output_modes: None,
        }
    }

    /// Set the skill description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add tags
    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Add example prompts
    pub fn with_examples<I, T>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.examples.extend(examples.into_iter().map(Into::into));
        self
    }
}
