//! Host configuration
//!
//! Built in code with the `with_*` methods, or read from the environment:
//!
//! | Variable                     | Meaning                                         |
//! |------------------------------|-------------------------------------------------|
//! | `HOST_REMOTE_AGENTS`         | comma-separated agent base URLs                 |
//! | `HOST_REQUEST_TIMEOUT_SECS`  | per-call deadline, `0` disables it              |
//! | `HOST_BEARER_TOKEN`          | bearer token sent to every agent                |
//! | `HOST_RESOLUTION_POLICY`     | `fail-fast` or `skip-unreachable`               |
//! | `HOST_VALIDATE_RESPONSES`    | `true` or `false`                               |

use std::{num::ParseIntError, str::FromStr, time::Duration};

use thiserror::Error;
use url::Url;

use crate::{client::config::DEFAULT_TIMEOUT, layer::AuthCredentials};

pub const REMOTE_AGENTS_VAR: &str = "HOST_REMOTE_AGENTS";
pub const REQUEST_TIMEOUT_VAR: &str = "HOST_REQUEST_TIMEOUT_SECS";
pub const BEARER_TOKEN_VAR: &str = "HOST_BEARER_TOKEN";
pub const RESOLUTION_POLICY_VAR: &str = "HOST_RESOLUTION_POLICY";
pub const VALIDATE_RESPONSES_VAR: &str = "HOST_VALIDATE_RESPONSES";

/// Output modes the host asks remote agents for
pub const DEFAULT_ACCEPTED_OUTPUT_MODES: [&str; 3] = ["text", "text/plain", "image/png"];

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid agent URL {value:?}: {source}")]
    InvalidUrl {
        var: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{var}: invalid number of seconds {value:?}: {source}")]
    InvalidTimeout {
        var: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{var}: unknown resolution policy {value:?}, expected fail-fast or skip-unreachable")]
    InvalidPolicy { var: &'static str, value: String },

    #[error("{var}: expected true or false, got {value:?}")]
    InvalidBool { var: &'static str, value: String },
}

/// What to do when an agent card cannot be resolved at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionPolicy {
    /// Abort host startup on the first unreachable agent
    #[default]
    FailFast,

    /// Log the failure and start with the agents that did resolve
    SkipUnreachable,
}

impl FromStr for ResolutionPolicy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "fail-fast" => Ok(Self::FailFast),
            "skip-unreachable" => Ok(Self::SkipUnreachable),
            other => Err(ConfigError::InvalidPolicy {
                var: RESOLUTION_POLICY_VAR,
                value: other.to_string(),
            }),
        }
    }
}

/// Configuration of a [`HostAgent`](super::HostAgent)
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Base URLs of the remote agents to resolve at startup
    pub remote_agents: Vec<Url>,

    /// Per-call deadline for remote agents
    pub request_timeout: Option<Duration>,

    /// Credentials sent to every remote agent
    pub auth: Option<AuthCredentials>,

    /// Startup behavior for unreachable agents
    pub resolution_policy: ResolutionPolicy,

    /// Validate requests and responses on the wire
    pub validate_responses: bool,

    /// Output modes requested from remote agents
    pub accepted_output_modes: Vec<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            remote_agents: Vec::new(),
            request_timeout: Some(DEFAULT_TIMEOUT),
            auth: None,
            resolution_policy: ResolutionPolicy::default(),
            validate_responses: true,
            accepted_output_modes: DEFAULT_ACCEPTED_OUTPUT_MODES
                .iter()
                .map(|mode| mode.to_string())
                .collect(),
        }
    }
}

impl HostConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the configuration from `HOST_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`, unset variables keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(agents) = lookup(REMOTE_AGENTS_VAR) {
            config.remote_agents = agents
                .split(',')
                .map(str::trim)
                .filter(|address| !address.is_empty())
                .map(|address| {
                    Url::parse(address).map_err(|source| ConfigError::InvalidUrl {
                        var: REMOTE_AGENTS_VAR,
                        value: address.to_string(),
                        source,
                    })
                })
                .collect::<Result<_, _>>()?;
        }

        if let Some(secs) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|source| ConfigError::InvalidTimeout {
                    var: REQUEST_TIMEOUT_VAR,
                    value: secs.clone(),
                    source,
                })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(token) = lookup(BEARER_TOKEN_VAR).filter(|token| !token.is_empty()) {
            config.auth = Some(AuthCredentials::bearer(token));
        }

        if let Some(policy) = lookup(RESOLUTION_POLICY_VAR) {
            config.resolution_policy = policy.parse()?;
        }

        if let Some(flag) = lookup(VALIDATE_RESPONSES_VAR) {
            config.validate_responses = match flag.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => true,
                "false" | "0" => false,
                _ => {
                    return Err(ConfigError::InvalidBool {
                        var: VALIDATE_RESPONSES_VAR,
                        value: flag,
                    })
                }
            };
        }

        Ok(config)
    }

    /// Add a remote agent address
    pub fn with_remote_agent(mut self, address: Url) -> Self {
        self.remote_agents.push(address);
        self
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_auth(mut self, auth: AuthCredentials) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn with_resolution_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.resolution_policy = policy;
        self
    }

    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }

    pub fn with_accepted_output_modes<I, T>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.accepted_output_modes = modes.into_iter().map(Into::into).collect();
        self
    }
}
