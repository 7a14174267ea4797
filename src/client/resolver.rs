//! Agent card resolution

use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::{
    client::{config::DEFAULT_TIMEOUT, A2AClientBuilder},
    layer::AuthCredentials,
    protocol::{agent::AgentCard, error::A2AError},
    transport::HttpTransport,
};

/// Fetches agent cards from `{address}/.well-known/agent.json`
///
/// One reqwest client is shared by every lookup. Failures are returned as-is
/// and never retried.
#[derive(Debug, Clone)]
pub struct CardResolver {
    http: reqwest::Client,
    timeout: Option<Duration>,
    auth: Option<AuthCredentials>,
}

impl CardResolver {
    /// Create a resolver with the default deadline
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a resolver on top of an existing reqwest client
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout: Some(DEFAULT_TIMEOUT),
            auth: None,
        }
    }

    /// Set the deadline for each lookup
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send credentials with each lookup
    pub fn with_auth(mut self, auth: Option<AuthCredentials>) -> Self {
        self.auth = auth;
        self
    }

    /// The reqwest client lookups go through
    pub fn http_client(&self) -> &reqwest::Client {
        &self.http
    }

    /// Resolve the card published by the agent at `address`
    pub async fn resolve(&self, address: &Url) -> Result<AgentCard, A2AError> {
        let transport = HttpTransport::with_client(address.clone(), self.http.clone());

        let client = A2AClientBuilder::new(address.clone())
            .with_transport(transport)
            .with_optional_auth(self.auth.clone())
            .with_optional_timeout(self.timeout)
            .build()?;

        match client.discover().await {
            Ok(card) => {
                debug!(%address, agent = %card.name, "resolved agent card");
                Ok(card)
            }
            Err(err) => {
                warn!(%address, error = %err, "failed to resolve agent card");
                Err(err)
            }
        }
    }
}

impl Default for CardResolver {
    fn default() -> Self {
        Self::new()
    }
}
