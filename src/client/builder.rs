//! Client builder for constructing A2A clients with composable layers

use std::{sync::Arc, time::Duration};

use tower::ServiceBuilder;
use url::Url;

use crate::{
    client::{AgentClient, ClientConfig},
    codec::{Codec, JsonRpcCodec},
    layer::{A2AValidationLayer, AuthCredentials, AuthLayer, DeadlineLayer},
    protocol::error::A2AError,
    service::{A2AProtocolService, A2AService},
    transport::{HttpTransport, Transport},
};

/// Assembles the service stack behind an [`AgentClient`]
///
/// Requests pass `DeadlineLayer`, then `AuthLayer` when credentials are set,
/// then `A2AValidationLayer` unless validation is off, and reach the
/// transport through [`A2AProtocolService`].
///
/// # Example
///
/// ```rust,no_run
/// use a2a_host::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let url = "http://localhost:10010".parse().unwrap();
/// let client = A2AClientBuilder::new_http(url)
///     .with_bearer_auth("token123")
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let card = client.discover().await?;
/// println!("Connected to: {}", card.name);
/// # Ok(())
/// # }
/// ```
pub struct A2AClientBuilder<T: Transport> {
    config: ClientConfig,
    transport: Option<T>,
    codec: Arc<dyn Codec>,
    auth: Option<AuthCredentials>,
}

impl<T: Transport> A2AClientBuilder<T> {
    /// Start a builder for the agent at `agent_url`
    ///
    /// A transport must be supplied with [`with_transport`](Self::with_transport).
    pub fn new(agent_url: Url) -> Self {
        Self {
            config: ClientConfig::new(agent_url.as_str()),
            transport: None,
            codec: Arc::new(JsonRpcCodec),
            auth: None,
        }
    }

    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the JSON-RPC binding
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_bearer_auth(self, token: impl Into<String>) -> Self {
        self.with_auth(AuthCredentials::bearer(token))
    }

    /// Send `key` under the `header` header
    pub fn with_api_key_auth(self, key: impl Into<String>, header: impl Into<String>) -> Self {
        self.with_auth(AuthCredentials::api_key(key, header))
    }

    pub fn with_basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_auth(AuthCredentials::basic(username, password))
    }

    pub fn with_auth(self, credentials: AuthCredentials) -> Self {
        self.with_optional_auth(Some(credentials))
    }

    /// Set or clear the credentials
    pub fn with_optional_auth(mut self, credentials: Option<AuthCredentials>) -> Self {
        self.auth = credentials;
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_optional_timeout(Some(timeout))
    }

    pub fn without_timeout(self) -> Self {
        self.with_optional_timeout(None)
    }

    /// Per-call deadline, `None` letting calls run indefinitely
    pub fn with_optional_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Check requests before sending and answers on arrival (default: on)
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.config.validate_responses = enabled;
        self
    }

    /// Assemble the stack
    ///
    /// # Errors
    ///
    /// Fails when no transport was supplied.
    pub fn build(self) -> Result<AgentClient<impl A2AService>, A2AError> {
        let transport = self.transport.ok_or_else(|| {
            A2AError::Protocol(format!(
                "No transport configured for {}",
                self.config.agent_url
            ))
        })?;

        let service = ServiceBuilder::new()
            .layer(DeadlineLayer::new())
            .option_layer(self.auth.map(AuthLayer::new))
            .option_layer(self.config.validate_responses.then(A2AValidationLayer::new))
            .service(A2AProtocolService::new(transport, self.codec));

        Ok(AgentClient::new(service, self.config))
    }
}

impl A2AClientBuilder<HttpTransport> {
    /// A builder talking JSON-RPC over HTTP to `agent_url`
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self::new(agent_url).with_transport(transport)
    }
}
