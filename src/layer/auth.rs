//! Credentials for agents behind authentication
//!
//! [`AuthLayer`] stamps the host's credentials on every request that does
//! not already carry some. The protocol service turns them into a header.

use std::{
    fmt,
    task::{Context, Poll},
};

use base64::{engine::general_purpose, Engine as _};
use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::error::A2AError,
    service::{A2AFuture, A2ARequest, A2AResponse},
};

const AUTHORIZATION: &str = "Authorization";

/// How the host proves itself to an agent
///
/// `Debug` output never shows the secret.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthCredentials {
    /// `Authorization: Bearer <token>`
    Bearer(String),

    /// The key sent verbatim under a custom header
    ApiKey { key: String, header: String },

    /// `Authorization: Basic <base64 user:password>`
    Basic { username: String, password: String },
}

impl AuthCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer(token.into())
    }

    pub fn api_key(key: impl Into<String>, header: impl Into<String>) -> Self {
        Self::ApiKey {
            key: key.into(),
            header: header.into(),
        }
    }

    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn header_name(&self) -> &str {
        match self {
            AuthCredentials::ApiKey { header, .. } => header,
            AuthCredentials::Bearer(_) | AuthCredentials::Basic { .. } => AUTHORIZATION,
        }
    }

    pub fn header_value(&self) -> String {
        match self {
            AuthCredentials::Bearer(token) => format!("Bearer {}", token),
            AuthCredentials::ApiKey { key, .. } => key.clone(),
            AuthCredentials::Basic { username, password } => {
                let pair = format!("{}:{}", username, password);
                format!("Basic {}", general_purpose::STANDARD.encode(pair))
            }
        }
    }

    /// Header name and value carrying the credentials
    pub fn to_header(&self) -> (String, String) {
        (self.header_name().to_string(), self.header_value())
    }
}

impl fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthCredentials::Bearer(_) => f.write_str("Bearer(<redacted>)"),
            AuthCredentials::ApiKey { header, .. } => f
                .debug_struct("ApiKey")
                .field("header", header)
                .finish_non_exhaustive(),
            AuthCredentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthLayer {
    credentials: AuthCredentials,
}

impl AuthLayer {
    pub fn new(credentials: AuthCredentials) -> Self {
        Self { credentials }
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(AuthCredentials::bearer(token))
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthService {
            inner,
            credentials: self.credentials.clone(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AuthService<S> {
    inner: S,
    credentials: AuthCredentials,
}

impl<S> Service<A2ARequest> for AuthService<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = A2AFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: A2ARequest) -> Self::Future {
        // Credentials set on the request itself win
        req.context
            .auth
            .get_or_insert_with(|| self.credentials.clone());

        let mut inner = self.inner.clone();
        Box::pin(async move { inner.call(req).await })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower::ServiceExt;

    use super::*;
    use crate::{
        codec::JsonRpcCodec,
        protocol::operation::A2AOperation,
        service::{A2AProtocolService, RequestContext},
        transport::{mock::MockTransport, TransportResponse},
    };

    fn discover(context: RequestContext) -> A2ARequest {
        A2ARequest::new(A2AOperation::DiscoverAgent, context)
    }

    fn card_reply() -> TransportResponse {
        TransportResponse::new(200).with_body(r#"{"name":"ceb Agent","url":"http://agent.test/"}"#)
    }

    #[test]
    fn test_header_mapping() {
        assert_eq!(
            AuthCredentials::bearer("test-token").to_header(),
            ("Authorization".to_string(), "Bearer test-token".to_string())
        );
        assert_eq!(
            AuthCredentials::api_key("secret-key", "X-API-Key").to_header(),
            ("X-API-Key".to_string(), "secret-key".to_string())
        );
        assert_eq!(
            AuthCredentials::basic("user", "pass").header_value(),
            "Basic dXNlcjpwYXNz"
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let shown = format!(
            "{:?} {:?} {:?}",
            AuthCredentials::bearer("tok-123"),
            AuthCredentials::api_key("key-456", "X-API-Key"),
            AuthCredentials::basic("host", "pw-789"),
        );

        assert!(!shown.contains("tok-123"));
        assert!(!shown.contains("key-456"));
        assert!(!shown.contains("pw-789"));
        assert!(shown.contains("X-API-Key") && shown.contains("host"));
    }

    #[tokio::test]
    async fn test_layer_sets_authorization_header() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.header("Authorization"), Some("Bearer host-token"));
            card_reply()
        });
        let service = AuthLayer::bearer("host-token")
            .layer(A2AProtocolService::new(transport, Arc::new(JsonRpcCodec)));

        let response = service.oneshot(discover(RequestContext::default())).await.unwrap();
        assert!(response.into_agent_card().is_some());
    }

    #[tokio::test]
    async fn test_request_credentials_win() {
        let transport = MockTransport::new(|req| {
            assert_eq!(req.header("Authorization"), Some("Bearer per-call"));
            card_reply()
        });
        let service = AuthLayer::bearer("host-token")
            .layer(A2AProtocolService::new(transport, Arc::new(JsonRpcCodec)));

        let context = RequestContext::default().with_auth(AuthCredentials::bearer("per-call"));
        assert!(service.oneshot(discover(context)).await.is_ok());
    }
}
