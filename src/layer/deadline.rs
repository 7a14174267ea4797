//! Per-call deadline layer
//!
//! Enforces the timeout carried in each request's [`RequestContext`] and
//! reports expiry as [`A2AError::Timeout`], so callers can tell a slow agent
//! apart from a failing one.
//!
//! [`RequestContext`]: crate::service::RequestContext

use std::task::{Context, Poll};

use tower_layer::Layer;
use tower_service::Service;
use tracing::warn;

use crate::{
    protocol::error::A2AError,
    service::{A2AFuture, A2ARequest, A2AResponse},
};

/// Layer that bounds every call by its request deadline
#[derive(Clone, Debug, Default)]
pub struct DeadlineLayer;

impl DeadlineLayer {
    /// Create a new deadline layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for DeadlineLayer {
    type Service = DeadlineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        DeadlineService { inner }
    }
}

/// Service enforcing `RequestContext::timeout`
#[derive(Clone, Debug)]
pub struct DeadlineService<S> {
    inner: S,
}

impl<S> Service<A2ARequest> for DeadlineService<S>
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

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let deadline = req.context.timeout;
        let agent_url = req.context.agent_url.clone();
        let call = self.inner.clone().call(req);

        Box::pin(async move {
            match deadline {
                Some(limit) => match tokio::time::timeout(limit, call).await {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(%agent_url, ?limit, "A2A call exceeded its deadline");
                        Err(A2AError::Timeout)
                    }
                },
                None => call.await,
            }
        })
    }
}
