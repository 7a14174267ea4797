//! Core A2A protocol service implementation

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use tower_service::Service;

use crate::{
    codec::Codec,
    protocol::{error::A2AError, operation::A2AOperation, HttpMethod, AGENT_CARD_PATH},
    service::{A2ARequest, A2AResponse},
    transport::{Transport, TransportRequest, TransportResponse},
};

/// Boxed future returned by the A2A services in this crate
pub type A2AFuture = Pin<Box<dyn Future<Output = Result<A2AResponse, A2AError>> + Send>>;

/// Innermost service of the client stack
///
/// Encodes the operation with the codec, sends it over the transport and
/// decodes the answer. HTTP error statuses are mapped to [`A2AError`]s here so
/// every transport reports them alike.
pub struct A2AProtocolService<T> {
    transport: T,
    codec: Arc<dyn Codec>,
}

impl<T> A2AProtocolService<T>
where
    T: Transport,
{
    pub fn new(transport: T, codec: Arc<dyn Codec>) -> Self {
        Self { transport, codec }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn encode(req: &A2ARequest, codec: &dyn Codec) -> Result<TransportRequest, A2AError> {
        let operation = &req.operation;
        let request = match operation.method() {
            HttpMethod::Get => TransportRequest::get(operation.endpoint()),
            HttpMethod::Post => {
                TransportRequest::post(operation.endpoint(), codec.encode_request(operation)?)
                    .with_header("Content-Type", codec.content_type())
            }
        };
        let mut request = request.with_header("Accept", codec.content_type());

        if let Some(auth) = &req.context.auth {
            let (name, value) = auth.to_header();
            request = request.with_header(name, value);
        }
        for (name, value) in &req.context.headers {
            request = request.with_header(name.clone(), value.clone());
        }

        Ok(request)
    }

    fn decode(
        response: TransportResponse,
        codec: &dyn Codec,
        operation: &A2AOperation,
    ) -> Result<A2AResponse, A2AError> {
        if response.is_success() {
            codec.decode_response(&response.body, operation)
        } else {
            Err(status_error(&response, operation))
        }
    }
}

/// Error for a non-2xx answer to `operation`
fn status_error(response: &TransportResponse, operation: &A2AOperation) -> A2AError {
    let message = response.error_message();

    match response.status {
        401 | 403 => A2AError::Auth(message.unwrap_or_else(|| "Unauthorized".to_string())),
        404 => match operation {
            A2AOperation::DiscoverAgent => {
                A2AError::Protocol(format!("Agent card not published at {}", AGENT_CARD_PATH))
            }
            _ => match operation.task_id() {
                Some(task_id) => A2AError::TaskNotFound {
                    task_id: task_id.to_string(),
                },
                None => A2AError::Protocol(message.unwrap_or_else(|| "Not found".to_string())),
            },
        },
        status => match message {
            Some(message) => A2AError::Transport(format!("HTTP {}: {}", status, message)),
            None => A2AError::Transport(format!("HTTP error: {}", status)),
        },
    }
}

impl<T> Service<A2ARequest> for A2AProtocolService<T>
where
    T: Transport + Clone,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = A2AFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.transport.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        let transport = self.transport.clone();
        let codec = self.codec.clone();

        Box::pin(async move {
            let request = Self::encode(&req, codec.as_ref())?;
            let response = transport.execute(request).await?;
            Self::decode(response, codec.as_ref(), &req.operation)
        })
    }
}

impl<T> Clone for A2AProtocolService<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            codec: self.codec.clone(),
        }
    }
}
