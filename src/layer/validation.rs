//! Request and answer checks
//!
//! Malformed requests fail before reaching the network. Answers must be the
//! kind the operation expects and, for task operations, name the task that
//! was asked about.

use std::task::{Context, Poll};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{error::A2AError, message::Part, operation::A2AOperation},
    service::{A2AFuture, A2ARequest, A2AResponse},
};

#[derive(Clone, Debug, Default)]
pub struct A2AValidationLayer;

impl A2AValidationLayer {
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for A2AValidationLayer {
    type Service = A2AValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        A2AValidationService { inner }
    }
}

#[derive(Clone, Debug)]
pub struct A2AValidationService<S> {
    inner: S,
}

fn invalid(message: impl Into<String>) -> A2AError {
    A2AError::Validation(message.into())
}

/// Check an operation before it is sent
pub fn validate_request(operation: &A2AOperation) -> Result<(), A2AError> {
    if operation.task_id().is_some_and(str::is_empty) {
        return Err(invalid("Task ID cannot be empty"));
    }

    if let A2AOperation::SendTask(params) = operation {
        if params.session_id.is_empty() {
            return Err(invalid("Session ID cannot be empty"));
        }
        if params.message.parts.is_empty() {
            return Err(invalid("Message must have at least one part"));
        }
        params.message.parts.iter().try_for_each(validate_part)?;
    }

    Ok(())
}

fn validate_part(part: &Part) -> Result<(), A2AError> {
    match part {
        Part::Text(text) if text.text.is_empty() => Err(invalid("Text part cannot be empty")),
        Part::File(file) if file.file.bytes.is_none() && file.file.uri.is_none() => {
            Err(invalid("File must have either URI or bytes content"))
        }
        Part::Unknown(kind) => Err(invalid(format!("Cannot send part of unknown type: {}", kind))),
        _ => Ok(()),
    }
}

/// Check an answer against the operation that produced it
pub fn validate_response(operation: &A2AOperation, response: &A2AResponse) -> Result<(), A2AError> {
    match (response, operation.task_id()) {
        (A2AResponse::Task(task), Some(requested)) => {
            if task.id.is_empty() {
                return Err(invalid("Task ID cannot be empty"));
            }
            if task.id != requested {
                return Err(invalid(format!(
                    "Asked about task {} but the agent answered with task {}",
                    requested, task.id
                )));
            }
            Ok(())
        }
        (A2AResponse::AgentCard(card), None) => {
            if card.name.is_empty() {
                return Err(invalid("Agent name cannot be empty"));
            }
            if card.url.is_empty() {
                return Err(invalid("Agent card must carry a URL"));
            }
            Ok(())
        }
        (A2AResponse::Task(_), None) => Err(A2AError::Protocol(
            "Agent answered discovery with a task".into(),
        )),
        (A2AResponse::AgentCard(_), Some(_)) => Err(A2AError::Protocol(format!(
            "Agent answered {} with an agent card",
            operation.rpc_method()
        ))),
    }
}

impl<S> Service<A2ARequest> for A2AValidationService<S>
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
        if let Err(err) = validate_request(&req.operation) {
            return Box::pin(async move { Err(err) });
        }

        let operation = req.operation.clone();
        let mut inner = self.inner.clone();
        Box::pin(async move {
            let response = inner.call(req).await?;
            validate_response(&operation, &response)?;
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::protocol::{
        agent::AgentCard,
        message::Message,
        task::{Task, TaskIdParams, TaskSendParams},
    };

    use super::*;

    fn send(params: TaskSendParams) -> A2AOperation {
        A2AOperation::SendTask(params)
    }

    fn cancel(id: &str) -> A2AOperation {
        A2AOperation::CancelTask(TaskIdParams { id: id.to_string() })
    }

    #[test]
    fn test_valid_send_task() {
        let operation = send(TaskSendParams::new("t-1", "s-1", Message::user("Hello")));
        assert!(validate_request(&operation).is_ok());
    }

    #[test]
    fn test_empty_message() {
        let mut message = Message::user("Test");
        message.parts.clear();

        assert!(validate_request(&send(TaskSendParams::new("t-1", "s-1", message))).is_err());
    }

    #[test]
    fn test_empty_ids() {
        let missing_session = send(TaskSendParams::new("t-1", "", Message::user("Hello")));
        assert!(validate_request(&missing_session).is_err());
        assert!(validate_request(&cancel("")).is_err());
    }

    #[test]
    fn test_file_without_content() {
        let mut message = Message::user("see attached");
        message.parts.push(Part::file_with_uri("x.png", "file:///x.png"));
        if let Part::File(file) = &mut message.parts[1] {
            file.file.uri = None;
        }

        assert!(validate_request(&send(TaskSendParams::new("t-1", "s-1", message))).is_err());
    }

    #[test]
    fn test_task_answers() {
        let answer = A2AResponse::from(Task::new("task-123"));
        assert!(validate_response(&cancel("task-123"), &answer).is_ok());

        let err = validate_response(&cancel("task-999"), &answer).unwrap_err();
        assert!(matches!(err, A2AError::Validation(message) if message.contains("task-999")));

        let err = validate_response(&A2AOperation::DiscoverAgent, &answer).unwrap_err();
        assert!(matches!(err, A2AError::Protocol(_)));
    }

    #[test]
    fn test_card_answers() {
        let discover = A2AOperation::DiscoverAgent;

        let card = A2AResponse::from(AgentCard::new("Agent", "", "http://localhost/"));
        assert!(validate_response(&discover, &card).is_ok());
        assert!(validate_response(&cancel("t-1"), &card).is_err());

        let nameless = A2AResponse::from(AgentCard::new("", "", "http://localhost/"));
        assert!(validate_response(&discover, &nameless).is_err());

        let unaddressed = A2AResponse::from(AgentCard::new("Agent", "", ""));
        assert!(validate_response(&discover, &unaddressed).is_err());
    }
}
