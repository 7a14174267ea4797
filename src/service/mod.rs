//! Tower Service implementations

pub mod core;
pub mod request;
pub mod response;

pub use self::core::{A2AFuture, A2AProtocolService};
pub use request::{A2ARequest, RequestContext};
pub use response::A2AResponse;

use tower_service::Service;

use crate::protocol::error::A2AError;

/// A cloneable, thread-safe A2A service stack
///
/// Implemented for every service that answers [`A2ARequest`]s with a boxed
/// [`A2AFuture`], which covers the layered client stack and the in-process
/// task manager alike.
pub trait A2AService:
    Service<A2ARequest, Response = A2AResponse, Error = A2AError, Future = A2AFuture>
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<S> A2AService for S where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError, Future = A2AFuture>
        + Clone
        + Send
        + Sync
        + 'static
{
}
