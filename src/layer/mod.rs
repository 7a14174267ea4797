//! Middleware of the client stack
//!
//! Outermost first: [`DeadlineLayer`], [`AuthLayer`], [`A2AValidationLayer`].

pub mod auth;
pub mod deadline;
pub mod validation;

pub use auth::{AuthCredentials, AuthLayer, AuthService};
pub use deadline::{DeadlineLayer, DeadlineService};
pub use validation::{A2AValidationLayer, A2AValidationService};
