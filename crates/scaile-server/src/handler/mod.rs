//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust,ignore
//! use scaile_server::handler::routes;
//! use scaile_server::service::ServiceState;
//! use scaile_webhook::{LoggingHandler, ReceiverConfig, WebhookReceiver};
//!
//! let config = ReceiverConfig::new("secret");
//! let receiver = WebhookReceiver::from_config(&config, LoggingHandler)?;
//! let app = routes().with_state(ServiceState::new(receiver));
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod response;
mod webhooks;

use axum::Router;
use axum::response::{IntoResponse, Response};

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, StatusResponse};
use crate::service::ServiceState;

#[inline]
async fn handler() -> Response {
    ErrorKind::NotFound.into_response()
}

#[inline]
async fn method_not_allowed() -> Response {
    ErrorKind::MethodNotAllowed.into_response()
}

/// Returns a [`Router`] with all routes.
pub fn routes() -> Router<ServiceState> {
    Router::new()
        .merge(webhooks::routes())
        .merge(monitors::routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(handler)
}
