//! Liveness probe handler.

use axum::routing::get;
use axum::{Json, Router};

use crate::handler::response::StatusResponse;
use crate::service::ServiceState;

/// Reports that the process is up and serving requests.
async fn health_status() -> Json<StatusResponse> {
    Json(StatusResponse::OK)
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
