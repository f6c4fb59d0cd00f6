//! Inbound webhook delivery handler.

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use scaile_webhook::{SIGNATURE_HEADER, WebhookReceiver};

use crate::handler::Result;
use crate::handler::response::StatusResponse;
use crate::service::ServiceState;
use crate::utility::tracing_targets::TRACING_TARGET_WEBHOOK;

/// Receives a signed event and dispatches it to the configured handler.
///
/// The raw body is passed to the receiver untouched so the signature is
/// checked over the exact bytes that were sent.
#[tracing::instrument(skip_all, fields(body_len = body.len()))]
async fn receive_webhook(
    State(receiver): State<WebhookReceiver>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<StatusResponse>)> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());

    let receipt = receiver.receive(&body, signature).await?;

    tracing::debug!(
        target: TRACING_TARGET_WEBHOOK,
        delivery_id = %receipt.delivery_id,
        event = %receipt.kind,
        outcome = %receipt.outcome,
        attempts = receipt.attempts,
        "Webhook accepted"
    );

    Ok((StatusCode::OK, Json(StatusResponse::SUCCESS)))
}

/// Returns a [`Router`] with all related routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/webhook", post(receive_webhook))
}
