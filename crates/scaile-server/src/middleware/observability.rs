//! Observability middleware for request tracing and timing.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, header};
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use scaile_webhook::SIGNATURE_HEADER;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::sensitive_headers::SetSensitiveRequestHeadersLayer;
use tower_http::trace::TraceLayer;

use crate::utility::tracing_targets::TRACING_TARGET_METRICS;

/// Header carrying the per-request identifier.
const X_REQUEST_ID: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// This middleware stack generates unique request IDs, adds structured
    /// logging spans for each request, propagates request IDs to responses,
    /// and marks the signature header as sensitive so it is redacted in logs.
    fn with_observability(self) -> Self;

    /// Layers timing middleware that logs method, path, status and duration.
    fn with_metrics(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        self.layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            X_REQUEST_ID,
        )))
        .layer(SetSensitiveRequestHeadersLayer::new([
            header::AUTHORIZATION,
            HeaderName::from_static(SIGNATURE_HEADER),
        ]))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(X_REQUEST_ID),
            MakeRequestUuid,
        ))
    }

    fn with_metrics(self) -> Self {
        self.layer(from_fn(track_request_metrics))
    }
}

/// Request timing middleware.
pub async fn track_request_metrics(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let request_size = request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);

    tracing::trace!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        request_size = request_size,
        "request started"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::debug!(
        target: TRACING_TARGET_METRICS,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis() as u64,
        request_size = request_size,
        "request completed"
    );

    response
}
