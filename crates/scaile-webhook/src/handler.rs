//! Event handler trait and the default logging implementation.

use crate::{Result, TRACING_TARGET_DISPATCH, WebhookEvent};

/// Application-provided callbacks for recognized events.
///
/// Implement this trait to react to deliveries. Returning an error marks the
/// attempt as failed; the receiver retries it according to its
/// [`RetryPolicy`](crate::RetryPolicy), so implementations should tolerate
/// being invoked more than once for the same event.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync {
    /// Handles a `new_data` event.
    async fn on_new_data(&self, event: &WebhookEvent) -> Result<()>;

    /// Handles a `delete_data` event.
    async fn on_delete_data(&self, event: &WebhookEvent) -> Result<()>;
}

/// Handler that only records events in the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHandler;

#[async_trait::async_trait]
impl EventHandler for LoggingHandler {
    async fn on_new_data(&self, event: &WebhookEvent) -> Result<()> {
        tracing::info!(
            target: TRACING_TARGET_DISPATCH,
            data = %event.data,
            "Processing new data"
        );
        Ok(())
    }

    async fn on_delete_data(&self, event: &WebhookEvent) -> Result<()> {
        tracing::info!(
            target: TRACING_TARGET_DISPATCH,
            data = %event.data,
            "Processing data deletion"
        );
        Ok(())
    }
}
