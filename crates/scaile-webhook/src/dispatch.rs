//! Event dispatcher wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::{EventHandler, EventKind, Result, TRACING_TARGET_DISPATCH, WebhookEvent};

/// Result of routing a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// A handler accepted the event.
    Handled,
    /// The event type is unknown and was skipped.
    Ignored,
}

/// Routes events to an [`EventHandler`] by their kind.
///
/// The handler is wrapped in `Arc` for cheap cloning.
#[derive(Clone)]
pub struct Dispatcher {
    inner: Arc<dyn EventHandler>,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Dispatcher {
    /// Creates a new dispatcher over the given handler.
    pub fn new<H>(handler: H) -> Self
    where
        H: EventHandler + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Invokes the handler matching the event kind.
    ///
    /// Unknown events are logged and reported as [`DispatchOutcome::Ignored`]
    /// without touching the handler.
    pub async fn dispatch(&self, event: &WebhookEvent) -> Result<DispatchOutcome> {
        let kind = event.kind();
        let started_at = Instant::now();

        let result = match kind {
            EventKind::NewData => self.inner.on_new_data(event).await,
            EventKind::DeleteData => self.inner.on_delete_data(event).await,
            EventKind::Unknown => {
                tracing::warn!(
                    target: TRACING_TARGET_DISPATCH,
                    event = event.tag(),
                    "Unknown event type"
                );
                return Ok(DispatchOutcome::Ignored);
            }
        };

        let elapsed = started_at.elapsed();
        match &result {
            Ok(()) => {
                tracing::debug!(
                    target: TRACING_TARGET_DISPATCH,
                    event = %kind,
                    elapsed_ms = elapsed.as_millis(),
                    "Event handled"
                );
            }
            Err(error) => {
                tracing::warn!(
                    target: TRACING_TARGET_DISPATCH,
                    event = %kind,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Event handler failed"
                );
            }
        }

        result.map(|()| DispatchOutcome::Handled)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::ErrorKind;
    use crate::mock::MockHandler;

    #[tokio::test]
    async fn test_dispatch_routes_by_kind() {
        let handler = MockHandler::succeeding();
        let dispatcher = Dispatcher::new(handler.clone());

        let new_data = WebhookEvent::new("new_data", json!({"id": 1}));
        let delete_data = WebhookEvent::new("delete_data", json!({"id": 1}));

        assert_eq!(dispatcher.dispatch(&new_data).await.unwrap(), DispatchOutcome::Handled);
        assert_eq!(dispatcher.dispatch(&delete_data).await.unwrap(), DispatchOutcome::Handled);

        assert_eq!(handler.calls_for(EventKind::NewData), 1);
        assert_eq!(handler.calls_for(EventKind::DeleteData), 1);
    }

    #[tokio::test]
    async fn test_dispatch_ignores_unknown() {
        let handler = MockHandler::failing();
        let dispatcher = Dispatcher::new(handler.clone());

        let event = WebhookEvent::new("frobnicate", json!(null));
        let outcome = dispatcher.dispatch(&event).await.unwrap();

        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(handler.calls(), 0);
    }

    #[tokio::test]
    async fn test_dispatch_propagates_handler_error() {
        let handler = MockHandler::failing();
        let dispatcher = Dispatcher::new(handler.clone());

        let event = WebhookEvent::new("new_data", json!({}));
        let error = dispatcher.dispatch(&event).await.unwrap_err();

        assert_eq!(error.kind, ErrorKind::Dispatch);
        assert_eq!(handler.calls(), 1);
    }
}
