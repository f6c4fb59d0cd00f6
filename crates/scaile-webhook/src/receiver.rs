//! Signed webhook receiver.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use uuid::Uuid;

use crate::{
    Dispatcher, Error, EventHandler, Receipt, ReceiverConfig, Result, RetryPolicy,
    SignatureVerifier, TRACING_TARGET, WebhookEvent, WebhookSecret,
};

struct WebhookReceiverInner {
    verifier: SignatureVerifier,
    dispatcher: Dispatcher,
    policy: RetryPolicy,
}

/// Verifies, decodes and dispatches webhook deliveries.
///
/// Processing stops at the first failing stage: an unauthenticated payload
/// is never decoded, and a malformed payload never reaches a handler.
/// Cloning is cheap; all clones share one handler.
#[derive(Clone)]
pub struct WebhookReceiver {
    inner: Arc<WebhookReceiverInner>,
}

impl fmt::Debug for WebhookReceiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookReceiver")
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

impl WebhookReceiver {
    /// Creates a new receiver.
    pub fn new<H>(secret: &WebhookSecret, handler: H, policy: RetryPolicy) -> Result<Self>
    where
        H: EventHandler + 'static,
    {
        policy.validate()?;

        let inner = WebhookReceiverInner {
            verifier: SignatureVerifier::new(secret)?,
            dispatcher: Dispatcher::new(handler),
            policy,
        };

        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new receiver from configuration.
    pub fn from_config<H>(config: &ReceiverConfig, handler: H) -> Result<Self>
    where
        H: EventHandler + 'static,
    {
        config.validate()?;
        Self::new(&config.secret()?, handler, config.retry_policy())
    }

    /// Returns the retry policy.
    pub fn policy(&self) -> &RetryPolicy {
        &self.inner.policy
    }

    /// Returns the signature verifier.
    pub fn verifier(&self) -> &SignatureVerifier {
        &self.inner.verifier
    }

    /// Processes one delivery.
    ///
    /// `body` must be the exact bytes received; `signature` is the value of
    /// the [`SIGNATURE_HEADER`](crate::SIGNATURE_HEADER), if any.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::Authentication`](crate::ErrorKind::Authentication) when
    ///   the signature is missing or wrong.
    /// - [`ErrorKind::MalformedPayload`](crate::ErrorKind::MalformedPayload)
    ///   when the body is not a JSON object.
    /// - [`ErrorKind::DispatchExhausted`](crate::ErrorKind::DispatchExhausted)
    ///   when every attempt failed.
    pub async fn receive(&self, body: &[u8], signature: Option<&str>) -> Result<Receipt> {
        let delivery_id = Uuid::now_v7();
        let received_at = Timestamp::now();

        if !self.inner.verifier.verify(body, signature) {
            tracing::warn!(
                target: TRACING_TARGET,
                delivery_id = %delivery_id,
                has_signature = signature.is_some(),
                body_len = body.len(),
                "Invalid signature"
            );
            return Err(Error::authentication().with_message("Invalid signature"));
        }

        let event = WebhookEvent::from_slice(body).inspect_err(|error| {
            tracing::warn!(
                target: TRACING_TARGET,
                delivery_id = %delivery_id,
                error = %error,
                "Malformed payload"
            );
        })?;

        let kind = event.kind();
        tracing::info!(
            target: TRACING_TARGET,
            delivery_id = %delivery_id,
            event = event.tag(),
            "Received event"
        );

        let dispatcher = &self.inner.dispatcher;
        let attempted = self
            .inner
            .policy
            .run(|_| dispatcher.dispatch(&event))
            .await
            .map_err(|error| {
                tracing::error!(
                    target: TRACING_TARGET,
                    delivery_id = %delivery_id,
                    event = %kind,
                    error = %error,
                    "Failed to process event"
                );
                error.with_context(format!("delivery {delivery_id}"))
            })?;

        let receipt = Receipt {
            delivery_id,
            kind,
            event: event.event.clone(),
            outcome: attempted.value,
            attempts: attempted.attempts,
            received_at,
            completed_at: Timestamp::now(),
        };

        tracing::debug!(
            target: TRACING_TARGET,
            delivery_id = %delivery_id,
            outcome = %receipt.outcome,
            attempts = receipt.attempts,
            "Event processed"
        );

        Ok(receipt)
    }
}
