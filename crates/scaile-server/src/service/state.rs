//! Application state and dependency injection.

use scaile_webhook::{EventHandler, ReceiverConfig, Result, WebhookReceiver};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    receiver: WebhookReceiver,
}

impl ServiceState {
    /// Creates application state around an existing receiver.
    pub fn new(receiver: WebhookReceiver) -> Self {
        Self { receiver }
    }

    /// Initializes application state from configuration.
    ///
    /// Fails when the secret is empty or the retry settings are invalid.
    pub fn from_config<H>(config: &ReceiverConfig, handler: H) -> Result<Self>
    where
        H: EventHandler + 'static,
    {
        let receiver = WebhookReceiver::from_config(config, handler)?;
        Ok(Self::new(receiver))
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(receiver: WebhookReceiver);

#[cfg(test)]
mod tests {
    use axum::extract::FromRef;
    use scaile_webhook::LoggingHandler;

    use super::*;

    #[test]
    fn from_config_shares_receiver() {
        let config = ReceiverConfig::new("secret").with_max_retries(5);
        let state = ServiceState::from_config(&config, LoggingHandler).unwrap();

        let receiver = WebhookReceiver::from_ref(&state);
        assert_eq!(receiver.policy().max_attempts, 5);
    }

    #[test]
    fn from_config_rejects_empty_secret() {
        let config = ReceiverConfig::new("");
        assert!(ServiceState::from_config(&config, LoggingHandler).is_err());
    }
}
