//! Webhook receiver configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::retry::{DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_DELAY};
use crate::{Result, RetryPolicy, WebhookSecret};

/// Webhook receiver configuration.
///
/// # Environment Variables
///
/// - `WEBHOOK_SECRET` - Shared HMAC secret (required, never logged)
/// - `WEBHOOK_MAX_RETRIES` - Attempts per delivery (default: 3)
/// - `WEBHOOK_RETRY_DELAY` - Seconds between attempts (default: 5)
/// - `WEBHOOK_ATTEMPT_TIMEOUT` - Seconds a single attempt may take (default: 30)
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ReceiverConfig {
    /// Shared secret used to verify payload signatures.
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-secret", env = "WEBHOOK_SECRET", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    pub webhook_secret: String,

    /// Maximum number of dispatch attempts per delivery.
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-max-retries", env = "WEBHOOK_MAX_RETRIES", default_value_t = DEFAULT_MAX_ATTEMPTS)
    )]
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Seconds to wait between failed attempts.
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-retry-delay", env = "WEBHOOK_RETRY_DELAY", default_value_t = DEFAULT_RETRY_DELAY.as_secs())
    )]
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,

    /// Seconds a single dispatch attempt may take.
    #[cfg_attr(
        feature = "config",
        arg(long = "webhook-attempt-timeout", env = "WEBHOOK_ATTEMPT_TIMEOUT", default_value_t = DEFAULT_ATTEMPT_TIMEOUT.as_secs())
    )]
    #[serde(default = "default_attempt_timeout")]
    pub attempt_timeout: u64,
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

fn default_retry_delay() -> u64 {
    DEFAULT_RETRY_DELAY.as_secs()
}

fn default_attempt_timeout() -> u64 {
    DEFAULT_ATTEMPT_TIMEOUT.as_secs()
}

impl fmt::Debug for ReceiverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReceiverConfig")
            .field("webhook_secret", &"[REDACTED]")
            .field("max_retries", &self.max_retries)
            .field("retry_delay", &self.retry_delay)
            .field("attempt_timeout", &self.attempt_timeout)
            .finish()
    }
}

impl ReceiverConfig {
    /// Creates a configuration with the given secret and default retry settings.
    pub fn new(webhook_secret: impl Into<String>) -> Self {
        Self {
            webhook_secret: webhook_secret.into(),
            max_retries: default_max_retries(),
            retry_delay: default_retry_delay(),
            attempt_timeout: default_attempt_timeout(),
        }
    }

    /// Sets the maximum number of attempts.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Returns the verified secret.
    pub fn secret(&self) -> Result<WebhookSecret> {
        WebhookSecret::new(&self.webhook_secret)
    }

    /// Returns the retry policy described by this configuration.
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, Duration::from_secs(self.retry_delay))
            .with_attempt_timeout(Duration::from_secs(self.attempt_timeout))
    }

    /// Validates the secret and retry settings.
    pub fn validate(&self) -> Result<()> {
        self.secret()?;
        self.retry_policy().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_defaults() {
        let config = ReceiverConfig::new("secret");
        let policy = config.retry_policy();

        assert_eq!(policy, RetryPolicy::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_secret() {
        let error = ReceiverConfig::new("").validate().unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let error = ReceiverConfig::new("secret")
            .with_max_retries(0)
            .validate()
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Configuration);
    }

    #[test]
    fn test_secret_is_not_exposed() {
        let config = ReceiverConfig::new("very-secret-value");

        assert!(!format!("{config:?}").contains("very-secret-value"));
        assert!(
            !serde_json::to_string(&config)
                .unwrap()
                .contains("very-secret-value")
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ReceiverConfig =
            serde_json::from_str(r#"{"webhook_secret":"secret","retry_delay":1}"#).unwrap();

        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_policy().retry_delay, Duration::from_secs(1));
    }
}
