//! API client configuration.

use std::fmt;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

/// Default base URL of the hosted API.
pub const DEFAULT_BASE_URL: &str = "https://api.scaile.com";

/// Default timeout for HTTP requests: 30 seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`ScaileClient`](crate::ScaileClient).
///
/// # Environment Variables
///
/// - `SCAILE_API_KEY` - Bearer token sent with every request (required)
/// - `SCAILE_BASE_URL` - API root (default: `https://api.scaile.com`)
/// - `SCAILE_HTTP_TIMEOUT` - Request timeout in seconds (default: 30)
/// - `SCAILE_USER_AGENT` - User-Agent header override
#[derive(Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct ClientConfig {
    /// API key used as the bearer token.
    #[cfg_attr(
        feature = "config",
        arg(long = "scaile-api-key", env = "SCAILE_API_KEY", hide_env_values = true)
    )]
    #[serde(skip_serializing)]
    pub api_key: String,

    /// Base URL of the API.
    #[cfg_attr(
        feature = "config",
        arg(long = "scaile-base-url", env = "SCAILE_BASE_URL", default_value = DEFAULT_BASE_URL)
    )]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long = "scaile-http-timeout", env = "SCAILE_HTTP_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)
    )]
    #[serde(default = "default_timeout_secs")]
    pub http_timeout: u64,

    /// User-Agent header to send with requests.
    #[cfg_attr(
        feature = "config",
        arg(long = "scaile-user-agent", env = "SCAILE_USER_AGENT")
    )]
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("http_timeout", &self.http_timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for the hosted API with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            http_timeout: default_timeout_secs(),
            user_agent: None,
        }
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.http_timeout = timeout_secs;
        self
    }

    /// Set the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective timeout, using default if zero.
    pub fn effective_timeout(&self) -> Duration {
        if self.http_timeout == 0 {
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        } else {
            Duration::from_secs(self.http_timeout)
        }
    }

    /// Returns the effective user agent, using default if not set.
    pub fn effective_user_agent(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| format!("scaile-client/{}", env!("CARGO_PKG_VERSION")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::new("key");
        assert_eq!(config.base_url, "https://api.scaile.com");
        assert_eq!(config.effective_timeout(), Duration::from_secs(30));
        assert!(config.effective_user_agent().starts_with("scaile-client/"));
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::new("key")
            .with_timeout(5)
            .with_user_agent("custom-agent/1.0");

        assert_eq!(config.effective_timeout(), Duration::from_secs(5));
        assert_eq!(config.effective_user_agent(), "custom-agent/1.0");
    }

    #[test]
    fn test_effective_timeout_uses_default_when_zero() {
        let config = ClientConfig::new("key").with_timeout(0);
        assert_eq!(
            config.effective_timeout(),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
    }

    #[test]
    fn test_api_key_is_not_exposed() {
        let config = ClientConfig::new("sk-live-123");
        assert!(!format!("{config:?}").contains("sk-live-123"));
        assert!(!serde_json::to_string(&config).unwrap().contains("sk-live-123"));
    }
}
