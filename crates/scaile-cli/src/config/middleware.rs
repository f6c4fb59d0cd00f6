//! Middleware configuration for the HTTP server.
//!
//! The recovery settings are re-exported from `scaile-server` and support
//! both CLI arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! scaile --request-timeout 120
//! ```

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use scaile_server::middleware::RecoveryConfig;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

/// Middleware configuration.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates the request timeout (1-300 seconds).
    pub fn validate(&self) -> AnyhowResult<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > 300 {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. Must be between 1 and 300 seconds."
            ));
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}
