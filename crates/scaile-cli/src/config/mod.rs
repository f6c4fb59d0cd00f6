//! CLI configuration management.
//!
//! This module defines the complete CLI configuration hierarchy:
//!
//! ```text
//! Cli
//! ├── server: ServerConfig          # Host, port, shutdown
//! ├── middleware: MiddlewareConfig  # Request timeout
//! ├── receiver: ReceiverConfig      # Webhook secret, retry policy
//! └── debug: bool                   # Verbose logging
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! # Configure the secret and port
//! scaile --webhook-secret "s3cr3t" --port 8080
//!
//! # Or via environment variables
//! WEBHOOK_SECRET="s3cr3t" PORT=8080 scaile
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::{Context, bail};
use clap::Parser;
pub use middleware::MiddlewareConfig;
use scaile_webhook::ReceiverConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
///
/// Combines all configuration groups for the webhook server:
/// - [`ServerConfig`]: Network binding and shutdown
/// - [`MiddlewareConfig`]: HTTP middleware (request timeout)
/// - [`ReceiverConfig`]: Signature secret and retry policy
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "scaile")]
#[command(about = "Scaile webhook receiver")]
#[command(version)]
pub struct Cli {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Webhook verification and dispatch configuration.
    #[clap(flatten)]
    pub receiver: ReceiverConfig,

    /// Enables debug logging when `RUST_LOG` is not set.
    #[arg(long, env = "SCAILE_DEBUG")]
    #[serde(default)]
    pub debug: bool,
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    ///
    /// The .env file is loaded before clap parses arguments, so its variables
    /// act as defaults for the `env` fallbacks.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Returns the log filter used when `RUST_LOG` is not set.
    fn default_directive(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.default_directive()));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Validates all configuration values.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.server
            .validate()
            .context("invalid server configuration")?;
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.receiver
            .validate()
            .context("invalid receiver configuration")?;

        let dispatch_budget = self.receiver.retry_policy().max_duration();
        let request_timeout = self.middleware.recovery.request_timeout();
        if dispatch_budget > request_timeout {
            bail!(
                "Request timeout of {}s is shorter than the {}s retry budget; raise \
                 REQUEST_TIMEOUT or lower the webhook retry settings",
                request_timeout.as_secs(),
                dispatch_budget.as_secs()
            );
        }

        Ok(())
    }

    /// Logs configuration (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            "Starting scaile webhook receiver"
        );

        Self::log_build_info();
        self.server.log();
        self.middleware.log();

        let policy = self.receiver.retry_policy();
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            max_attempts = policy.max_attempts,
            retry_delay_secs = policy.retry_delay.as_secs(),
            attempt_timeout_secs = policy.attempt_timeout.as_secs(),
            max_dispatch_secs = policy.max_duration().as_secs(),
            "Receiver configuration"
        );
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
