#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod server;

use std::process::ExitCode;

use anyhow::Context;
use axum::Router;
use scaile_server::handler::routes;
use scaile_server::middleware::{RouterObservabilityExt, RouterRecoveryExt};
use scaile_server::service::ServiceState;
use scaile_webhook::LoggingHandler;

use crate::config::{Cli, MiddlewareConfig};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "scaile_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "scaile_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "scaile_cli::config";

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if tracing::enabled!(tracing::Level::ERROR) {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = format!("{error:#}"),
                    "Exiting with error"
                );
            } else {
                eprintln!("scaile: {error:#}");
            }
            ExitCode::FAILURE
        }
    }
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();

    cli.init_tracing();
    cli.log();
    cli.validate()?;

    let state = ServiceState::from_config(&cli.receiver, LoggingHandler)
        .context("failed to create webhook receiver")?;
    let router = create_router(state, &cli.middleware);

    server::serve(router, cli.server).await?;

    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs and tracing spans
/// 3. Metrics - request timing
/// 4. Routes (innermost) - webhook and health handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes()
        .with_state(state)
        .with_metrics()
        .with_observability()
        .with_recovery(&middleware.recovery)
}
