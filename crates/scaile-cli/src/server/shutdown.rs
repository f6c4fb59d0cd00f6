//! Termination signals.

use tokio::signal;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Resolves with the name of the first termination signal received.
#[cfg(unix)]
pub async fn shutdown_signal() -> &'static str {
    use tokio::signal::unix::{SignalKind, signal as unix_signal};

    match unix_signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            name = wait_for_ctrl_c() => name,
            _ = sigterm.recv() => "SIGTERM",
        },
        Err(error) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                "SIGTERM unavailable, listening for SIGINT only"
            );
            wait_for_ctrl_c().await
        }
    }
}

/// Resolves with the name of the first termination signal received.
#[cfg(not(unix))]
pub async fn shutdown_signal() -> &'static str {
    wait_for_ctrl_c().await
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(error) = signal::ctrl_c().await {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            "SIGINT unavailable"
        );
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
