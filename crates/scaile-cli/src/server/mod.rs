//! HTTP server startup and graceful shutdown.

mod http_server;
mod shutdown;

use std::io;
use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;

use crate::config::ServerConfig;

/// Result type for server operations.
pub type ServerResult<T> = std::result::Result<T, ServerError>;

/// Reasons the server failed to start or stopped abnormally.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid server configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("server terminated: {0}")]
    Runtime(#[source] io::Error),
}

/// Serves `app` on the configured address until SIGINT or SIGTERM.
///
/// # Errors
///
/// Fails when the configuration is rejected, the address cannot be bound,
/// or the accept loop returns an I/O error.
pub async fn serve(app: Router, config: ServerConfig) -> ServerResult<()> {
    http_server::serve_http(app, config).await
}
