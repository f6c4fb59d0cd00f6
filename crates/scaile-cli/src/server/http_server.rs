//! Listener binding and the serve loop.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::shutdown::shutdown_signal;
use super::{ServerError, ServerResult};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a termination signal.
///
/// Once a signal arrives the listener stops accepting and in-flight
/// deliveries get `SHUTDOWN_TIMEOUT` to finish; anything still running
/// after that is dropped.
pub async fn serve_http(app: Router, config: ServerConfig) -> ServerResult<()> {
    config
        .validate()
        .map_err(|error| ServerError::InvalidConfig(error.to_string()))?;

    let address = config.server_addr();
    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ServerError::Bind { address, source })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %address,
        "Listening for webhook deliveries"
    );
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Bound to every interface; the endpoint is reachable from the network"
        );
    }

    let started = Instant::now();
    let drain_timeout = config.shutdown_timeout();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();

    let graceful = async move {
        let signal = shutdown_signal().await;
        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            signal,
            drain_timeout_secs = drain_timeout.as_secs(),
            "Draining in-flight deliveries"
        );
        let _ = signalled_tx.send(());
    };

    let drain_deadline = async move {
        if signalled_rx.await.is_err() {
            std::future::pending::<()>().await;
        }
        tokio::time::sleep(drain_timeout).await;
    };

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(graceful)
    .into_future();

    let result = tokio::select! {
        result = server => result.map_err(ServerError::Runtime),
        () = drain_deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Drain timeout elapsed, dropping unfinished deliveries"
            );
            Ok(())
        }
    };

    let uptime_secs = started.elapsed().as_secs();
    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs,
            "Server stopped"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            uptime_secs,
            "Server stopped abnormally"
        ),
    }

    result
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn rejects_invalid_config() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };

        let result = serve_http(Router::new(), config).await;
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn reports_address_in_use() {
        let occupied = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await.unwrap();
        let port = occupied.local_addr().unwrap().port();
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            ..ServerConfig::default()
        };

        let result = serve_http(Router::new(), config).await;
        match result {
            Err(ServerError::Bind { address, .. }) => assert_eq!(address.port(), port),
            other => panic!("expected a bind error, got {other:?}"),
        }
    }
}
