//! Listener address and shutdown settings.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use anyhow::{Result as AnyhowResult, ensure};
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::TRACING_TARGET_CONFIG;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_SHUTDOWN_TIMEOUT: u64 = 30;
const MAX_SHUTDOWN_TIMEOUT: u64 = 300;

/// Where the webhook server listens and how long it drains on shutdown.
///
/// ```bash
/// scaile --host 0.0.0.0 --port 8080
/// HOST=0.0.0.0 PORT=8080 scaile
/// ```
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct ServerConfig {
    /// Interface to bind; `0.0.0.0` exposes the endpoint on every interface.
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    #[serde(default = "loopback")]
    pub host: IpAddr,

    /// Listening port, 1024 or above.
    #[arg(short = 'p', long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Seconds in-flight deliveries may keep running after SIGINT/SIGTERM (1-300).
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = DEFAULT_SHUTDOWN_TIMEOUT)]
    pub shutdown_timeout: u64,
}

fn loopback() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

impl ServerConfig {
    /// Rejects privileged ports and out-of-range shutdown timeouts.
    pub fn validate(&self) -> AnyhowResult<()> {
        ensure!(
            self.port >= 1024,
            "port {} is privileged; choose a port between 1024 and 65535",
            self.port
        );
        ensure!(
            (1..=MAX_SHUTDOWN_TIMEOUT).contains(&self.shutdown_timeout),
            "shutdown timeout must be between 1 and {MAX_SHUTDOWN_TIMEOUT} seconds, got {}",
            self.shutdown_timeout
        );
        Ok(())
    }

    #[must_use]
    pub const fn server_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout)
    }

    /// Returns whether the host is the unspecified address.
    #[must_use]
    pub const fn binds_to_all_interfaces(&self) -> bool {
        match self.host {
            IpAddr::V4(addr) => addr.is_unspecified(),
            IpAddr::V6(addr) => addr.is_unspecified(),
        }
    }

    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            host = %self.host,
            port = self.port,
            shutdown_timeout_secs = self.shutdown_timeout,
            loopback_only = self.host.is_loopback(),
            "Server configuration"
        );
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: loopback(),
            port: DEFAULT_PORT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_on_loopback_5000() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.server_addr(),
            SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5000)
        );
        assert!(!config.binds_to_all_interfaces());
    }

    #[test]
    fn rejects_privileged_port() {
        let config = ServerConfig {
            port: 80,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shutdown_timeout_bounds() {
        for (secs, valid) in [(0, false), (1, true), (300, true), (301, false)] {
            let config = ServerConfig {
                shutdown_timeout: secs,
                ..ServerConfig::default()
            };
            assert_eq!(config.validate().is_ok(), valid, "shutdown_timeout = {secs}");
        }
    }

    #[test]
    fn unspecified_host_binds_everywhere() {
        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            ..ServerConfig::default()
        };
        assert!(config.binds_to_all_interfaces());
    }
}
