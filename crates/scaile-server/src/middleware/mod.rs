//! Middleware for `axum::Router` and HTTP request processing.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use scaile_server::middleware::{RecoveryConfig, RouterObservabilityExt, RouterRecoveryExt};
//!
//! let app: Router = Router::new()
//!     .with_metrics()
//!     .with_observability()
//!     .with_recovery(&RecoveryConfig::default());
//! ```

mod observability;
mod recovery;

pub use observability::{RouterObservabilityExt, track_request_metrics};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
