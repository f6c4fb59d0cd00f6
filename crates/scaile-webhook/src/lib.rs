#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;
mod dispatch;
mod error;
mod event;
mod handler;
mod receipt;
mod receiver;
mod signature;

pub mod retry;

#[cfg(test)]
mod capture;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod mock;

pub use config::ReceiverConfig;
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{BoxedError, Error, ErrorKind, Result};
pub use event::{EventKind, WebhookEvent};
pub use handler::{EventHandler, LoggingHandler};
pub use receipt::Receipt;
pub use receiver::WebhookReceiver;
pub use retry::{Attempted, RetryPolicy, RetryState};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier, WebhookSecret};

/// Tracing target for webhook reception.
pub const TRACING_TARGET: &str = "scaile_webhook::receiver";

/// Tracing target for event dispatch.
pub const TRACING_TARGET_DISPATCH: &str = "scaile_webhook::dispatch";

/// Tracing target for retry decisions.
pub const TRACING_TARGET_RETRY: &str = "scaile_webhook::retry";
