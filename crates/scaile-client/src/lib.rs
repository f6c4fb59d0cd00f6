#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod annotations;
mod client;
mod config;
mod error;
mod rewards;
mod storage;
mod validate;

#[cfg(test)]
mod test_server;

use std::collections::BTreeMap;

pub use annotations::Annotations;
pub use client::ScaileClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{Error, Result};
pub use rewards::Rewards;
pub use storage::Storage;
pub use validate::validate_fields;

/// Query parameters used to narrow list endpoints.
pub type Filters = BTreeMap<String, String>;

/// Tracing target for API client operations.
pub const TRACING_TARGET: &str = "scaile_client";
