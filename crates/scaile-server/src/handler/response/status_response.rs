use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Plain status body, e.g. `{"status": "success"}`.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Status keyword.
    pub status: Cow<'static, str>,
}

impl StatusResponse {
    /// Body returned for an accepted delivery.
    pub const SUCCESS: Self = Self::new("success");
    /// Body returned by the liveness probe.
    pub const OK: Self = Self::new("ok");

    const fn new(status: &'static str) -> Self {
        Self {
            status: Cow::Borrowed(status),
        }
    }
}
