//! Delivery receipt returned for accepted webhooks.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DispatchOutcome, EventKind};

/// Record of a delivery that was authenticated and dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Unique identifier assigned on arrival.
    pub delivery_id: Uuid,
    /// Resolved event kind.
    pub kind: EventKind,
    /// Raw event tag, if present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Whether a handler accepted the event.
    pub outcome: DispatchOutcome,
    /// Number of dispatch attempts made.
    pub attempts: u32,
    /// When the delivery arrived.
    pub received_at: Timestamp,
    /// When dispatch finished.
    pub completed_at: Timestamp,
}

impl Receipt {
    /// Returns whether a handler accepted the event.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        self.outcome == DispatchOutcome::Handled
    }

    /// Returns whether more than one attempt was needed.
    #[must_use]
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns the time spent between arrival and completion.
    pub fn duration(&self) -> SignedDuration {
        self.completed_at.duration_since(self.received_at)
    }
}
