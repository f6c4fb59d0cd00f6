//! Inbound webhook event types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Closed set of event types the receiver knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// New data is available for ingestion.
    NewData,
    /// Previously delivered data was deleted.
    DeleteData,
    /// Unrecognized or missing event tag.
    Unknown,
}

impl EventKind {
    /// Resolves an event tag, falling back to [`EventKind::Unknown`].
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|tag| Self::from_str(tag).ok())
            .unwrap_or(Self::Unknown)
    }
}

/// A decoded webhook event.
///
/// Only the `event` tag is interpreted; `data` is passed to handlers as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event tag, e.g. `new_data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,

    /// Event-specific payload.
    #[serde(default)]
    pub data: Value,
}

impl WebhookEvent {
    /// Creates a new event with the given tag and data.
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: Some(event.into()),
            data,
        }
    }

    /// Decodes an event from raw payload bytes.
    ///
    /// The payload must be a JSON object. A missing or non-string `event`
    /// field is not an error: the event resolves to [`EventKind::Unknown`].
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        let Value::Object(mut object) = serde_json::from_slice::<Value>(payload)? else {
            return Err(Error::malformed_payload().with_message("Payload must be a JSON object"));
        };

        let event = match object.remove("event") {
            Some(Value::String(tag)) => Some(tag),
            _ => None,
        };

        let data = object.remove("data").unwrap_or(Value::Null);

        Ok(Self { event, data })
    }

    /// Returns the kind of this event.
    pub fn kind(&self) -> EventKind {
        EventKind::from_tag(self.event.as_deref())
    }

    /// Returns the raw tag, or `"<missing>"` when absent.
    pub fn tag(&self) -> &str {
        self.event.as_deref().unwrap_or("<missing>")
    }

    /// Serializes this event into a JSON payload.
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            Error::from_source(crate::ErrorKind::Unknown, e).with_message("Failed to encode event")
        })
    }
}
