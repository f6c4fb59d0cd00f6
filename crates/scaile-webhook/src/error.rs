//! Structured error handling for webhook reception.

use std::borrow::Cow;

use strum::{AsRefStr, Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Type alias for boxed dynamic errors that can be sent across threads.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for Results with our custom Error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors that can occur while receiving a webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(AsRefStr, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Signature header missing or not matching the payload.
    Authentication,
    /// Payload is not a JSON object.
    MalformedPayload,
    /// An event handler failed.
    Dispatch,
    /// A dispatch attempt did not finish in time.
    Timeout,
    /// Every dispatch attempt failed.
    DispatchExhausted,
    /// Receiver configuration is invalid.
    Configuration,
    /// Unknown error occurred.
    #[default]
    Unknown,
}

impl ErrorKind {
    /// Check if this error kind is caused by the sender rather than the receiver.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Authentication | Self::MalformedPayload)
    }
}

/// Structured error type with classification and context tracking.
#[must_use]
#[derive(Debug, Error)]
#[error("[{kind}]{}", message.as_ref().map(|m| format!(": {m}")).unwrap_or_default())]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Primary error message.
    pub message: Option<Cow<'static, str>>,
    /// Underlying source error, if any.
    #[source]
    pub source: Option<BoxedError>,
    /// Additional context information.
    pub context: Option<Cow<'static, str>>,
}

impl Error {
    /// Creates a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            source: None,
            context: None,
        }
    }

    /// Creates a new error from a source error.
    pub fn from_source(kind: ErrorKind, source: impl Into<BoxedError>) -> Self {
        Self {
            kind,
            message: None,
            source: Some(source.into()),
            context: None,
        }
    }

    /// Creates an authentication error.
    pub fn authentication() -> Self {
        Self::new(ErrorKind::Authentication)
    }

    /// Creates a malformed payload error.
    pub fn malformed_payload() -> Self {
        Self::new(ErrorKind::MalformedPayload)
    }

    /// Creates a dispatch error, typically returned by event handlers.
    pub fn dispatch() -> Self {
        Self::new(ErrorKind::Dispatch)
    }

    /// Creates a configuration error.
    pub fn configuration() -> Self {
        Self::new(ErrorKind::Configuration)
    }

    /// Adds a message to this error.
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the source of the error.
    pub fn with_source(mut self, source: impl Into<BoxedError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds context to the error.
    pub fn with_context(mut self, context: impl Into<Cow<'static, str>>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Check if this error is caused by the sender based on its kind.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.kind.is_client_error()
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::from_source(ErrorKind::MalformedPayload, error)
            .with_message("Payload is not a valid JSON object")
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(error: tokio::time::error::Elapsed) -> Self {
        Self::from_source(ErrorKind::Timeout, error).with_message("Dispatch attempt timed out")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_error_new() {
        let error = Error::new(ErrorKind::Unknown);
        assert_eq!(error.kind, ErrorKind::Unknown);
        assert!(error.message.is_none());
        assert!(error.source.is_none());
        assert!(error.context.is_none());
    }

    #[test]
    fn test_error_builder_pattern() {
        let error = Error::configuration()
            .with_message("empty secret")
            .with_context("WEBHOOK_SECRET");

        assert_eq!(error.kind, ErrorKind::Configuration);
        assert_eq!(error.message.as_deref(), Some("empty secret"));
        assert_eq!(error.context.as_deref(), Some("WEBHOOK_SECRET"));
    }

    #[test]
    fn test_error_display() {
        let error = Error::new(ErrorKind::DispatchExhausted).with_message("3 attempts");

        let display_str = error.to_string();
        assert!(display_str.contains("dispatch_exhausted"));
        assert!(display_str.contains("3 attempts"));
    }

    #[test]
    fn test_error_from_serde() {
        let serde_error = serde_json::from_slice::<serde_json::Value>(b"{not json").unwrap_err();
        let error = Error::from(serde_error);

        assert_eq!(error.kind, ErrorKind::MalformedPayload);
        assert!(error.source.is_some());
    }

    #[test]
    fn test_client_error() {
        assert!(ErrorKind::Authentication.is_client_error());
        assert!(ErrorKind::MalformedPayload.is_client_error());

        assert!(!ErrorKind::Dispatch.is_client_error());
        assert!(!ErrorKind::Timeout.is_client_error());
        assert!(!ErrorKind::DispatchExhausted.is_client_error());
        assert!(!ErrorKind::Configuration.is_client_error());
        assert!(!ErrorKind::Unknown.is_client_error());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            ErrorKind::from_str("malformed_payload").unwrap(),
            ErrorKind::MalformedPayload
        );
        assert_eq!(ErrorKind::from_str("timeout").unwrap(), ErrorKind::Timeout);
        assert!(ErrorKind::from_str("invalid").is_err());
    }
}
