//! Receiver error to HTTP error conversion implementation.

use scaile_webhook::{Error as WebhookError, ErrorKind as WebhookErrorKind};

use super::http_error::{Error as HttpError, ErrorKind};
use crate::utility::tracing_targets::TRACING_TARGET_WEBHOOK;

impl From<WebhookError> for HttpError {
    fn from(error: WebhookError) -> Self {
        let context = error.to_string();

        let kind = match error.kind {
            WebhookErrorKind::Authentication => ErrorKind::Unauthorized,
            WebhookErrorKind::MalformedPayload => ErrorKind::BadRequest,
            WebhookErrorKind::DispatchExhausted
            | WebhookErrorKind::Dispatch
            | WebhookErrorKind::Timeout => ErrorKind::DispatchFailed,
            WebhookErrorKind::Configuration | WebhookErrorKind::Unknown => {
                tracing::error!(
                    target: TRACING_TARGET_WEBHOOK,
                    error = %error,
                    error_kind = %error.kind,
                    "Unexpected receiver error"
                );
                ErrorKind::InternalServerError
            }
        };

        HttpError::new(kind).with_context(context)
    }
}
