//! Error types for API client operations.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The API answered with a non-success status.
    #[error("API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Error message reported by the API.
        message: String,
    },
    /// Required fields are absent from a request body.
    #[error("Missing required fields: {}", missing.join(", "))]
    MissingFields {
        /// Names of the absent fields, in the order they were required.
        missing: Vec<String>,
    },
    /// The configured base URL or a derived endpoint is invalid.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Response body is not valid JSON.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A local file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Builds an [`Error::Api`] from a failed response body.
    ///
    /// The message is taken from the `message` field of a JSON object,
    /// `"Unknown error"` for an object without one, or the raw text for
    /// anything else (including JSON arrays, strings and numbers).
    pub(crate) fn api(status: StatusCode, body: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => object
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("Unknown error")
                .to_owned(),
            _ => body.to_owned(),
        };

        Self::Api { status, message }
    }

    /// Returns the HTTP status for API and transport errors that carry one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Reqwest(error) => error.status(),
            _ => None,
        }
    }

    /// Returns whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Reqwest(error) if error.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_from_json_message() {
        let error = Error::api(StatusCode::UNPROCESSABLE_ENTITY, r#"{"message":"bad input"}"#);

        assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
        assert_eq!(
            error.to_string(),
            "API request failed with status 422 Unprocessable Entity: bad input"
        );
    }

    #[test]
    fn test_api_error_from_json_without_message() {
        let error = Error::api(StatusCode::NOT_FOUND, r#"{"detail":"nope"}"#);
        assert!(matches!(error, Error::Api { ref message, .. } if message == "Unknown error"));
    }

    #[test]
    fn test_api_error_from_text() {
        let error = Error::api(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(error, Error::Api { ref message, .. } if message == "upstream down"));
    }

    #[test]
    fn test_api_error_from_non_object_json() {
        for body in [r#"["x"]"#, r#""oops""#, "42"] {
            let error = Error::api(StatusCode::INTERNAL_SERVER_ERROR, body);
            assert!(
                matches!(error, Error::Api { ref message, .. } if message == body),
                "body {body} should be kept verbatim"
            );
        }
    }

    #[test]
    fn test_missing_fields_display() {
        let error = Error::MissingFields {
            missing: vec!["label".into(), "project_id".into()],
        };
        assert_eq!(error.to_string(), "Missing required fields: label, project_id");
    }
}
