//! HTTP error returned by handlers and middleware.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::handler::response::ErrorResponse;

/// The error type for HTTP handlers in the server.
///
/// The client only ever sees the fixed body of the [`ErrorKind`]; the
/// optional context is kept for logs.
#[derive(Debug, Clone, Default)]
#[must_use = "errors do nothing unless serialized"]
pub struct Error {
    kind: ErrorKind,
    context: Option<String>,
}

impl Error {
    /// Creates a new [`Error`] with the specified kind.
    #[inline]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Attaches context information to the error.
    #[inline]
    pub fn with_context(self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self
        }
    }

    /// Returns the error kind.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the context if present.
    #[inline]
    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let response = self.kind.response();
        write!(
            f,
            "{} ({}): {}",
            response.name, response.status, response.message
        )?;

        match &self.context {
            Some(context) => write!(f, " - {context}"),
            None => Ok(()),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let response = self.kind.response();
        match self.context {
            Some(context) => response.with_context(context).into_response(),
            None => response.into_response(),
        }
    }
}

impl From<ErrorKind> for Error {
    #[inline]
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

/// A specialized [`Result`] type for HTTP operations.
///
/// [`Result`]: std::result::Result
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Enumeration of all HTTP error kinds the server returns.
#[must_use = "error kinds do nothing unless used to create errors"]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // 4xx Client Errors
    /// 400 Bad Request - Payload is not a JSON object
    BadRequest,
    /// 403 Forbidden - Signature missing or invalid
    Unauthorized,
    /// 404 Not Found - Unknown route
    NotFound,
    /// 405 Method Not Allowed - Known route, wrong method
    MethodNotAllowed,

    // 5xx Server Errors
    /// 500 Internal Server Error - Every dispatch attempt failed
    DispatchFailed,
    /// 500 Internal Server Error - Request exceeded the time limit
    RequestTimeout,
    /// 500 Internal Server Error - Unexpected server error
    #[default]
    InternalServerError,
}

impl ErrorKind {
    /// Returns the HTTP status code for this error kind.
    #[inline]
    pub fn status_code(self) -> StatusCode {
        self.response().status
    }

    /// Returns the response template for this error kind.
    #[inline]
    pub fn response(self) -> ErrorResponse<'static> {
        match self {
            Self::BadRequest => ErrorResponse::BAD_REQUEST,
            Self::Unauthorized => ErrorResponse::UNAUTHORIZED,
            Self::NotFound => ErrorResponse::NOT_FOUND,
            Self::MethodNotAllowed => ErrorResponse::METHOD_NOT_ALLOWED,
            Self::DispatchFailed => ErrorResponse::DISPATCH_FAILED,
            Self::RequestTimeout => ErrorResponse::REQUEST_TIMEOUT,
            Self::InternalServerError => ErrorResponse::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.response().name.as_ref())
    }
}

impl IntoResponse for ErrorKind {
    #[inline]
    fn into_response(self) -> Response {
        self.response().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_http_error() {
        let error = Error::default();
        assert_eq!(error.kind(), ErrorKind::InternalServerError);
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn unauthorized_maps_to_forbidden() {
        let response = ErrorKind::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn context_is_kept_off_the_wire() {
        let error = Error::new(ErrorKind::DispatchFailed).with_context("new_data");
        assert_eq!(error.kind(), ErrorKind::DispatchFailed);
        assert_eq!(error.context(), Some("new_data"));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn std_fmt_display() {
        let error = Error::new(ErrorKind::BadRequest).with_context("expected value at line 1");

        let display = error.to_string();
        assert!(display.contains("bad_request"));
        assert!(display.contains("400"));
        assert!(display.contains("Malformed payload"));
        assert!(display.contains("expected value"));
    }
}
