//! Response types for HTTP handlers.

mod error_response;
mod status_response;

pub use error_response::ErrorResponse;
pub use status_response::StatusResponse;
