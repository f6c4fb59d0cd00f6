//! Centralized tracing target constants for structured logging.
//!
//! Using consistent targets enables fine-grained control over log output
//! via tracing subscriber filters.

/// Webhook delivery handling and error conversion.
pub const TRACING_TARGET_WEBHOOK: &str = "scaile_server::webhook";

/// Request metrics and performance monitoring.
pub const TRACING_TARGET_METRICS: &str = "scaile_server::metrics";

/// Error recovery including middleware errors and request failures.
pub const TRACING_TARGET_RECOVERY_ERROR: &str = "scaile_server::recovery::error";

/// Panic recovery including handler panics.
pub const TRACING_TARGET_RECOVERY_PANIC: &str = "scaile_server::recovery::panic";
