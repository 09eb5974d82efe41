//! Core error types for clockhound-core.
//!
//! Background evaluation paths log and swallow their precondition failures,
//! so these types only surface where a caller explicitly asked for a
//! mutation (event insertion, message delivery).

use thiserror::Error;

/// Core error type for clockhound-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors from explicit mutation calls
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Reminder/reply delivery errors
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors for event-style mutations.
///
/// These originate from explicit user action, so they are reported to the
/// caller rather than swallowed.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date string could not be parsed
    #[error("Invalid date '{given}': expected MM/DD/YYYY")]
    InvalidDate { given: String },

    /// Name was missing or empty
    #[error("Invalid name given to {operation}: name must not be empty")]
    EmptyName { operation: &'static str },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the messaging collaborator.
///
/// Delivery is fire-and-forget; trigger paths log these and move on.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// The recipient could not be reached
    #[error("Could not deliver message to '{handle}': {message}")]
    Undeliverable { handle: String, message: String },

    /// The annotation target no longer exists
    #[error("Could not annotate source event: {0}")]
    AnnotationFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
