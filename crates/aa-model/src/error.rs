//! Domain validation error.

use thiserror::Error;

/// A field-scoped validation failure.
///
/// Carries the offending field name alongside the message so the HTTP layer
/// can build a field/message entry in the validation error body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    /// Name of the field that failed validation.
    pub field: &'static str,
    /// Human-readable failure message.
    pub message: String,
}

impl FieldError {
    /// Creates a new field-scoped validation failure.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Result type for domain validation.
pub type ValidationResult<T> = Result<T, FieldError>;
