//! Path-parameter validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ApiError, ApiResult};

/// Accepted shape for user identifiers: a lowercase hyphenated UUID.
pub const UUID_PATTERN: &str =
    "^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

static UUID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(UUID_PATTERN).expect("uuid pattern is valid"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Validates an email path parameter.
///
/// # Errors
///
/// Returns a 400 validation failure on the `email` field.
pub fn email_param(value: &str) -> ApiResult<()> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::Validation {
            field: "email",
            message: "must be a valid email address".to_string(),
        })
    }
}

/// Validates a user-id path parameter against [`UUID_PATTERN`].
///
/// # Errors
///
/// Returns a 400 validation failure on the `id` field.
pub fn user_id_param(value: &str) -> ApiResult<()> {
    if UUID_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::Validation {
            field: "id",
            message: "must be a lowercase hyphenated UUID".to_string(),
        })
    }
}
