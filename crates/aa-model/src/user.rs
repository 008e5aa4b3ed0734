//! Transient registration user.
//!
//! Submitted by clients on `POST /api/register` and handed straight to the
//! identity provider; it only lives for the duration of one request.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FieldError, ValidationResult};
use crate::role::Role;

/// Accepted character set for free-text fields (Latin letters with
/// Portuguese diacritics plus a small set of punctuation).
pub const DEFAULT_PATTERN: &str =
    r"^[\w_áàâãéèêíïóôõöúçñÁÀÂÃÉÈÍÏÓÔÕÖÚÇÑ:/ @#?!,.\-+]*$";

static DEFAULT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_PATTERN).expect("default pattern is valid")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// A user registration request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// First name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Username; must be the user's email address.
    pub username: String,
    /// Initial password.
    pub password: String,
    /// Requested role identifier (e.g. `ADMIN`, `USER`).
    pub authority: String,
}

impl User {
    /// Resolves the requested authority string to a [`Role`].
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] on `authority` for unsupported values.
    pub fn role(&self) -> ValidationResult<Role> {
        Role::resolve(&self.authority)
    }

    /// Validates all client-submitted fields.
    ///
    /// # Errors
    ///
    /// Returns the first [`FieldError`] encountered, in declaration order.
    pub fn validate(&self) -> ValidationResult<()> {
        check_pattern("firstName", self.first_name.as_deref().unwrap_or(""))?;
        check_pattern("lastName", self.last_name.as_deref().unwrap_or(""))?;

        if self.username.trim().is_empty() {
            return Err(FieldError::new("username", "must not be blank"));
        }
        if !EMAIL_RE.is_match(&self.username) {
            return Err(FieldError::new("username", "must be a valid email address"));
        }
        check_pattern("username", &self.username)?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(FieldError::new(
                "password",
                format!("must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        check_pattern("password", &self.password)?;
        check_pattern("authority", &self.authority)?;

        Ok(())
    }
}

fn check_pattern(field: &'static str, value: &str) -> ValidationResult<()> {
    if DEFAULT_RE.is_match(value) {
        Ok(())
    } else {
        Err(FieldError::new(field, "contains unsupported characters"))
    }
}
