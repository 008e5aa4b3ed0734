//! Keycloak client error types.

use thiserror::Error;

/// Errors surfaced by the Keycloak Admin REST client.
#[derive(Debug, Error)]
pub enum KeycloakError {
    /// The Admin API returned a non-success status.
    #[error("Keycloak API error: {status} - {message}")]
    Api {
        /// HTTP status code returned by Keycloak.
        status: u16,
        /// Response body text, if any.
        message: String,
    },

    /// Token acquisition failed.
    #[error("token error: {0}")]
    Token(String),

    /// A creation response carried no usable Location header.
    #[error("creation response is missing a Location header")]
    MissingLocation,

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl KeycloakError {
    /// Whether this error is an upstream not-found.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// The upstream HTTP status, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type for Keycloak client operations.
pub type KeycloakResult<T> = Result<T, KeycloakError>;
