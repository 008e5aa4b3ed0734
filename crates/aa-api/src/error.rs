//! API error taxonomy and HTTP mapping.
//!
//! Three failure kinds matter to callers: field-level validation failures
//! (400), resource-not-found (404), and upstream Keycloak failures (the
//! upstream status passed through). All of them render as the structured
//! JSON envelope `{timestamp, status, error, message}`, with validation
//! failures carrying an additional `errors` list of field/message entries.
//! Every body is built once, with its timestamp set at construction and its
//! `status` equal to the response status.

use aa_keycloak::KeycloakError;
use aa_model::FieldError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while serving an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Field-level input failed a business rule.
    #[error("{message}")]
    Validation {
        /// Field that failed validation.
        field: &'static str,
        /// Failure message.
        message: String,
    },

    /// The requested entity does not exist upstream.
    #[error("{0}")]
    NotFound(String),

    /// The Keycloak call itself failed; its status is passed through.
    #[error("{message}")]
    Upstream {
        /// Status returned by the provider, when one exists.
        status: Option<u16>,
        /// Internal rendering of the failure.
        detail: String,
        /// Failure message.
        message: String,
    },

    /// Missing or invalid credentials.
    #[error("Full authentication is required to access this resource")]
    Unauthorized,

    /// Authenticated but lacking the required role.
    #[error("{0}")]
    Forbidden(String),

    /// Internal server error.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => status
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<KeycloakError> for ApiError {
    fn from(err: KeycloakError) -> Self {
        // `detail` carries the client error's debug rendering and ends up in
        // the response's `error` label; DESIGN.md flags the disclosure.
        Self::Upstream {
            status: err.status(),
            detail: format!("{err:?}"),
            message: err.to_string(),
        }
    }
}

/// The universal error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardError {
    /// Moment the error body was built.
    pub timestamp: DateTime<Utc>,
    /// HTTP status, equal to the response status.
    pub status: u16,
    /// Short error label.
    pub error: String,
    /// Failure message, preserved verbatim.
    pub message: String,
}

impl StandardError {
    /// Builds an envelope with the timestamp set to now.
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: error.into(),
            message: message.into(),
        }
    }
}

/// One field/message entry inside a validation error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldMessage {
    /// Field that failed validation.
    pub field: String,
    /// Failure message for that field.
    pub message: String,
}

/// Validation error envelope: [`StandardError`] plus an ordered list of
/// field/message entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    #[serde(flatten)]
    base: StandardError,
    /// Accumulated field errors, in append order.
    pub errors: Vec<FieldMessage>,
}

impl ValidationError {
    /// Builds an envelope with an empty error list.
    #[must_use]
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            base: StandardError::new(status, error, message),
            errors: Vec::new(),
        }
    }

    /// Appends a field/message entry.
    #[must_use]
    pub fn with_error(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(FieldMessage {
            field: field.into(),
            message: message.into(),
        });
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            Self::Validation { field, message } => {
                let body = ValidationError::new(status, "Validation exception", message.clone())
                    .with_error(field, message);
                (status, Json(body)).into_response()
            }
            Self::NotFound(message) => {
                let body = StandardError::new(status, "Resource not found", message);
                (status, Json(body)).into_response()
            }
            Self::Upstream {
                detail, message, ..
            } => {
                let body = StandardError::new(status, detail, message);
                (status, Json(body)).into_response()
            }
            Self::Unauthorized => {
                let body = StandardError::new(
                    status,
                    "Unauthorized",
                    "Full authentication is required to access this resource",
                );
                (status, Json(body)).into_response()
            }
            Self::Forbidden(message) => {
                let body = StandardError::new(status, "Forbidden", message);
                (status, Json(body)).into_response()
            }
            Self::Internal(message) => {
                let body = StandardError::new(status, "Internal server error", message);
                (status, Json(body)).into_response()
            }
        }
    }
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
