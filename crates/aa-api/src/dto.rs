//! Response projections.
//!
//! Read-only shapes built fresh per request from upstream data; they have no
//! lifecycle of their own.

use aa_keycloak::UserRepresentation;
use serde::{Deserialize, Serialize};

/// Projection of an upstream user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUserResponse {
    /// Provider-assigned identifier.
    pub id: Option<String>,
    /// Username.
    pub username: String,
    /// Whether the account is enabled.
    pub enabled: Option<bool>,
    /// Email address.
    pub email: Option<String>,
}

impl From<UserRepresentation> for GetUserResponse {
    fn from(user: UserRepresentation) -> Self {
        Self {
            id: user.id,
            username: user.username,
            enabled: user.enabled,
            email: user.email,
        }
    }
}

/// Effective realm-level role names for a user, in provider order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetRolesResponse {
    /// Role names.
    pub roles: Vec<String>,
}

/// Activation status of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsActiveUserResponse {
    /// The provider's `enabled` flag.
    pub active: bool,
}
