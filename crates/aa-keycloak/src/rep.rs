//! Admin REST wire representations.
//!
//! CamelCase mirrors of the Keycloak Admin API payloads, limited to the
//! fields the façade reads or writes.

use serde::{Deserialize, Serialize};

/// A Keycloak user representation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRepresentation {
    /// Unique identifier (server-assigned).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Username.
    pub username: String,
    /// Whether the account is enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// First name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Credentials to set on creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub credentials: Vec<CredentialRepresentation>,
}

/// A Keycloak credential representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRepresentation {
    /// Credential type.
    #[serde(rename = "type")]
    pub credential_type: String,
    /// Credential value.
    pub value: String,
    /// Whether the credential must be changed on first login.
    pub temporary: bool,
}

impl CredentialRepresentation {
    /// Creates a non-temporary password credential.
    #[must_use]
    pub fn password(value: impl Into<String>) -> Self {
        Self {
            credential_type: "password".to_string(),
            value: value.into(),
            temporary: false,
        }
    }
}

/// A Keycloak role representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRepresentation {
    /// Unique identifier.
    pub id: String,
    /// Role name.
    pub name: String,
    /// Role description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the role is composite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<bool>,
}
