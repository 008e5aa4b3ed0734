//! The Admin API trait seam.
//!
//! The gateway service is generic over [`KeycloakAdmin`] so tests can
//! substitute an in-memory fake for the live client.

use async_trait::async_trait;

use crate::error::{KeycloakError, KeycloakResult};
use crate::rep::{RoleRepresentation, UserRepresentation};

/// Outcome of a user-creation call, as returned by the provider.
///
/// The create endpoint does not return a body; the new user's identifier is
/// only available through the `Location` header.
#[derive(Debug, Clone)]
pub struct CreatedResponse {
    /// HTTP status of the creation call (typically 201).
    pub status: u16,
    /// `Location` header value, when present.
    pub location: Option<String>,
}

impl CreatedResponse {
    /// Extracts the created identifier from the `Location` header.
    ///
    /// # Errors
    ///
    /// Returns [`KeycloakError::MissingLocation`] when the header is absent
    /// or carries no path segment.
    pub fn created_id(&self) -> KeycloakResult<&str> {
        self.location
            .as_deref()
            .and_then(|loc| loc.rsplit('/').next())
            .filter(|id| !id.is_empty())
            .ok_or(KeycloakError::MissingLocation)
    }
}

/// Realm-scoped Admin API operations consumed by the façade.
///
/// Implementations must be thread-safe; one instance is shared across all
/// requests.
#[async_trait]
pub trait KeycloakAdmin: Send + Sync {
    /// Creates a user in the realm.
    async fn create_user(&self, user: &UserRepresentation) -> KeycloakResult<CreatedResponse>;

    /// Searches users by email.
    ///
    /// With `exact` set, the provider matches the whole address
    /// case-insensitively rather than by substring.
    async fn search_by_email(
        &self,
        email: &str,
        exact: bool,
    ) -> KeycloakResult<Vec<UserRepresentation>>;

    /// Gets a user by id.
    ///
    /// # Errors
    ///
    /// Returns `KeycloakError::Api { status: 404, .. }` when the user does
    /// not exist.
    async fn get_user(&self, id: &str) -> KeycloakResult<UserRepresentation>;

    /// Lists the realm's role catalog.
    async fn list_realm_roles(&self) -> KeycloakResult<Vec<RoleRepresentation>>;

    /// Lists a user's effective realm-level roles (composites expanded),
    /// in provider order.
    async fn list_effective_realm_roles(
        &self,
        user_id: &str,
    ) -> KeycloakResult<Vec<RoleRepresentation>>;

    /// Attaches realm-level role mappings to a user.
    async fn add_realm_role_mappings(
        &self,
        user_id: &str,
        roles: &[RoleRepresentation],
    ) -> KeycloakResult<()>;
}
