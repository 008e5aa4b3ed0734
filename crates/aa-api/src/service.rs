//! User directory gateway.
//!
//! The boundary object over the Keycloak admin client. Each operation is a
//! synchronous call sequence against the provider; nothing is cached and no
//! state survives the request.

use std::sync::Arc;

use aa_keycloak::{
    CreatedResponse, CredentialRepresentation, KeycloakAdmin, KeycloakError, RoleRepresentation,
    UserRepresentation,
};
use aa_model::User;

use crate::dto::{GetRolesResponse, GetUserResponse, IsActiveUserResponse};
use crate::error::{ApiError, ApiResult};

/// Gateway over the realm's user directory.
pub struct UserDirectory<A> {
    admin: Arc<A>,
}

impl<A> Clone for UserDirectory<A> {
    fn clone(&self) -> Self {
        Self {
            admin: Arc::clone(&self.admin),
        }
    }
}

impl<A: KeycloakAdmin> UserDirectory<A> {
    /// Creates a gateway over the given admin client.
    pub fn new(admin: Arc<A>) -> Self {
        Self { admin }
    }

    /// Registers a user in the realm.
    ///
    /// Resolves the requested role before any upstream call, expands it to
    /// its implied grants, filters the realm's role catalog down to those
    /// authority names, creates the user (enabled, email = username, a
    /// non-temporary password credential), then attaches the filtered role
    /// set at realm level in a second call. The provider's create endpoint
    /// does not accept roles inline, hence the two round trips.
    ///
    /// # Errors
    ///
    /// Validation failure for an unsupported authority; upstream errors
    /// otherwise.
    pub async fn create_user(&self, user: &User) -> ApiResult<CreatedResponse> {
        let role = user.role()?;
        let implied = role.implied_authorities();

        let catalog = self.admin.list_realm_roles().await?;
        let grants: Vec<RoleRepresentation> = catalog
            .into_iter()
            .filter(|rep| implied.contains(&rep.name.as_str()))
            .collect();

        let representation = UserRepresentation {
            id: None,
            username: user.username.clone(),
            enabled: Some(true),
            email: Some(user.username.clone()),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            credentials: vec![CredentialRepresentation::password(&user.password)],
        };

        let created = self.admin.create_user(&representation).await?;
        let user_id = created.created_id()?.to_string();

        self.admin.add_realm_role_mappings(&user_id, &grants).await?;

        tracing::info!(user_id = %user_id, "user created");

        Ok(created)
    }

    /// Finds a user by email.
    ///
    /// Asks the provider for an exact, case-insensitive match, then
    /// re-filters locally requiring the returned email to contain the query
    /// as a literal substring and takes the first survivor. The two
    /// conditions can disagree on casing; the local filter wins and the
    /// lookup reports not-found.
    ///
    /// # Errors
    ///
    /// Not-found when no result qualifies.
    pub async fn find_user_by_email(&self, email: &str) -> ApiResult<GetUserResponse> {
        let results = self.admin.search_by_email(email, true).await?;

        let user = results
            .into_iter()
            .find(|user| {
                user.email
                    .as_deref()
                    .is_some_and(|candidate| candidate.contains(email))
            })
            .ok_or_else(|| ApiError::NotFound("User Not Found".to_string()))?;

        Ok(GetUserResponse::from(user))
    }

    /// Lists a user's effective realm-level role names, in provider order.
    ///
    /// # Errors
    ///
    /// Not-found when the provider reports no such user.
    pub async fn get_roles(&self, id: &str) -> ApiResult<GetRolesResponse> {
        let roles = self
            .admin
            .list_effective_realm_roles(id)
            .await
            .map_err(|err| not_found_for_user(err, id))?;

        let roles = roles.into_iter().map(|rep| rep.name).collect();

        Ok(GetRolesResponse { roles })
    }

    /// Reports whether a user's account is enabled.
    ///
    /// # Errors
    ///
    /// Not-found when the provider reports no such user.
    pub async fn is_active(&self, id: &str) -> ApiResult<IsActiveUserResponse> {
        let user = self
            .admin
            .get_user(id)
            .await
            .map_err(|err| not_found_for_user(err, id))?;

        Ok(IsActiveUserResponse {
            active: user.enabled.unwrap_or(false),
        })
    }
}

/// Translates an upstream 404 into the local not-found kind; anything else
/// propagates as an upstream client failure.
fn not_found_for_user(err: KeycloakError, id: &str) -> ApiError {
    if err.is_not_found() {
        ApiError::NotFound(format!("User not found: {id}"))
    } else {
        ApiError::from(err)
    }
}
