//! Introspection-backed token validation.

use std::sync::Arc;

use async_trait::async_trait;

use aa_api::{ApiError, ApiResult, CallerIdentity, TokenValidator};
use aa_keycloak::KeycloakAdminClient;

/// Validates caller tokens by introspecting them against the realm.
pub struct IntrospectionValidator {
    client: Arc<KeycloakAdminClient>,
}

impl IntrospectionValidator {
    /// Creates a validator over the shared admin client.
    pub fn new(client: Arc<KeycloakAdminClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TokenValidator for IntrospectionValidator {
    async fn validate(&self, token: &str) -> ApiResult<CallerIdentity> {
        let introspection = self.client.introspect(token).await?;

        if !introspection.active {
            return Err(ApiError::Unauthorized);
        }

        Ok(CallerIdentity::new(
            introspection.username.clone().unwrap_or_default(),
            introspection.roles().to_vec(),
        ))
    }
}
