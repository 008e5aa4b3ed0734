//! Reqwest-backed Keycloak Admin client.
//!
//! One instance is constructed at startup and shared across requests. The
//! service account's admin token is acquired through the client-credentials
//! grant and cached until shortly before expiry; that cache is the only
//! interior mutability in the process.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::LOCATION;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::admin::{CreatedResponse, KeycloakAdmin};
use crate::error::{KeycloakError, KeycloakResult};
use crate::rep::{RoleRepresentation, UserRepresentation};

/// Leeway subtracted from token lifetimes to avoid using a token that
/// expires mid-request.
const TOKEN_EXPIRY_LEEWAY: Duration = Duration::from_secs(10);

/// Connection settings for the Admin REST client.
#[derive(Debug, Clone)]
pub struct KeycloakConfig {
    /// Keycloak base URL, e.g. `http://localhost:8180`.
    pub base_url: String,
    /// Target realm.
    pub realm: String,
    /// Service-account client id.
    pub client_id: String,
    /// Service-account client secret.
    pub client_secret: String,
    /// Request timeout.
    pub timeout: Duration,
}

/// Cached service-account token.
struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// RFC 7662 token introspection response.
#[derive(Debug, Clone, Deserialize)]
pub struct Introspection {
    /// Whether the token is currently valid.
    pub active: bool,
    /// Username bound to the token.
    #[serde(default)]
    pub username: Option<String>,
    /// Realm-level access granted to the token.
    #[serde(default)]
    pub realm_access: Option<RealmAccess>,
}

/// Realm-level role grants inside an introspection response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RealmAccess {
    /// Granted realm role names.
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Introspection {
    /// Granted realm role names, empty when the token carries none.
    #[must_use]
    pub fn roles(&self) -> &[String] {
        self.realm_access
            .as_ref()
            .map(|access| access.roles.as_slice())
            .unwrap_or_default()
    }
}

/// Keycloak Admin REST client.
pub struct KeycloakAdminClient {
    http: reqwest::Client,
    config: KeycloakConfig,
    token: Mutex<Option<CachedToken>>,
}

impl KeycloakAdminClient {
    /// Creates a new client from connection settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be built.
    pub fn new(config: KeycloakConfig) -> KeycloakResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config,
            token: Mutex::new(None),
        })
    }

    fn admin_url(&self, path: &str) -> String {
        format!(
            "{}/admin/realms/{}{}",
            self.config.base_url, self.config.realm, path
        )
    }

    fn realm_url(&self, path: &str) -> String {
        format!("{}/realms/{}{}", self.config.base_url, self.config.realm, path)
    }

    /// Returns a valid admin access token, fetching a fresh one when the
    /// cached token is absent or about to expire.
    async fn admin_token(&self) -> KeycloakResult<String> {
        let mut guard = self.token.lock().await;

        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.access_token.clone());
            }
        }

        tracing::debug!(realm = %self.config.realm, "acquiring admin token");

        let response = self
            .http
            .post(self.realm_url("/protocol/openid-connect/token"))
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(KeycloakError::Token(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        let lifetime = Duration::from_secs(token.expires_in)
            .saturating_sub(TOKEN_EXPIRY_LEEWAY);

        let access_token = token.access_token.clone();
        *guard = Some(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime,
        });

        Ok(access_token)
    }

    /// Introspects a caller's bearer token against the realm.
    ///
    /// # Errors
    ///
    /// Returns an error when the introspection endpoint itself fails; an
    /// invalid token is reported through `Introspection::active`.
    pub async fn introspect(&self, token: &str) -> KeycloakResult<Introspection> {
        let response = self
            .http
            .post(self.realm_url("/protocol/openid-connect/token/introspect"))
            .form(&[
                ("token", token),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await?;

        handle_json(response).await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> KeycloakResult<T> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .get(self.admin_url(path))
            .bearer_auth(token)
            .send()
            .await?;
        handle_json(response).await
    }
}

#[async_trait]
impl KeycloakAdmin for KeycloakAdminClient {
    async fn create_user(&self, user: &UserRepresentation) -> KeycloakResult<CreatedResponse> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .post(self.admin_url("/users"))
            .bearer_auth(token)
            .json(user)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(KeycloakError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(String::from);

        Ok(CreatedResponse {
            status: status.as_u16(),
            location,
        })
    }

    async fn search_by_email(
        &self,
        email: &str,
        exact: bool,
    ) -> KeycloakResult<Vec<UserRepresentation>> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .get(self.admin_url("/users"))
            .query(&[("email", email), ("exact", if exact { "true" } else { "false" })])
            .bearer_auth(token)
            .send()
            .await?;
        handle_json(response).await
    }

    async fn get_user(&self, id: &str) -> KeycloakResult<UserRepresentation> {
        self.get_json(&format!("/users/{id}")).await
    }

    async fn list_realm_roles(&self) -> KeycloakResult<Vec<RoleRepresentation>> {
        self.get_json("/roles").await
    }

    async fn list_effective_realm_roles(
        &self,
        user_id: &str,
    ) -> KeycloakResult<Vec<RoleRepresentation>> {
        self.get_json(&format!("/users/{user_id}/role-mappings/realm/composite"))
            .await
    }

    async fn add_realm_role_mappings(
        &self,
        user_id: &str,
        roles: &[RoleRepresentation],
    ) -> KeycloakResult<()> {
        let token = self.admin_token().await?;
        let response = self
            .http
            .post(self.admin_url(&format!("/users/{user_id}/role-mappings/realm")))
            .bearer_auth(token)
            .json(&roles)
            .send()
            .await?;
        handle_empty(response).await
    }
}

/// Handles a response expected to carry a JSON body.
async fn handle_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> KeycloakResult<T> {
    let status = response.status();

    if status.is_success() {
        response.json().await.map_err(KeycloakError::Http)
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(KeycloakError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Handles a response without a body.
async fn handle_empty(response: reqwest::Response) -> KeycloakResult<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        let message = response.text().await.unwrap_or_default();
        Err(KeycloakError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
