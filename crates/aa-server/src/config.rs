//! Server configuration.
//!
//! Configuration is loaded from environment variables with sensible defaults;
//! only the Keycloak connection settings are required.

use std::time::Duration;

use aa_keycloak::KeycloakConfig;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server host to bind to.
    pub host: String,

    /// Server port.
    pub port: u16,

    /// Keycloak base URL.
    pub keycloak_url: String,

    /// Keycloak realm holding the user directory.
    pub realm: String,

    /// Service-account client id for the Admin API.
    pub client_id: String,

    /// Service-account client secret.
    pub client_secret: String,

    /// Outbound request timeout in seconds.
    pub request_timeout_secs: u64,

    /// CORS allowed origins; empty allows any.
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Fails when a required Keycloak setting is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let host = std::env::var("AA_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("AA_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(8080);

        let keycloak_url = std::env::var("KEYCLOAK_URL")
            .map_err(|_| anyhow::anyhow!("KEYCLOAK_URL environment variable is required"))?;
        let keycloak_url = keycloak_url.trim_end_matches('/').to_string();

        let realm = std::env::var("KEYCLOAK_REALM")
            .map_err(|_| anyhow::anyhow!("KEYCLOAK_REALM environment variable is required"))?;

        let client_id =
            std::env::var("KEYCLOAK_CLIENT_ID").unwrap_or_else(|_| "access-auth".to_string());

        let client_secret = std::env::var("KEYCLOAK_CLIENT_SECRET").map_err(|_| {
            anyhow::anyhow!("KEYCLOAK_CLIENT_SECRET environment variable is required")
        })?;

        let request_timeout_secs = std::env::var("AA_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(30);

        let cors_origins = std::env::var("AA_CORS_ORIGINS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            keycloak_url,
            realm,
            client_id,
            client_secret,
            request_timeout_secs,
            cors_origins,
        })
    }

    /// Socket address to bind.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection settings for the Keycloak admin client.
    #[must_use]
    pub fn keycloak(&self) -> KeycloakConfig {
        KeycloakConfig {
            base_url: self.keycloak_url.clone(),
            realm: self.realm.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }
}
