//! # access-auth
//!
//! Main entry point for the access-auth server.

#![forbid(unsafe_code)]

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use aa_api::{ApiState, AuthState};
use aa_keycloak::KeycloakAdminClient;
use aa_server::{IntrospectionValidator, ServerConfig, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        realm = %config.realm,
        keycloak = %config.keycloak_url,
        "access-auth starting"
    );

    let admin = Arc::new(KeycloakAdminClient::new(config.keycloak())?);
    let validator = Arc::new(IntrospectionValidator::new(Arc::clone(&admin)));

    let app = create_router(
        ApiState::new(admin),
        AuthState::new(validator),
        &config.cors_origins,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
