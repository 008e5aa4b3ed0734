//! Router assembly.
//!
//! Combines the API routes with the health probe and the cross-cutting
//! layers (request tracing, CORS).

use axum::{Json, Router, http::HeaderValue, routing::get};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use aa_api::{ApiState, AuthState, TokenValidator, api_router};
use aa_keycloak::KeycloakAdmin;

/// Health probe response.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// GET /health - liveness probe
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "UP" })
}

/// Creates the main application router.
pub fn create_router<A, V>(
    state: ApiState<A>,
    auth: AuthState<V>,
    cors_origins: &[String],
) -> Router
where
    A: KeycloakAdmin + 'static,
    V: TokenValidator + 'static,
{
    let cors = if cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Router::new()
        .route("/health", get(health_check))
        .merge(api_router(state, auth))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
