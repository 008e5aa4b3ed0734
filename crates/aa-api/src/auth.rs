//! Bearer-token authentication middleware.
//!
//! Admin endpoints require an authenticated caller holding the `admin` realm
//! role. Token validation sits behind the [`TokenValidator`] trait so the
//! server can back it with Keycloak token introspection while tests
//! substitute a static validator.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::{ApiError, ApiResult};

/// Authenticated caller context, injected into request extensions.
#[derive(Debug, Clone)]
pub struct CallerIdentity {
    /// Username bound to the presented token.
    pub username: String,
    /// Realm role names granted to the caller.
    pub roles: Vec<String>,
}

impl CallerIdentity {
    /// Creates a caller identity.
    #[must_use]
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    /// Whether the caller holds the given realm role.
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|granted| granted == role)
    }
}

/// Validates bearer tokens and resolves the caller's identity.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validates a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] for invalid or expired tokens.
    async fn validate(&self, token: &str) -> ApiResult<CallerIdentity>;
}

/// Static in-memory validator mapping fixed tokens to identities.
///
/// Intended for tests; production uses the introspection-backed validator
/// in the server crate.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, CallerIdentity>,
}

impl StaticTokenValidator {
    /// Creates an empty validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a valid token.
    pub fn add_token(&mut self, token: impl Into<String>, identity: CallerIdentity) {
        self.tokens.insert(token.into(), identity);
    }
}

#[async_trait]
impl TokenValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> ApiResult<CallerIdentity> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Shared state for the authentication middleware.
pub struct AuthState<V> {
    /// Token validator implementation.
    pub validator: Arc<V>,
}

impl<V> Clone for AuthState<V> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<V: TokenValidator> AuthState<V> {
    /// Creates a new auth state with the given validator.
    pub fn new(validator: Arc<V>) -> Self {
        Self { validator }
    }
}

/// Middleware validating the `Authorization: Bearer` header and injecting
/// [`CallerIdentity`] into request extensions.
pub async fn auth_middleware<V: TokenValidator + 'static>(
    State(state): State<AuthState<V>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&request) else {
        return ApiError::Unauthorized.into_response();
    };

    match state.validator.validate(&token).await {
        Ok(identity) => {
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// Guard layer requiring a realm role on the authenticated caller.
pub fn require_role(
    role: &'static str,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Clone {
    move |request: Request, next: Next| {
        Box::pin(async move {
            let identity = request.extensions().get::<CallerIdentity>().cloned();

            match identity {
                Some(identity) if identity.has_role(role) => next.run(request).await,
                Some(_) => {
                    ApiError::Forbidden(format!("Missing required role: {role}")).into_response()
                }
                None => ApiError::Unauthorized.into_response(),
            }
        })
    }
}

/// Extracts the bearer token from the request.
fn extract_bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(String::from)
}
