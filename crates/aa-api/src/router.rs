//! API router and HTTP handlers.
//!
//! Pure routing: handlers validate path parameters and bodies, then delegate
//! to the [`UserDirectory`](crate::service::UserDirectory) gateway.
//! Registration is open; everything under
//! `/api/users` requires an authenticated caller with the `admin` role.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::set_header::SetResponseHeaderLayer;

use aa_keycloak::KeycloakAdmin;
use aa_model::User;

use crate::auth::{AuthState, TokenValidator, auth_middleware, require_role};
use crate::dto::{GetRolesResponse, GetUserResponse, IsActiveUserResponse};
use crate::error::ApiResult;
use crate::state::ApiState;
use crate::validate;

/// Creates the API router.
pub fn api_router<A, V>(state: ApiState<A>, auth: AuthState<V>) -> Router
where
    A: KeycloakAdmin + 'static,
    V: TokenValidator + 'static,
{
    let no_cache = SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-cache"),
    );

    let users = Router::new()
        .route("/api/users/{email}", get(find_user_by_email::<A>).layer(no_cache))
        .route("/api/users/roles/{id}", get(get_roles::<A>))
        .route("/api/users/is-active/{id}", get(is_active::<A>))
        .layer(middleware::from_fn(require_role("admin")))
        .layer(middleware::from_fn_with_state(auth, auth_middleware::<V>))
        .with_state(state.clone());

    Router::new()
        .route("/api/register", post(register::<A>))
        .with_state(state)
        .merge(users)
}

/// POST /api/register - Register a user
///
/// No authentication required. The response mirrors the provider's creation
/// result: its status plus the `Location` header pointing at the new user.
async fn register<A: KeycloakAdmin>(
    State(state): State<ApiState<A>>,
    Json(user): Json<User>,
) -> ApiResult<Response> {
    tracing::info!("received registration request");

    user.validate()?;

    let created = state.directory.create_user(&user).await?;

    let status = StatusCode::from_u16(created.status).unwrap_or(StatusCode::CREATED);
    let mut response = status.into_response();
    if let Some(location) = created
        .location
        .as_deref()
        .and_then(|loc| header::HeaderValue::from_str(loc).ok())
    {
        response.headers_mut().insert(header::LOCATION, location);
    }

    Ok(response)
}

/// GET /api/users/{email} - Find a user by email
async fn find_user_by_email<A: KeycloakAdmin>(
    State(state): State<ApiState<A>>,
    Path(email): Path<String>,
) -> ApiResult<Json<GetUserResponse>> {
    validate::email_param(&email)?;
    let user = state.directory.find_user_by_email(&email).await?;
    Ok(Json(user))
}

/// GET /api/users/roles/{id} - Effective realm roles for a user
async fn get_roles<A: KeycloakAdmin>(
    State(state): State<ApiState<A>>,
    Path(id): Path<String>,
) -> ApiResult<Json<GetRolesResponse>> {
    validate::user_id_param(&id)?;
    let roles = state.directory.get_roles(&id).await?;
    Ok(Json(roles))
}

/// GET /api/users/is-active/{id} - Activation status for a user
async fn is_active<A: KeycloakAdmin>(
    State(state): State<ApiState<A>>,
    Path(id): Path<String>,
) -> ApiResult<Json<IsActiveUserResponse>> {
    validate::user_id_param(&id)?;
    let active = state.directory.is_active(&id).await?;
    Ok(Json(active))
}
