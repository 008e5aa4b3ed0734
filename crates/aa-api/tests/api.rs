//! API surface tests.
//!
//! Drives the full router through `tower::ServiceExt::oneshot` with an
//! in-memory admin fake and a static token validator, asserting on the wire
//! contract: statuses, headers and error envelopes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use aa_api::{ApiState, AuthState, CallerIdentity, StaticTokenValidator, api_router};
use aa_keycloak::{
    CreatedResponse, KeycloakAdmin, KeycloakError, KeycloakResult, RoleRepresentation,
    UserRepresentation,
};

const CREATED_ID: &str = "6f1c0b2a-9f51-4a8e-b1d2-3c4d5e6f7a8b";
const ADMIN_TOKEN: &str = "admin-token";
const USER_TOKEN: &str = "user-token";

/// In-memory stand-in for the Keycloak Admin API.
#[derive(Default)]
struct FakeAdmin {
    users: Vec<UserRepresentation>,
    catalog: Vec<RoleRepresentation>,
    effective: Vec<RoleRepresentation>,
    assigned: Mutex<Vec<(String, Vec<String>)>>,
}

fn role(id: &str, name: &str) -> RoleRepresentation {
    RoleRepresentation {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        composite: None,
    }
}

fn upstream_user(id: &str, email: &str, enabled: bool) -> UserRepresentation {
    UserRepresentation {
        id: Some(id.to_string()),
        username: email.to_string(),
        enabled: Some(enabled),
        email: Some(email.to_string()),
        ..Default::default()
    }
}

#[async_trait]
impl KeycloakAdmin for FakeAdmin {
    async fn create_user(&self, _user: &UserRepresentation) -> KeycloakResult<CreatedResponse> {
        Ok(CreatedResponse {
            status: 201,
            location: Some(format!(
                "http://kc:8080/admin/realms/acme/users/{CREATED_ID}"
            )),
        })
    }

    async fn search_by_email(
        &self,
        email: &str,
        _exact: bool,
    ) -> KeycloakResult<Vec<UserRepresentation>> {
        Ok(self
            .users
            .iter()
            .filter(|user| {
                user.email
                    .as_deref()
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(email))
            })
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: &str) -> KeycloakResult<UserRepresentation> {
        self.users
            .iter()
            .find(|user| user.id.as_deref() == Some(id))
            .cloned()
            .ok_or(KeycloakError::Api {
                status: 404,
                message: "User not found".to_string(),
            })
    }

    async fn list_realm_roles(&self) -> KeycloakResult<Vec<RoleRepresentation>> {
        Ok(self.catalog.clone())
    }

    async fn list_effective_realm_roles(
        &self,
        user_id: &str,
    ) -> KeycloakResult<Vec<RoleRepresentation>> {
        if self.users.iter().any(|user| user.id.as_deref() == Some(user_id)) {
            Ok(self.effective.clone())
        } else {
            Err(KeycloakError::Api {
                status: 404,
                message: "User not found".to_string(),
            })
        }
    }

    async fn add_realm_role_mappings(
        &self,
        user_id: &str,
        roles: &[RoleRepresentation],
    ) -> KeycloakResult<()> {
        let names = roles.iter().map(|rep| rep.name.clone()).collect();
        self.assigned
            .lock()
            .unwrap()
            .push((user_id.to_string(), names));
        Ok(())
    }
}

/// Builds a router over the fake, returning the shared fake for assertions.
fn test_router(admin: FakeAdmin) -> (Router, Arc<FakeAdmin>) {
    let admin = Arc::new(admin);

    let mut validator = StaticTokenValidator::new();
    validator.add_token(
        ADMIN_TOKEN,
        CallerIdentity::new("ops", vec!["admin".to_string(), "user".to_string()]),
    );
    validator.add_token(
        USER_TOKEN,
        CallerIdentity::new("ana", vec!["user".to_string()]),
    );

    let router = api_router(
        ApiState::new(Arc::clone(&admin)),
        AuthState::new(Arc::new(validator)),
    );

    (router, admin)
}

fn populated_admin() -> FakeAdmin {
    FakeAdmin {
        users: vec![upstream_user("6f1c0b2a-9f51-4a8e-b1d2-3c4d5e6f7a8b", "ana@example.com", true)],
        catalog: vec![role("r1", "admin"), role("r2", "user"), role("r3", "ops")],
        effective: vec![role("r2", "user"), role("r1", "admin")],
        assigned: Mutex::new(Vec::new()),
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_request(payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

fn registration_payload(authority: &str) -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Sousa",
        "username": "ana@example.com",
        "password": "s3cret-pass",
        "authority": authority,
    })
}

#[tokio::test]
async fn register_mirrors_creation_status_and_location() {
    let (router, admin) = test_router(populated_admin());

    let response = router
        .oneshot(register_request(registration_payload("ADMIN")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap();
    assert!(location.ends_with(CREATED_ID));

    let assigned = admin.assigned.lock().unwrap();
    assert_eq!(assigned.len(), 1);
    assert_eq!(assigned[0].1, ["admin", "user"]);
}

#[tokio::test]
async fn register_with_user_authority_requests_single_grant() {
    let (router, admin) = test_router(populated_admin());

    let response = router
        .oneshot(register_request(registration_payload("USER")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(admin.assigned.lock().unwrap()[0].1, ["user"]);
}

#[tokio::test]
async fn register_with_unknown_role_is_400_with_field_entry() {
    let (router, admin) = test_router(populated_admin());

    let response = router
        .oneshot(register_request(registration_payload("xyz")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["error"], "Validation exception");
    assert!(body["timestamp"].is_string());

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "authority");
    assert_eq!(errors[0]["message"], "Unsupported operation to role xyz");

    assert!(admin.assigned.lock().unwrap().is_empty());
}

#[tokio::test]
async fn register_with_short_password_is_400() {
    let (router, _) = test_router(populated_admin());

    let mut payload = registration_payload("USER");
    payload["password"] = json!("short");

    let response = router.oneshot(register_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn users_endpoints_require_a_token() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/users/ana@example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["status"], 401);
    assert_eq!(body["error"], "Unauthorized");
}

#[tokio::test]
async fn users_endpoints_require_the_admin_role() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token("/api/users/ana@example.com", USER_TOKEN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Forbidden");
    assert_eq!(body["message"], "Missing required role: admin");
}

#[tokio::test]
async fn find_user_by_email_returns_projection_and_no_cache() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token("/api/users/ana@example.com", ADMIN_TOKEN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
        Some("no-cache")
    );

    let body = body_json(response).await;
    assert_eq!(body["id"], CREATED_ID);
    assert_eq!(body["username"], "ana@example.com");
    assert_eq!(body["enabled"], true);
    assert_eq!(body["email"], "ana@example.com");
}

#[tokio::test]
async fn find_unknown_email_is_404_resource_not_found() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token("/api/users/ghost@example.com", ADMIN_TOKEN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["error"], "Resource not found");
    assert_eq!(body["message"], "User Not Found");
}

#[tokio::test]
async fn find_user_rejects_malformed_email() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token("/api/users/not-an-email", ADMIN_TOKEN))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "email");
}

#[tokio::test]
async fn get_roles_preserves_provider_order() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token(
            &format!("/api/users/roles/{CREATED_ID}"),
            ADMIN_TOKEN,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["roles"], json!(["user", "admin"]));
}

#[tokio::test]
async fn get_roles_rejects_uppercase_uuid() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token(
            "/api/users/roles/6F1C0B2A-9F51-4A8E-B1D2-3C4D5E6F7A8B",
            ADMIN_TOKEN,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["errors"][0]["field"], "id");
}

#[tokio::test]
async fn is_active_reports_enabled_flag() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token(
            &format!("/api/users/is-active/{CREATED_ID}"),
            ADMIN_TOKEN,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["active"], true);
}

#[tokio::test]
async fn is_active_for_unknown_user_is_404() {
    let (router, _) = test_router(populated_admin());

    let response = router
        .oneshot(get_with_token(
            "/api/users/is-active/00000000-0000-0000-0000-000000000000",
            ADMIN_TOKEN,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Resource not found");
}

#[tokio::test]
async fn register_is_open_to_unauthenticated_callers() {
    let (router, _) = test_router(populated_admin());

    // No Authorization header at all.
    let response = router
        .oneshot(register_request(registration_payload("USER")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}
