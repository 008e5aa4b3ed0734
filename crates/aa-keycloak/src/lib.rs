//! # aa-keycloak
//!
//! Keycloak Admin REST client for the access-auth service.
//!
//! The service delegates all identity state to an external Keycloak realm.
//! This crate consumes the handful of Admin API operations the façade needs:
//! create-user, search-by-email, get-user-by-id, list-realm-roles,
//! list-effective-roles-for-user and assign-realm-roles-to-user, plus token
//! acquisition and introspection on the realm's OpenID Connect endpoints.
//!
//! ## Modules
//!
//! - [`admin`] - The [`KeycloakAdmin`] trait seam and creation outcome
//! - [`client`] - Concrete reqwest-backed [`KeycloakAdminClient`]
//! - [`error`] - Typed client errors
//! - [`rep`] - Admin REST wire representations

#![forbid(unsafe_code)]

pub mod admin;
pub mod client;
pub mod error;
pub mod rep;

pub use admin::{CreatedResponse, KeycloakAdmin};
pub use client::{Introspection, KeycloakAdminClient, KeycloakConfig};
pub use error::{KeycloakError, KeycloakResult};
pub use rep::{CredentialRepresentation, RoleRepresentation, UserRepresentation};
