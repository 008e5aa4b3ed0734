//! # aa-api
//!
//! HTTP resource layer for the access-auth service.
//!
//! Exposes the façade's JSON surface and translates failures into the
//! structured error envelope.
//!
//! ## Modules
//!
//! - [`auth`] - Bearer-token authentication and role gating
//! - [`dto`] - Response projections
//! - [`error`] - Error taxonomy and HTTP mapping
//! - [`router`] - Axum router and handlers
//! - [`service`] - The user-directory gateway over the admin client
//! - [`state`] - Shared handler state
//! - [`validate`] - Path-parameter validation
//!
//! ## Endpoints
//!
//! | Method | Path | Auth | Description |
//! |--------|------|------|-------------|
//! | POST | `/api/register` | none | Register a user |
//! | GET | `/api/users/{email}` | admin | Find a user by email |
//! | GET | `/api/users/roles/{id}` | admin | Effective realm roles |
//! | GET | `/api/users/is-active/{id}` | admin | Activation status |

#![forbid(unsafe_code)]

pub mod auth;
pub mod dto;
pub mod error;
pub mod router;
pub mod service;
pub mod state;
pub mod validate;

pub use auth::{AuthState, CallerIdentity, StaticTokenValidator, TokenValidator};
pub use dto::{GetRolesResponse, GetUserResponse, IsActiveUserResponse};
pub use error::{ApiError, ApiResult, FieldMessage, StandardError, ValidationError};
pub use router::api_router;
pub use service::UserDirectory;
pub use state::ApiState;
