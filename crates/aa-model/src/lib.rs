//! # aa-model
//!
//! Domain types for the access-auth service.
//!
//! This crate holds the closed role enumeration with its resolver, and the
//! transient registration [`User`] submitted by clients. Nothing here is
//! persisted locally; users and roles live in the external identity provider.

#![forbid(unsafe_code)]

pub mod error;
pub mod role;
pub mod user;

pub use error::FieldError;
pub use role::Role;
pub use user::User;
