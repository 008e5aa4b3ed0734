//! # aa-server
//!
//! Server binary support for the access-auth service: configuration,
//! router assembly and the introspection-backed token validator.

#![forbid(unsafe_code)]

pub mod config;
pub mod router;
pub mod validator;

pub use config::ServerConfig;
pub use router::create_router;
pub use validator::IntrospectionValidator;
