//! Role domain model.
//!
//! The service knows a closed set of roles. Each variant carries a fixed
//! singleton alias set used for resolution and a canonical authority string
//! under which the identity provider knows the role.

use crate::error::{FieldError, ValidationResult};

/// A role grantable through registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Administrative role; implies the user grant as well.
    Admin,
    /// Regular user role.
    User,
}

impl Role {
    /// All role variants, in resolution order.
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    /// The fixed alias set accepted for this variant.
    ///
    /// Matching is exact containment: not case-insensitive, not prefix-based.
    #[must_use]
    pub const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &["ADMIN"],
            Self::User => &["USER"],
        }
    }

    /// Canonical authority string as known to the identity provider.
    #[must_use]
    pub const fn authority(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }

    /// Authority strings implied by granting this role.
    ///
    /// Fixed lookup table: `Admin` implies both the admin and user grants.
    #[must_use]
    pub const fn implied_authorities(&self) -> &'static [&'static str] {
        match self {
            Self::Admin => &["admin", "user"],
            Self::User => &["user"],
        }
    }

    /// Resolves a role-identifier string to its variant.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldError`] on the `authority` field naming the
    /// unsupported value when no variant's alias set contains it.
    pub fn resolve(value: &str) -> ValidationResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.aliases().contains(&value))
            .ok_or_else(|| {
                FieldError::new(
                    "authority",
                    format!("Unsupported operation to role {value}"),
                )
            })
    }
}
