//! API state.

use std::sync::Arc;

use aa_keycloak::KeycloakAdmin;

use crate::service::UserDirectory;

/// State shared by the API handlers.
///
/// Holds the user-directory gateway over the lifecycle-scoped admin client;
/// handlers stay stateless beyond it.
pub struct ApiState<A: KeycloakAdmin> {
    /// User directory gateway.
    pub directory: UserDirectory<A>,
}

impl<A: KeycloakAdmin> Clone for ApiState<A> {
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
        }
    }
}

impl<A: KeycloakAdmin> ApiState<A> {
    /// Creates API state over the given admin client.
    pub fn new(admin: Arc<A>) -> Self {
        Self {
            directory: UserDirectory::new(admin),
        }
    }
}
