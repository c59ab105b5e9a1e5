use crate::domain::{entities::*, errors::DomainResult};
use async_trait::async_trait;

/// Repository port for the Keycloak user operations this service needs
#[async_trait]
pub trait KeycloakRepository: Send + Sync {
    // User operations
    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> DomainResult<User>;
    async fn find_user_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> DomainResult<Option<User>>;

    /// Create a user together with its initial credential in a single call
    async fn create_user(
        &self,
        realm: &str,
        user: &User,
        credential: &Credential,
    ) -> DomainResult<EntityId>;

    // Role mapping operations
    async fn get_user_role_mappings(&self, realm: &str, user_id: &str)
        -> DomainResult<RoleMapping>;

    // User-Group operations
    async fn get_user_groups(&self, realm: &str, user_id: &str) -> DomainResult<Vec<Group>>;
}
