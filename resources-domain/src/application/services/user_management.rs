use crate::{
    application::ports::*,
    domain::{entities::*, errors::DomainResult},
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// User management service implementing business use cases
pub struct UserManagementService {
    repository: Arc<dyn KeycloakRepository>,
    realm: String,
}

impl UserManagementService {
    pub fn new(repository: Arc<dyn KeycloakRepository>, realm: impl Into<String>) -> Self {
        Self {
            repository,
            realm: realm.into(),
        }
    }

    /// Realm in which users are managed
    pub fn realm(&self) -> &str {
        &self.realm
    }

    /// Create a new user with a permanent password
    #[instrument(skip(self, request), fields(realm = %self.realm, username = %request.username))]
    pub async fn create_user(&self, request: &NewUser) -> DomainResult<EntityId> {
        info!(
            "Creating user '{}' in realm '{}'",
            request.username, self.realm
        );

        let user = request.to_domain_user().inspect_err(|e| {
            warn!("Rejected create request for '{}': {}", request.username, e);
        })?;
        let credential = request.password_credential();

        let user_id = self
            .repository
            .create_user(&self.realm, &user, &credential)
            .await
            .inspect_err(|e| {
                warn!("Failed to create user '{}': {}", request.username, e);
            })?;

        info!(
            "Successfully created user '{}' with ID '{}'",
            request.username, user_id
        );
        Ok(user_id)
    }

    /// Get a user together with its realm role names and group names
    #[instrument(skip(self), fields(realm = %self.realm, user_id = %user_id))]
    pub async fn get_user_by_id(&self, user_id: Uuid) -> DomainResult<UserProfile> {
        let user_id = user_id.to_string();
        info!("Getting user '{}' from realm '{}'", user_id, self.realm);

        let user = self.repository.find_user_by_id(&self.realm, &user_id).await?;
        let role_mapping = self
            .repository
            .get_user_role_mappings(&self.realm, &user_id)
            .await?;
        let groups = self.repository.get_user_groups(&self.realm, &user_id).await?;

        info!(
            "Found user '{}' with {} realm roles and {} groups",
            user.username,
            role_mapping.realm_mappings.len(),
            groups.len()
        );
        Ok(UserProfile::from_parts(user, role_mapping, groups))
    }
}
