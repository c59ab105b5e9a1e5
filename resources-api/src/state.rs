use resources_domain::{
    application::{
        ports::{auth::TokenIntrospector, config::AppConfig, repository::KeycloakRepository},
        services::{AuthenticationService, UserManagementService},
    },
    domain::errors::DomainResult,
    infrastructure::adapters::{KeycloakRestAdapter, KeycloakTokenManager},
};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserManagementService>,
    pub auth_service: Arc<AuthenticationService>,
}

impl AppState {
    /// Connect to Keycloak and wire the services
    pub async fn new(config: &AppConfig) -> DomainResult<Self> {
        let reqwest_client = config.http.build_client()?;

        let repository = Arc::new(
            KeycloakRestAdapter::connect(&config.keycloak, reqwest_client.clone()).await?,
        );
        let introspector = Arc::new(KeycloakTokenManager::new_with_client(
            &config.keycloak,
            &config.auth,
            reqwest_client,
        ));

        Ok(Self::from_parts(
            repository,
            introspector,
            &config.keycloak.realm,
            config.auth.required_roles.clone(),
        ))
    }

    pub fn from_parts(
        repository: Arc<dyn KeycloakRepository>,
        introspector: Arc<dyn TokenIntrospector>,
        realm: &str,
        required_roles: Vec<String>,
    ) -> Self {
        Self {
            user_service: Arc::new(UserManagementService::new(repository, realm)),
            auth_service: Arc::new(AuthenticationService::new(
                introspector,
                realm,
                required_roles,
            )),
        }
    }
}
