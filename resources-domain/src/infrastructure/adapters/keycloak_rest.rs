use async_trait::async_trait;
use keycloak::types::*;
use keycloak::{KeycloakAdmin, KeycloakAdminToken, KeycloakError};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::application::ports::config::KeycloakConfig;
use crate::application::ports::repository::*;
use crate::domain::{entities::*, errors::*};

const PASSWORD_GRANT: &str = "password";

/// Keycloak REST API adapter implementing the KeycloakRepository port
pub struct KeycloakRestAdapter {
    admin: RwLock<Arc<KeycloakAdmin>>,
    config: KeycloakConfig,
    reqwest_client: reqwest::Client,
}

impl KeycloakRestAdapter {
    /// Acquire an admin token and build the adapter around it
    pub async fn connect(config: &KeycloakConfig, reqwest_client: reqwest::Client) -> DomainResult<Self> {
        let admin_token = Self::acquire_token(config, &reqwest_client).await?;
        let admin = KeycloakAdmin::new(config.base_url(), admin_token, reqwest_client.clone());

        info!(
            "Connected to Keycloak at '{}' as '{}'",
            config.base_url(),
            config.admin_username
        );
        Ok(Self::new(admin, config.clone(), reqwest_client))
    }

    pub fn new(admin: KeycloakAdmin, config: KeycloakConfig, reqwest_client: reqwest::Client) -> Self {
        Self {
            admin: RwLock::new(Arc::new(admin)),
            config,
            reqwest_client,
        }
    }

    async fn acquire_token(
        config: &KeycloakConfig,
        reqwest_client: &reqwest::Client,
    ) -> DomainResult<KeycloakAdminToken> {
        KeycloakAdminToken::acquire_custom_realm(
            config.base_url(),
            &config.admin_username,
            &config.admin_password,
            &config.admin_realm,
            &config.admin_client_id,
            PASSWORD_GRANT,
            reqwest_client,
        )
        .await
        .map_err(|e| {
            AuthError::TokenAcquisitionFailed {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Replace the admin client with one holding a freshly acquired token
    pub async fn refresh_token(&self) -> DomainResult<()> {
        let admin_token = Self::acquire_token(&self.config, &self.reqwest_client).await?;
        let new_admin = KeycloakAdmin::new(
            self.config.base_url(),
            admin_token,
            self.reqwest_client.clone(),
        );

        *self.admin.write().await = Arc::new(new_admin);
        info!("Refreshed Keycloak admin token");
        Ok(())
    }

    /// Run a call against the admin client, retrying once after a token refresh on 401
    async fn with_admin<T, F, Fut, E>(&self, call: F, translate: E) -> DomainResult<T>
    where
        F: Fn(Arc<KeycloakAdmin>) -> Fut + Send + Sync,
        Fut: Future<Output = Result<T, KeycloakError>> + Send,
        E: FnOnce(KeycloakError) -> DomainError + Send,
        T: Send,
    {
        let admin = self.admin.read().await.clone();
        let result = match call(admin).await {
            Err(KeycloakError::HttpFailure { status: 401, .. }) => {
                warn!("Keycloak rejected the admin token, refreshing");
                self.refresh_token().await.map_err(|e| {
                    DomainError::external(None, format!("Failed to refresh admin token: {e}"))
                })?;
                let admin = self.admin.read().await.clone();
                call(admin).await
            }
            result => result,
        };
        result.map_err(translate)
    }

    fn convert_user_from_keycloak(keycloak_user: UserRepresentation) -> DomainResult<User> {
        let username = keycloak_user
            .username
            .ok_or_else(|| DomainError::Serialization {
                message: "Keycloak user without username".to_string(),
            })?
            .to_string();

        let mut user = User::new(username);
        user.id = keycloak_user.id.map(|id| EntityId::from_string(id.to_string()));
        user.email = keycloak_user.email.map(|e| e.to_string());
        user.email_verified = keycloak_user.email_verified.unwrap_or(false);
        user.first_name = keycloak_user.first_name.map(|f| f.to_string());
        user.last_name = keycloak_user.last_name.map(|l| l.to_string());
        user.enabled = keycloak_user.enabled.unwrap_or(true);
        user.created_timestamp = keycloak_user
            .created_timestamp
            .and_then(chrono::DateTime::from_timestamp_millis);

        Ok(user)
    }

    fn convert_user_to_keycloak(user: &User, credential: &Credential) -> UserRepresentation {
        let mut keycloak_user = UserRepresentation::default();

        keycloak_user.username = Some(user.username.clone().into());
        keycloak_user.email = user.email.as_ref().map(|e| e.clone().into());
        keycloak_user.email_verified = Some(user.email_verified);
        keycloak_user.first_name = user.first_name.as_ref().map(|f| f.clone().into());
        keycloak_user.last_name = user.last_name.as_ref().map(|l| l.clone().into());
        keycloak_user.enabled = Some(user.enabled);
        keycloak_user.credentials = Some(vec![Self::convert_credential_to_keycloak(credential)]);

        keycloak_user
    }

    fn convert_credential_to_keycloak(credential: &Credential) -> CredentialRepresentation {
        let mut keycloak_credential = CredentialRepresentation::default();

        keycloak_credential.type_ = Some(credential.type_.clone().into());
        keycloak_credential.value = credential.value.as_ref().map(|v| v.clone().into());
        keycloak_credential.temporary = credential.temporary;

        keycloak_credential
    }

    fn convert_group_from_keycloak(keycloak_group: GroupRepresentation) -> DomainResult<Group> {
        let name = keycloak_group
            .name
            .ok_or_else(|| DomainError::Serialization {
                message: "Keycloak group without name".to_string(),
            })?
            .to_string();

        let mut group = Group::new(name, keycloak_group.path.map(|p| p.to_string()));
        group.id = keycloak_group.id.map(|id| EntityId::from_string(id.to_string()));
        Ok(group)
    }
}

/// Translate a failed lookup of a known user id; only a 404 means the user is unknown
pub fn translate_lookup_error(err: KeycloakError, realm: &str, user_id: &str, action: &str) -> DomainError {
    match err {
        KeycloakError::HttpFailure { status: 404, .. } => DomainError::UserNotFound {
            user_id: user_id.to_string(),
            realm: realm.to_string(),
        },
        other => upstream_failure(other, action),
    }
}

/// Translate a failed user creation; only a 409 means the username is taken
pub fn translate_create_error(err: KeycloakError, realm: &str, username: &str) -> DomainError {
    match err {
        KeycloakError::HttpFailure { status: 409, .. } => DomainError::UserAlreadyExists {
            username: username.to_string(),
            realm: realm.to_string(),
        },
        other => upstream_failure(other, "create user"),
    }
}

fn upstream_failure(err: KeycloakError, action: &str) -> DomainError {
    match err {
        KeycloakError::HttpFailure { status, text, .. } => {
            DomainError::external(Some(status), format!("Failed to {action}: HTTP {status} {text}"))
        }
        other => DomainError::external(None, format!("Failed to {action}: {other}")),
    }
}

#[async_trait]
impl KeycloakRepository for KeycloakRestAdapter {
    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> DomainResult<User> {
        let keycloak_user = self
            .with_admin(
                |admin| async move { admin.realm_users_with_user_id_get(realm, user_id, None).await },
                |e| translate_lookup_error(e, realm, user_id, "find user by ID"),
            )
            .await?;

        Self::convert_user_from_keycloak(keycloak_user)
    }

    async fn find_user_by_username(
        &self,
        realm: &str,
        username: &str,
    ) -> DomainResult<Option<User>> {
        let users = self
            .with_admin(
                |admin| async move {
                    admin
                        .realm_users_get(
                            realm,
                            None,       // brief_representation
                            None,       // email
                            None,       // email_verified
                            None,       // enabled
                            Some(true), // exact
                            None,       // first
                            None,       // first_name
                            None,       // idp_alias
                            None,       // idp_user_id
                            None,       // last_name
                            None,       // max
                            None,       // q
                            None,       // search
                            Some(username.to_string()),
                        )
                        .await
                },
                |e| upstream_failure(e, "find user by username"),
            )
            .await?;

        users
            .into_iter()
            .next()
            .map(Self::convert_user_from_keycloak)
            .transpose()
    }

    async fn create_user(
        &self,
        realm: &str,
        user: &User,
        credential: &Credential,
    ) -> DomainResult<EntityId> {
        let keycloak_user = Self::convert_user_to_keycloak(user, credential);

        let created_id = self
            .with_admin(
                |admin| {
                    let keycloak_user = keycloak_user.clone();
                    async move { admin.realm_users_post(realm, keycloak_user).await }
                },
                |e| translate_create_error(e, realm, &user.username),
            )
            .await?;

        // The id comes from the Location header; fall back to a lookup by username
        if let Some(user_id) = created_id {
            return Ok(EntityId::from_string(user_id.to_string()));
        }

        debug!("Create response carried no Location header, looking up '{}'", user.username);
        self.find_user_by_username(realm, &user.username)
            .await?
            .and_then(|u| u.id)
            .ok_or_else(|| DomainError::external(None, "User created but could not retrieve ID"))
    }

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> DomainResult<RoleMapping> {
        let mappings = self
            .with_admin(
                |admin| async move {
                    admin.realm_users_with_user_id_role_mappings_get(realm, user_id).await
                },
                |e| translate_lookup_error(e, realm, user_id, "get user role mappings"),
            )
            .await?;

        let mut role_mapping = RoleMapping::new();

        if let Some(realm_mappings) = mappings.realm_mappings {
            for role_name in realm_mappings.into_iter().filter_map(|r| r.name) {
                role_mapping.add_realm_role(role_name.to_string());
            }
        }

        if let Some(client_mappings) = mappings.client_mappings {
            for (client_id, client_role_mappings) in client_mappings.iter() {
                if let Some(mappings) = client_role_mappings.mappings.as_ref() {
                    for role_name in mappings.iter().filter_map(|r| r.name.as_ref()) {
                        role_mapping.add_client_role(client_id.to_string(), role_name.to_string());
                    }
                }
            }
        }

        Ok(role_mapping)
    }

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> DomainResult<Vec<Group>> {
        let keycloak_groups = self
            .with_admin(
                |admin| async move {
                    admin
                        .realm_users_with_user_id_groups_get(realm, user_id, None, None, None, None)
                        .await
                },
                |e| translate_lookup_error(e, realm, user_id, "get user groups"),
            )
            .await?;

        keycloak_groups
            .into_iter()
            .map(Self::convert_group_from_keycloak)
            .collect()
    }
}
