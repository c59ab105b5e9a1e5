#![allow(dead_code)]

use async_trait::async_trait;
use resources_domain::{
    application::ports::{
        auth::{TokenInfo, TokenIntrospector},
        repository::KeycloakRepository,
    },
    domain::{
        entities::*,
        errors::{AuthError, DomainError, DomainResult},
    },
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// A stored user with the role and group data the fetch path reads
#[derive(Clone)]
pub struct StoredUser {
    pub user: User,
    pub credential: Option<Credential>,
    pub roles: RoleMapping,
    pub groups: Vec<Group>,
}

/// Number of calls made to each repository operation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CallCounts {
    pub find_user_by_id: usize,
    pub find_user_by_username: usize,
    pub create_user: usize,
    pub get_user_role_mappings: usize,
    pub get_user_groups: usize,
}

/// Mock repository implementation for testing
pub struct MockKeycloakRepository {
    pub users: Arc<Mutex<HashMap<String, StoredUser>>>, // id -> user
    pub calls: Arc<Mutex<CallCounts>>,
    pub fail_with_status: Arc<Mutex<Option<u16>>>, // For testing error scenarios
}

impl MockKeycloakRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(CallCounts::default())),
            fail_with_status: Arc::new(Mutex::new(None)),
        }
    }

    /// Seed a user and return its id
    pub fn insert_user(&self, id: &str, user: User, roles: &[&str], groups: &[&str]) {
        let mut user = user;
        user.id = Some(EntityId::from_string(id.to_string()));

        let mut role_mapping = RoleMapping::new();
        for role in roles {
            role_mapping.add_realm_role(role.to_string());
        }

        let stored = StoredUser {
            user,
            credential: None,
            roles: role_mapping,
            groups: groups
                .iter()
                .map(|name| Group::new(name.to_string(), None))
                .collect(),
        };
        self.users.lock().unwrap().insert(id.to_string(), stored);
    }

    /// Make every subsequent call fail as if Keycloak answered with `status`
    pub fn fail_with(&self, status: u16) {
        *self.fail_with_status.lock().unwrap() = Some(status);
    }

    pub fn calls(&self) -> CallCounts {
        self.calls.lock().unwrap().clone()
    }

    pub fn stored(&self, id: &str) -> Option<StoredUser> {
        self.users.lock().unwrap().get(id).cloned()
    }

    fn check_should_fail(&self) -> DomainResult<()> {
        match *self.fail_with_status.lock().unwrap() {
            Some(status) => Err(DomainError::external(
                Some(status),
                "Mock failure enabled",
            )),
            None => Ok(()),
        }
    }

    fn find(&self, realm: &str, user_id: &str) -> DomainResult<StoredUser> {
        self.users
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .ok_or_else(|| DomainError::UserNotFound {
                user_id: user_id.to_string(),
                realm: realm.to_string(),
            })
    }
}

#[async_trait]
impl KeycloakRepository for MockKeycloakRepository {
    async fn find_user_by_id(&self, realm: &str, user_id: &str) -> DomainResult<User> {
        self.calls.lock().unwrap().find_user_by_id += 1;
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.user)
    }

    async fn find_user_by_username(
        &self,
        _realm: &str,
        username: &str,
    ) -> DomainResult<Option<User>> {
        self.calls.lock().unwrap().find_user_by_username += 1;
        self.check_should_fail()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|stored| stored.user.username == username)
            .map(|stored| stored.user.clone()))
    }

    async fn create_user(
        &self,
        realm: &str,
        user: &User,
        credential: &Credential,
    ) -> DomainResult<EntityId> {
        self.calls.lock().unwrap().create_user += 1;
        self.check_should_fail()?;

        let mut users = self.users.lock().unwrap();
        let taken = users.values().any(|stored| {
            stored.user.username == user.username
                || (stored.user.email.is_some() && stored.user.email == user.email)
        });
        if taken {
            return Err(DomainError::UserAlreadyExists {
                username: user.username.clone(),
                realm: realm.to_string(),
            });
        }

        let id = EntityId::new();
        let mut created = user.clone();
        created.id = Some(id.clone());
        users.insert(
            id.to_string(),
            StoredUser {
                user: created,
                credential: Some(credential.clone()),
                roles: RoleMapping::new(),
                groups: Vec::new(),
            },
        );
        Ok(id)
    }

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> DomainResult<RoleMapping> {
        self.calls.lock().unwrap().get_user_role_mappings += 1;
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.roles)
    }

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> DomainResult<Vec<Group>> {
        self.calls.lock().unwrap().get_user_groups += 1;
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.groups)
    }
}

/// Mock token introspector keyed by raw token
pub struct MockTokenIntrospector {
    pub tokens: Arc<Mutex<HashMap<String, TokenInfo>>>,
    pub unreachable: Arc<Mutex<bool>>,
}

impl MockTokenIntrospector {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            unreachable: Arc::new(Mutex::new(false)),
        }
    }

    pub fn with_token(self, token: &str, info: TokenInfo) -> Self {
        self.tokens.lock().unwrap().insert(token.to_string(), info);
        self
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }
}

#[async_trait]
impl TokenIntrospector for MockTokenIntrospector {
    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError> {
        if *self.unreachable.lock().unwrap() {
            return Err(AuthError::TokenValidationFailed {
                reason: "HTTP error: 503 Service Unavailable".to_string(),
            });
        }

        Ok(self
            .tokens
            .lock()
            .unwrap()
            .get(token)
            .cloned()
            .unwrap_or_else(TokenInfo::inactive))
    }
}
