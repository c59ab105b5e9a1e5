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

/// Mock repository serving a fixed set of users
pub struct MockKeycloakRepository {
    pub users: Arc<Mutex<HashMap<String, (User, RoleMapping, Vec<Group>)>>>,
    pub create_calls: Arc<Mutex<usize>>,
    pub fail_with_status: Arc<Mutex<Option<u16>>>,
}

impl MockKeycloakRepository {
    pub fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(HashMap::new())),
            create_calls: Arc::new(Mutex::new(0)),
            fail_with_status: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_user(self, id: &str, user: User, roles: &[&str], groups: &[&str]) -> Self {
        let mut user = user;
        user.id = Some(EntityId::from_string(id.to_string()));

        let mut role_mapping = RoleMapping::new();
        for role in roles {
            role_mapping.add_realm_role(role.to_string());
        }
        let groups = groups
            .iter()
            .map(|name| Group::new(name.to_string(), None))
            .collect();

        self.users
            .lock()
            .unwrap()
            .insert(id.to_string(), (user, role_mapping, groups));
        self
    }

    pub fn fail_with(&self, status: u16) {
        *self.fail_with_status.lock().unwrap() = Some(status);
    }

    pub fn create_calls(&self) -> usize {
        *self.create_calls.lock().unwrap()
    }

    fn check_should_fail(&self) -> DomainResult<()> {
        match *self.fail_with_status.lock().unwrap() {
            Some(status) => Err(DomainError::external(Some(status), "Mock failure enabled")),
            None => Ok(()),
        }
    }

    fn find(
        &self,
        realm: &str,
        user_id: &str,
    ) -> DomainResult<(User, RoleMapping, Vec<Group>)> {
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
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.0)
    }

    async fn find_user_by_username(
        &self,
        _realm: &str,
        username: &str,
    ) -> DomainResult<Option<User>> {
        self.check_should_fail()?;
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .map(|(user, _, _)| user)
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(
        &self,
        realm: &str,
        user: &User,
        _credential: &Credential,
    ) -> DomainResult<EntityId> {
        *self.create_calls.lock().unwrap() += 1;
        self.check_should_fail()?;

        let mut users = self.users.lock().unwrap();
        if users.values().any(|(existing, _, _)| existing.username == user.username) {
            return Err(DomainError::UserAlreadyExists {
                username: user.username.clone(),
                realm: realm.to_string(),
            });
        }

        let id = EntityId::new();
        let mut created = user.clone();
        created.id = Some(id.clone());
        users.insert(id.to_string(), (created, RoleMapping::new(), Vec::new()));
        Ok(id)
    }

    async fn get_user_role_mappings(
        &self,
        realm: &str,
        user_id: &str,
    ) -> DomainResult<RoleMapping> {
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.1)
    }

    async fn get_user_groups(&self, realm: &str, user_id: &str) -> DomainResult<Vec<Group>> {
        self.check_should_fail()?;
        Ok(self.find(realm, user_id)?.2)
    }
}

/// Mock token introspector keyed by raw token
pub struct MockTokenIntrospector {
    pub tokens: HashMap<String, TokenInfo>,
}

impl MockTokenIntrospector {
    pub fn new() -> Self {
        Self {
            tokens: HashMap::new(),
        }
    }

    pub fn with_token(mut self, token: &str, info: TokenInfo) -> Self {
        self.tokens.insert(token.to_string(), info);
        self
    }
}

#[async_trait]
impl TokenIntrospector for MockTokenIntrospector {
    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError> {
        Ok(self
            .tokens
            .get(token)
            .cloned()
            .unwrap_or_else(TokenInfo::inactive))
    }
}
