use crate::domain::errors::AuthError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Token introspection information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenInfo {
    pub active: bool,
    pub scope: Option<String>,
    pub client_id: Option<String>,
    pub username: Option<String>,
    pub token_type: Option<String>,
    pub exp: Option<i64>,
    pub iat: Option<i64>,
    pub sub: Option<String>,
    pub iss: Option<String>,
    pub realm_roles: Vec<String>,
    pub client_roles: HashMap<String, Vec<String>>,
}

impl TokenInfo {
    /// An active token for `username` carrying the given realm roles
    pub fn active(username: impl Into<String>, realm_roles: Vec<String>) -> Self {
        Self {
            active: true,
            username: Some(username.into()),
            realm_roles,
            ..Self::default()
        }
    }

    pub fn inactive() -> Self {
        Self::default()
    }
}

/// Token introspection port
#[async_trait]
pub trait TokenIntrospector: Send + Sync {
    /// Get token info/introspection
    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError>;
}

/// The authenticated principal of a request
#[derive(Debug, Clone)]
pub struct AuthorizationContext {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub realm: String,
    pub roles: Vec<String>,
}

impl AuthorizationContext {
    /// Build a context from an active introspection result.
    ///
    /// Client roles are kept as `client:role` next to the plain realm roles.
    pub fn from_token_info(realm: String, info: TokenInfo) -> Self {
        let mut roles = info.realm_roles;
        for (client_id, client_roles) in info.client_roles {
            roles.extend(
                client_roles
                    .into_iter()
                    .map(|role| format!("{client_id}:{role}")),
            );
        }

        Self {
            user_id: info.sub,
            username: info.username,
            realm,
            roles,
        }
    }

    /// Name of the principal: the username, else the subject id
    pub fn principal_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.user_id.as_deref())
            .unwrap_or_default()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn has_any_role(&self, roles: &[String]) -> bool {
        roles.iter().any(|role| self.has_role(role))
    }
}
