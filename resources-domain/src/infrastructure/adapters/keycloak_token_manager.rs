use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use crate::application::ports::auth::*;
use crate::application::ports::config::{AuthConfig, KeycloakConfig};
use crate::domain::errors::*;

/// Keycloak token introspection implementation
pub struct KeycloakTokenManager {
    introspection_url: String,
    client_id: String,
    client_secret: String,
    client: reqwest::Client,
}

impl KeycloakTokenManager {
    pub fn new(keycloak: &KeycloakConfig, auth: &AuthConfig) -> Self {
        Self::new_with_client(keycloak, auth, reqwest::Client::new())
    }

    pub fn new_with_client(
        keycloak: &KeycloakConfig,
        auth: &AuthConfig,
        client: reqwest::Client,
    ) -> Self {
        Self {
            introspection_url: keycloak.get_introspection_url(),
            client_id: auth.client_id.clone(),
            client_secret: auth.client_secret.clone(),
            client,
        }
    }

    /// Convert the raw introspection document into TokenInfo
    fn convert_introspection(introspection: &Value) -> TokenInfo {
        let string_field = |key: &str| {
            introspection
                .get(key)
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        let client_roles = introspection
            .get("resource_access")
            .and_then(|v| v.as_object())
            .map(|clients| {
                clients
                    .iter()
                    .map(|(client_id, access)| (client_id.clone(), role_names(access)))
                    .filter(|(_, roles)| !roles.is_empty())
                    .collect::<HashMap<_, _>>()
            })
            .unwrap_or_default();

        TokenInfo {
            active: introspection
                .get("active")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
            scope: string_field("scope"),
            client_id: string_field("client_id"),
            username: string_field("username"),
            token_type: string_field("token_type"),
            exp: introspection.get("exp").and_then(|v| v.as_i64()),
            iat: introspection.get("iat").and_then(|v| v.as_i64()),
            sub: string_field("sub"),
            iss: string_field("iss"),
            realm_roles: introspection
                .get("realm_access")
                .map(role_names)
                .unwrap_or_default(),
            client_roles,
        }
    }
}

/// Role names from a `{"roles": [..]}` access block
fn role_names(access: &Value) -> Vec<String> {
    access
        .get("roles")
        .and_then(|v| v.as_array())
        .map(|roles| {
            roles
                .iter()
                .filter_map(|r| r.as_str())
                .map(|r| r.to_string())
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TokenIntrospector for KeycloakTokenManager {
    async fn introspect_token(&self, token: &str) -> Result<TokenInfo, AuthError> {
        let response = self
            .client
            .post(&self.introspection_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("token", token), ("token_type_hint", "access_token")])
            .send()
            .await
            .map_err(|e| AuthError::TokenValidationFailed {
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            return Err(AuthError::TokenValidationFailed {
                reason: format!("HTTP error: {}", response.status()),
            });
        }

        let introspection: Value =
            response
                .json()
                .await
                .map_err(|e| AuthError::TokenValidationFailed {
                    reason: format!("Failed to parse response: {}", e),
                })?;

        let info = Self::convert_introspection(&introspection);
        debug!(
            active = info.active,
            realm_roles = info.realm_roles.len(),
            "Token introspected"
        );
        Ok(info)
    }
}
