use crate::{
    application::ports::*,
    domain::errors::{AuthError, DomainError, DomainResult},
};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Authentication service validating bearer tokens and required roles
pub struct AuthenticationService {
    introspector: Arc<dyn TokenIntrospector>,
    realm: String,
    required_roles: Vec<String>,
}

impl AuthenticationService {
    pub fn new(
        introspector: Arc<dyn TokenIntrospector>,
        realm: impl Into<String>,
        required_roles: Vec<String>,
    ) -> Self {
        Self {
            introspector,
            realm: realm.into(),
            required_roles,
        }
    }

    /// Create authorization context from a bearer token
    #[instrument(skip(self, token), fields(realm = %self.realm))]
    pub async fn authenticate(&self, token: &str) -> DomainResult<AuthorizationContext> {
        if token.trim().is_empty() {
            warn!("Rejected request without bearer token");
            return Err(AuthError::MissingToken.into());
        }

        let info = match self.introspector.introspect_token(token).await {
            Ok(info) => info,
            Err(auth_error) => {
                error!(
                    "Token introspection failed for realm '{}': {}",
                    self.realm, auth_error
                );
                return Err(DomainError::from(auth_error));
            }
        };

        if !info.active {
            warn!("Rejected inactive token for realm '{}'", self.realm);
            return Err(AuthError::InactiveToken.into());
        }

        let context = AuthorizationContext::from_token_info(self.realm.clone(), info);
        info!(
            "Authenticated principal '{}' in realm '{}'",
            context.principal_name(),
            self.realm
        );
        Ok(context)
    }

    /// Require any of the configured roles
    pub fn authorize(&self, context: &AuthorizationContext) -> DomainResult<()> {
        if self.required_roles.is_empty() || context.has_any_role(&self.required_roles) {
            return Ok(());
        }

        warn!(
            "Principal '{}' lacks any of the roles {:?}",
            context.principal_name(),
            self.required_roles
        );
        Err(DomainError::AuthorizationFailed {
            user_id: context.principal_name().to_string(),
            role: self.required_roles.join(" or "),
        })
    }
}
