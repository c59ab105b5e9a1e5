use serde::Serialize;
use thiserror::Error;

/// Name used for the identity provider in error messages
pub const KEYCLOAK_SERVICE: &str = "Keycloak";

/// A single rejected field of an incoming request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Domain-specific errors for user operations against Keycloak
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("User not found: {user_id} in realm {realm}")]
    UserNotFound { user_id: String, realm: String },

    #[error("User already exists: {username} in realm {realm}")]
    UserAlreadyExists { username: String, realm: String },

    #[error("Invalid request: {}", format_violations(.violations))]
    InvalidRequest { violations: Vec<FieldViolation> },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Authorization failed: user {user_id} lacks role {role}")]
    AuthorizationFailed { user_id: String, role: String },

    #[error("Invalid token: {reason}")]
    InvalidToken { reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("External service error: {service} - {message}")]
    ExternalService {
        service: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl DomainError {
    pub fn external(status: Option<u16>, message: impl Into<String>) -> Self {
        DomainError::ExternalService {
            service: KEYCLOAK_SERVICE.to_string(),
            status,
            message: message.into(),
        }
    }

    /// Field violations carried by the error, if any
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            DomainError::InvalidRequest { violations } => violations,
            _ => &[],
        }
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Authentication-specific errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Token is not active")]
    InactiveToken,

    #[error("Token acquisition failed: {reason}")]
    TokenAcquisitionFailed { reason: String },

    #[error("Token validation failed: {reason}")]
    TokenValidationFailed { reason: String },
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => DomainError::AuthenticationFailed {
                reason: "Missing bearer token".to_string(),
            },
            AuthError::InactiveToken => DomainError::InvalidToken {
                reason: "Token is not active".to_string(),
            },
            AuthError::TokenAcquisitionFailed { reason } => {
                DomainError::AuthenticationFailed { reason }
            }
            AuthError::TokenValidationFailed { reason } => DomainError::InvalidToken { reason },
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
        }
    }
}
