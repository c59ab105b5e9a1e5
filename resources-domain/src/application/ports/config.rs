use crate::domain::errors::{ConfigError, DomainResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Keycloak server configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    pub url: String,
    /// Realm whose users are managed by this service
    pub realm: String,
    pub admin_realm: String,
    pub admin_client_id: String,
    pub admin_username: String,
    pub admin_password: String,
}

impl KeycloakConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.url.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "KEYCLOAK_URL".to_string(),
            }
            .into());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                key: "KEYCLOAK_URL".to_string(),
                message: "Must start with http:// or https://".to_string(),
            }
            .into());
        }

        for (key, value) in [
            ("KEYCLOAK_REALM", &self.realm),
            ("KEYCLOAK_ADMIN_REALM", &self.admin_realm),
            ("KEYCLOAK_ADMIN_CLIENT_ID", &self.admin_client_id),
            ("KEYCLOAK_ADMIN_USERNAME", &self.admin_username),
            ("KEYCLOAK_ADMIN_PASSWORD", &self.admin_password),
        ] {
            if value.is_empty() {
                return Err(ConfigError::MissingRequired {
                    key: key.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    pub fn get_introspection_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token/introspect",
            self.base_url(),
            self.realm
        )
    }
}

impl std::fmt::Debug for KeycloakConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycloakConfig")
            .field("url", &self.url)
            .field("realm", &self.realm)
            .field("admin_realm", &self.admin_realm)
            .field("admin_client_id", &self.admin_client_id)
            .field("admin_username", &self.admin_username)
            .finish_non_exhaustive()
    }
}

/// Bearer-token authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Confidential client allowed to call the introspection endpoint
    pub client_id: String,
    pub client_secret: String,
    /// A request is authorized when the token carries any of these roles
    pub required_roles: Vec<String>,
}

impl AuthConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.client_id.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "AUTH_CLIENT_ID".to_string(),
            }
            .into());
        }

        if self.client_secret.is_empty() {
            return Err(ConfigError::MissingRequired {
                key: "AUTH_CLIENT_SECRET".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("client_id", &self.client_id)
            .field("required_roles", &self.required_roles)
            .finish_non_exhaustive()
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            connect_timeout_seconds: 10,
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    format!("backend-resources/{}", env!("CARGO_PKG_VERSION"))
}

impl HttpConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        if self.connect_timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "HTTP_CONNECT_TIMEOUT_SECONDS".to_string(),
                message: "Must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Build the shared outbound client used for Keycloak calls
    pub fn build_client(&self) -> Result<reqwest::Client, ConfigError> {
        reqwest::Client::builder()
            .timeout(self.get_timeout())
            .connect_timeout(self.get_connect_timeout())
            .user_agent(self.user_agent.clone())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "HTTP".to_string(),
                message: e.to_string(),
            })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
        }
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
    Full,
}

/// Environment-specific configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub keycloak: KeycloakConfig,
    pub auth: AuthConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        self.keycloak.validate()?;
        self.auth.validate()?;
        self.http.validate()?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key).ok_or_else(|| ConfigError::MissingRequired {
                key: key.to_string(),
            })
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let environment = parse_value(&lookup, "ENVIRONMENT", Environment::Development)?;

        let keycloak = KeycloakConfig {
            url: required("KEYCLOAK_URL")?,
            realm: or_default("KEYCLOAK_REALM", "master"),
            admin_realm: or_default("KEYCLOAK_ADMIN_REALM", "master"),
            admin_client_id: or_default("KEYCLOAK_ADMIN_CLIENT_ID", "admin-cli"),
            admin_username: required("KEYCLOAK_ADMIN_USERNAME")?,
            admin_password: required("KEYCLOAK_ADMIN_PASSWORD")?,
        };

        let auth = AuthConfig {
            client_id: required("AUTH_CLIENT_ID")?,
            client_secret: required("AUTH_CLIENT_SECRET")?,
            required_roles: or_default("AUTH_REQUIRED_ROLES", "MODERATOR")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        };

        let http = HttpConfig {
            timeout_seconds: parse_value(&lookup, "HTTP_TIMEOUT_SECONDS", 30)?,
            connect_timeout_seconds: parse_value(&lookup, "HTTP_CONNECT_TIMEOUT_SECONDS", 10)?,
            user_agent: lookup("HTTP_USER_AGENT").unwrap_or_else(default_user_agent),
        };

        let logging = LoggingConfig {
            level: parse_value(&lookup, "LOG_LEVEL", LogLevel::Info)?,
            format: parse_value(&lookup, "LOG_FORMAT", LogFormat::Compact)?,
        };

        let config = AppConfig {
            environment,
            keycloak,
            auth,
            http,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

fn parse_value<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        }),
        None => Ok(default),
    }
}

/// String parsing implementations
impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "full" => Ok(LogFormat::Full),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::DomainError;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("KEYCLOAK_URL", "http://localhost:8080/"),
            ("KEYCLOAK_REALM", "ITM"),
            ("KEYCLOAK_ADMIN_USERNAME", "admin"),
            ("KEYCLOAK_ADMIN_PASSWORD", "admin"),
            ("AUTH_CLIENT_ID", "backend-gateway-client"),
            ("AUTH_CLIENT_SECRET", "secret"),
        ])
    }

    fn load(env: &HashMap<&'static str, &'static str>) -> DomainResult<AppConfig> {
        AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn defaults_are_applied() {
        let config = load(&base_env()).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.keycloak.admin_realm, "master");
        assert_eq!(config.keycloak.admin_client_id, "admin-cli");
        assert_eq!(config.auth.required_roles, vec!["MODERATOR"]);
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn introspection_url_ignores_trailing_slash() {
        let config = load(&base_env()).unwrap();
        assert_eq!(
            config.keycloak.get_introspection_url(),
            "http://localhost:8080/realms/ITM/protocol/openid-connect/token/introspect"
        );
    }

    #[test]
    fn required_roles_are_split_and_trimmed() {
        let mut env = base_env();
        env.insert("AUTH_REQUIRED_ROLES", "MODERATOR, MENTOR,,");
        let config = load(&env).unwrap();
        assert_eq!(config.auth.required_roles, vec!["MODERATOR", "MENTOR"]);
    }

    #[test]
    fn missing_admin_password_is_rejected() {
        let mut env = base_env();
        env.remove("KEYCLOAK_ADMIN_PASSWORD");
        let err = load(&env).unwrap_err();
        assert!(matches!(err, DomainError::Configuration { .. }));
        assert!(err.to_string().contains("KEYCLOAK_ADMIN_PASSWORD"));
    }

    #[test]
    fn non_http_url_is_rejected() {
        let mut env = base_env();
        env.insert("KEYCLOAK_URL", "localhost:8080");
        assert!(load(&env).is_err());
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let mut env = base_env();
        env.insert("HTTP_TIMEOUT_SECONDS", "soon");
        let err = load(&env).unwrap_err();
        assert!(err.to_string().contains("HTTP_TIMEOUT_SECONDS"));
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = load(&base_env()).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret"));
        assert!(!rendered.contains("admin_password"));
    }
}
