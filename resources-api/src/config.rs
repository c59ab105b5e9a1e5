use resources_domain::{
    application::ports::config::AppConfig,
    domain::errors::{ConfigError, DomainResult},
};
use std::net::{IpAddr, SocketAddr};

/// Server configuration layered on top of the domain configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub cors_allow_any: bool,
    pub app: AppConfig,
}

impl Config {
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                message: format!("'{raw}' is not a valid port"),
            })?,
            None => 8080,
        };

        let cors_allow_any: bool = match lookup("CORS_ALLOW_ANY") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "CORS_ALLOW_ANY".to_string(),
                message: format!("'{raw}' is not true or false"),
            })?,
            None => false,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            cors_allow_any,
            app: AppConfig::from_lookup(&lookup)?,
        })
    }

    pub fn socket_addr(&self) -> DomainResult<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| ConfigError::InvalidValue {
            key: "HOST".to_string(),
            message: format!("'{}' is not an IP address", self.host),
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
