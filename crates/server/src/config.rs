//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//!
//! ## Optional
//! - `SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `SERVER_PORT` - Listen port (default: 3000)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_HOST: IpAddr = IpAddr::V4(std::net::Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 3000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `DATABASE_URL` is unset, or
    /// `ConfigError::InvalidEnvVar` if `SERVER_HOST`/`SERVER_PORT` do not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?.into();

        let host = match std::env::var("SERVER_HOST") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("SERVER_HOST".into(), format!("not an IP address: {raw}"))
            })?,
            Err(_) => DEFAULT_HOST,
        };

        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("SERVER_PORT".into(), format!("not a port number: {raw}"))
            })?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            database_url,
            host,
            port,
        })
    }

    /// Socket address to bind the HTTP listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = ServerConfig {
            database_url: "postgres://localhost/orders".into(),
            host: DEFAULT_HOST,
            port: 8080,
        };
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
