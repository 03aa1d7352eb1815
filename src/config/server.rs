//! Keep-alive listener configuration.

use std::net::SocketAddr;

use serde::Deserialize;

use super::ValidationError;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

/// Keep-alive HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host for the keep-alive listener.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the keep-alive listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

impl ServerConfig {
    /// Returns the socket address to bind.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ValidationError::new("server.host", "not a valid bind address"))
    }

    /// Checks if running in production.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Validates the section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::new("server.port", "must be non-zero"));
        }
        self.socket_addr().map(|_| ())
    }
}
