//! Application configuration management
//!
//! This module handles loading and validating configuration from environment
//! variables. All configuration is loaded at startup and validated before
//! the application runs.

use std::env;
use std::sync::LazyLock;

use crate::constants::{
    container_images::DEFAULT_SANDBOX_IMAGE, DEFAULT_MAX_OUTPUT_BYTES, DEFAULT_MEMORY_LIMIT_MB,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_WALL_TIMEOUT_SECONDS,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub sandbox: SandboxConfig,
    pub limits: LimitsConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Sandbox backend configuration: which container daemon and image to use
/// for the single process-bound sandbox.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub docker_socket: String,
    pub image: String,
    pub cpu_quota: f64,
}

/// Default resource limits applied to each case execution, unless a
/// problem overrides them.
#[derive(Debug, Clone)]
pub struct LimitsConfig {
    pub wall_timeout_seconds: u64,
    pub memory_limit_mb: u64,
    pub max_output_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            sandbox: SandboxConfig::from_env()?,
            limits: LimitsConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl SandboxConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            docker_socket: env::var("DOCKER_SOCKET")
                .unwrap_or_else(|_| "/var/run/docker.sock".to_string()),
            image: env::var("SANDBOX_IMAGE")
                .unwrap_or_else(|_| DEFAULT_SANDBOX_IMAGE.to_string()),
            cpu_quota: env::var("SANDBOX_CPU_QUOTA")
                .unwrap_or_else(|_| "1.0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SANDBOX_CPU_QUOTA".to_string()))?,
        })
    }
}

impl LimitsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            wall_timeout_seconds: env::var("WALL_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| DEFAULT_WALL_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("WALL_TIMEOUT_SECONDS".to_string()))?,
            memory_limit_mb: env::var("MEMORY_LIMIT_MB")
                .unwrap_or_else(|_| DEFAULT_MEMORY_LIMIT_MB.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MEMORY_LIMIT_MB".to_string()))?,
            max_output_bytes: env::var("MAX_OUTPUT_BYTES")
                .unwrap_or_else(|_| DEFAULT_MAX_OUTPUT_BYTES.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("MAX_OUTPUT_BYTES".to_string()))?,
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let server = ServerConfig {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
            rust_log: "info".to_string(),
        };
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }
}
