//! Server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `galen-server` starts a working local instance.

use std::env;
use std::path::PathBuf;

/// Galen server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Path of the JSON snapshot file
    pub data_path: PathBuf,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            http_port: env::var("GALEN_HTTP_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("GALEN_HTTP_PORT".to_string()))?,

            data_path: env::var("GALEN_DATA_PATH")
                .unwrap_or_else(|_| "galen_data.json".to_string())
                .into(),
        };

        Ok(config)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Only exercised when the variables are unset, which is the
        // normal test environment.
        if env::var("GALEN_HTTP_PORT").is_err() && env::var("GALEN_DATA_PATH").is_err() {
            let config = ServerConfig::load().unwrap();
            assert_eq!(config.http_port, 3000);
            assert_eq!(config.data_path, PathBuf::from("galen_data.json"));
        }
    }
}
