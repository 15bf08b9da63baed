//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify session tokens
    #[serde(default)]
    pub jwt_secret: String,

    /// Token lifetime in hours
    #[serde(default = "default_token_max_age_hours")]
    pub token_max_age_hours: i64,
}

/// Longest accepted token lifetime (100 years)
pub const MAX_TOKEN_MAX_AGE_HOURS: i64 = 24 * 365 * 100;

fn default_token_max_age_hours() -> i64 {
    24
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_max_age_hours: default_token_max_age_hours(),
        }
    }
}

/// Database connection settings.
///
/// Without a `url` the server falls back to an empty in-memory user store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

impl Config {
    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(Error::Config("auth.jwt_secret must be set".to_string()));
        }

        if self.auth.token_max_age_hours <= 0 {
            return Err(Error::Config(format!(
                "auth.token_max_age_hours must be positive, got {}",
                self.auth.token_max_age_hours
            )));
        }

        if self.auth.token_max_age_hours > MAX_TOKEN_MAX_AGE_HOURS {
            return Err(Error::Config(format!(
                "auth.token_max_age_hours must be at most {}, got {}",
                MAX_TOKEN_MAX_AGE_HOURS, self.auth.token_max_age_hours
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: Config = toml::from_str("[auth]\njwt_secret = \"s3cret\"").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.token_max_age_hours, 24);
        assert!(config.database.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_secret() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }

    #[test]
    fn test_validate_rejects_non_positive_age() {
        let mut config = Config::default();
        config.auth.jwt_secret = "s3cret".to_string();
        config.auth.token_max_age_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_age() {
        let mut config = Config::default();
        config.auth.jwt_secret = "s3cret".to_string();
        config.auth.token_max_age_hours = MAX_TOKEN_MAX_AGE_HOURS;
        assert!(config.validate().is_ok());

        config.auth.token_max_age_hours = MAX_TOKEN_MAX_AGE_HOURS + 1;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at most"));
    }
}
