use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::domain::session::store::DEFAULT_REFRESH_TOKEN_TTL_DAYS;

/// Access token lifetime used when none (or a non-positive one) is configured.
pub const DEFAULT_ACCESS_TTL_SECONDS: i64 = 3600;

/// Application configuration for chirpy-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tokens: TokenConfig,
    #[serde(default)]
    pub platform: Platform,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Access and refresh token configuration.
#[derive(Deserialize, Clone)]
pub struct TokenConfig {
    /// HS256 signing key for access tokens
    pub secret: String,
    #[serde(default = "default_access_ttl_seconds")]
    pub access_ttl_seconds: i64,
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: i64,
    /// Interval of the expired refresh token sweep; disabled when absent
    pub purge_interval_seconds: Option<u64>,
}

impl TokenConfig {
    pub fn access_ttl(&self) -> Duration {
        if self.access_ttl_seconds > 0 {
            Duration::seconds(self.access_ttl_seconds)
        } else {
            Duration::seconds(DEFAULT_ACCESS_TTL_SECONDS)
        }
    }

    pub fn refresh_ttl(&self) -> Duration {
        if self.refresh_ttl_days > 0 {
            Duration::days(self.refresh_ttl_days)
        } else {
            Duration::days(DEFAULT_REFRESH_TOKEN_TTL_DAYS)
        }
    }
}

// Keeps the secret out of logs
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .field("purge_interval_seconds", &self.purge_interval_seconds)
            .finish()
    }
}

/// Deployment platform. Destructive admin endpoints only exist on `Dev`.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Dev,
    #[default]
    Production,
}

impl Platform {
    pub fn is_dev(&self) -> bool {
        matches!(self, Platform::Dev)
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_access_ttl_seconds() -> i64 {
    DEFAULT_ACCESS_TTL_SECONDS
}

fn default_refresh_ttl_days() -> i64 {
    DEFAULT_REFRESH_TOKEN_TTL_DAYS
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Environment variables (DATABASE__URL, TOKENS__SECRET, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: TOKENS__SECRET=... overrides tokens.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        configuration.try_deserialize::<Self>()?.validate()
    }

    /// Reject settings that deserialize but cannot run the service.
    ///
    /// # Errors
    /// Returns `ConfigError::Message` if the token secret is empty
    fn validate(self) -> Result<Self, ConfigError> {
        if self.tokens.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "tokens.secret is empty; set TOKENS__SECRET".to_string(),
            ));
        }

        Ok(self)
    }
}
