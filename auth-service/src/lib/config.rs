use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Secrets that must never be used to sign tokens.
pub const PLACEHOLDER_SECRETS: [&str; 4] = ["default", "secret", "changeme", "change-me"];

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub tokens: TokensConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    #[serde(default = "default_environment")]
    pub environment: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_issuer")]
    pub issuer: String,
    #[serde(default = "default_access_token_expiration_minutes")]
    pub access_token_expiration_minutes: i64,
    #[serde(default = "default_refresh_token_expiration_days")]
    pub refresh_token_expiration_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokensConfig {
    /// Seconds between sweeps of expired refresh tokens; 0 disables the sweeper.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

fn default_max_connections() -> u32 {
    5
}

fn default_acquire_timeout_secs() -> u64 {
    5
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_issuer() -> String {
    "PaperTradingApp".to_string()
}

fn default_access_token_expiration_minutes() -> i64 {
    15
}

fn default_refresh_token_expiration_days() -> i64 {
    7
}

fn default_purge_interval_secs() -> u64 {
    3600
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// The loaded configuration is validated before it is returned.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service must not run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl ServerConfig {
    /// Whether the service runs behind HTTPS in production.
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl JwtConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_placeholder_secret(&self.secret) {
            return Err(ConfigError::Message(
                "jwt.secret is not set or is using a placeholder value".to_string(),
            ));
        }
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::Message("jwt.issuer must not be empty".to_string()));
        }
        if self.access_token_expiration_minutes <= 0 {
            return Err(ConfigError::Message(
                "jwt.access_token_expiration_minutes must be positive".to_string(),
            ));
        }
        if self.refresh_token_expiration_days <= 0 {
            return Err(ConfigError::Message(
                "jwt.refresh_token_expiration_days must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn access_token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.access_token_expiration_minutes)
    }

    pub fn refresh_token_lifetime(&self) -> chrono::Duration {
        chrono::Duration::days(self.refresh_token_expiration_days)
    }
}

/// Empty, whitespace-only or well-known placeholder secrets.
pub fn is_placeholder_secret(secret: &str) -> bool {
    let secret = secret.trim();
    secret.is_empty()
        || PLACEHOLDER_SECRETS
            .iter()
            .any(|placeholder| secret.eq_ignore_ascii_case(placeholder))
}
