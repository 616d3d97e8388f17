//! Configuration module for custodia.

use serde::Deserialize;
use std::path::Path;

use crate::{CustodiaError, Result};

/// Web server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origins.
    #[serde(default)]
    pub cors_origins: Vec<String>,
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
            cors_origins: vec![],
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/custodia.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Authentication and token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Signing secret for bearer and approval tokens (must be set).
    #[serde(default)]
    pub jwt_secret: String,
    /// Token lifetime in hours (both purposes).
    #[serde(default = "default_token_expiry_hours")]
    pub token_expiry_hours: u64,
    /// Frontend origin used to build the approval review link.
    #[serde(default = "default_frontend_url")]
    pub frontend_url: String,
    /// Public base URL of this API.
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

fn default_token_expiry_hours() -> u64 {
    24
}

fn default_frontend_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_public_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_hours: default_token_expiry_hours(),
            frontend_url: default_frontend_url(),
            public_url: default_public_url(),
        }
    }
}

/// SMTP mail transport configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
    /// Whether mail delivery is enabled. When disabled a no-op mailer is
    /// used and notification content is only logged.
    #[serde(default = "default_smtp_enabled")]
    pub enabled: bool,
    /// SMTP relay host.
    #[serde(default = "default_smtp_host")]
    pub host: String,
    /// SMTP port (465 = implicit TLS, otherwise STARTTLS when use_tls).
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Account username for relay authentication.
    #[serde(default)]
    pub username: Option<String>,
    /// Account password for relay authentication.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address used in the From header.
    #[serde(default)]
    pub from: String,
    /// Operator mailbox used when no station admin address is resolvable.
    #[serde(default)]
    pub fallback_mailbox: String,
    /// Whether to negotiate TLS with the relay.
    #[serde(default = "default_smtp_use_tls")]
    pub use_tls: bool,
    /// Upper bound on a single send, in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_secs: u64,
}

fn default_smtp_enabled() -> bool {
    false
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_smtp_use_tls() -> bool {
    true
}

fn default_send_timeout() -> u64 {
    10
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            enabled: default_smtp_enabled(),
            host: default_smtp_host(),
            port: default_smtp_port(),
            username: None,
            password: None,
            from: String::new(),
            fallback_mailbox: String::new(),
            use_tls: default_smtp_use_tls(),
            send_timeout_secs: default_send_timeout(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/custodia.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Web server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Authentication configuration.
    #[serde(default)]
    pub auth: AuthConfig,
    /// SMTP configuration.
    #[serde(default)]
    pub smtp: SmtpConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(CustodiaError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| CustodiaError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `CUSTODIA_JWT_SECRET`: override the token signing secret
    /// - `CUSTODIA_SMTP_PASSWORD`: override the SMTP account password
    pub fn apply_env_overrides(&mut self) {
        if let Ok(secret) = std::env::var("CUSTODIA_JWT_SECRET") {
            if !secret.is_empty() {
                self.auth.jwt_secret = secret;
            }
        }
        if let Ok(password) = std::env::var("CUSTODIA_SMTP_PASSWORD") {
            if !password.is_empty() {
                self.smtp.password = Some(password);
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the token signing secret is not set
    /// - mail delivery is enabled but no From address is configured
    /// - a configured base URL does not parse
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.is_empty() {
            return Err(CustodiaError::Config(
                "jwt_secret is not set. \
                 Set it in config.toml or via CUSTODIA_JWT_SECRET environment variable."
                    .to_string(),
            ));
        }
        if self.smtp.enabled && self.smtp.from.is_empty() {
            return Err(CustodiaError::Config(
                "SMTP is enabled but smtp.from is not set".to_string(),
            ));
        }
        // Review links are built from these; refuse to start with broken ones
        url::Url::parse(&self.auth.frontend_url)
            .map_err(|e| CustodiaError::Config(format!("invalid frontend_url: {e}")))?;
        url::Url::parse(&self.auth.public_url)
            .map_err(|e| CustodiaError::Config(format!("invalid public_url: {e}")))?;
        Ok(())
    }
}
