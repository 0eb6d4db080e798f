//! Configuration for the Gympoint API service.

use std::time::Duration;

use gympoint_core::{MailConfig, RulesConfig};

/// Gympoint API configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub http_port: u16,
    /// Database URL
    pub database_url: String,
    /// Maximum pooled database connections
    pub db_max_connections: u32,
    /// Apply bundled migrations at startup
    pub run_migrations: bool,
    /// Request timeout
    pub request_timeout: Duration,
    /// Metrics enabled
    pub metrics_enabled: bool,
    /// Mail relay settings; `None` logs notifications instead of sending them
    pub mail: Option<MailConfig>,
    /// Business rules
    pub rules: RulesConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let db_max_connections = parse_or(&lookup, "DB_MAX_CONNECTIONS", 10)?;
        let run_migrations = parse_or(&lookup, "RUN_MIGRATIONS", true)?;

        // Server
        let http_port = parse_or(&lookup, "HTTP_PORT", 3333)?;
        let request_timeout_secs: u64 = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let metrics_enabled = parse_or(&lookup, "METRICS_ENABLED", true)?;

        // Mail relay
        let mail = lookup("MAIL_API_URL").map(|url| {
            let mut mail = MailConfig::new(url);
            if let Some(key) = lookup("MAIL_API_KEY") {
                mail = mail.with_api_key(key);
            }
            if let Some(from) = lookup("MAIL_FROM") {
                mail = mail.with_from(from);
            }
            mail
        });

        // Rules
        let checkin_limit: i64 = parse_or(&lookup, "CHECKIN_WEEKLY_LIMIT", 5)?;
        if checkin_limit < 1 {
            return Err(ConfigError::Invalid("CHECKIN_WEEKLY_LIMIT"));
        }
        let rules = RulesConfig::default().with_checkin_limit(checkin_limit);

        Ok(Self {
            http_port,
            database_url,
            db_max_connections,
            run_migrations,
            request_timeout: Duration::from_secs(request_timeout_secs),
            metrics_enabled,
            mail,
            rules,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
