//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_infra::database::{DatabaseConfig, RetryPolicy};

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_or("PORT", 8080),
            database: database_from_env(),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}

/// Database settings from `DB_*` variables; unset values use the defaults.
fn database_from_env() -> DatabaseConfig {
    let defaults = DatabaseConfig::default();
    let retry = RetryPolicy {
        max_attempts: parse_or("DB_CONNECT_ATTEMPTS", defaults.retry.max_attempts),
        delay: Duration::from_secs(parse_or(
            "DB_CONNECT_DELAY_SECS",
            defaults.retry.delay.as_secs(),
        )),
    };

    DatabaseConfig {
        host: env::var("DB_HOST").unwrap_or(defaults.host),
        port: parse_or("DB_PORT", defaults.port),
        user: env::var("DB_USER").unwrap_or(defaults.user),
        password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
        name: env::var("DB_NAME").unwrap_or(defaults.name),
        max_connections: parse_or("DB_MAX_CONNECTIONS", defaults.max_connections),
        min_connections: parse_or("DB_MIN_CONNECTIONS", defaults.min_connections),
        connect_timeout: Duration::from_secs(parse_or(
            "DB_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout.as_secs(),
        )),
        retry,
    }
}

/// Parse `key` or fall back to `default` when unset or malformed.
fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
