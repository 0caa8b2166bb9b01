//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use blog_core::RetryPolicy;
use blog_infra::{DatabaseConfig, JwtConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` when `DATABASE_URL` is unset; the server then keeps data in memory.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let mut config = DatabaseConfig::new(url);
            config.max_connections = parse_env("DB_MAX_CONNECTIONS", config.max_connections);
            config.min_connections = parse_env("DB_MIN_CONNECTIONS", config.min_connections);
            config
        });

        let retry = RetryPolicy::new(
            parse_env("DB_RETRY_ATTEMPTS", 3),
            Duration::from_millis(parse_env("DB_RETRY_BASE_MS", 50)),
            Duration::from_millis(parse_env("DB_RETRY_MAX_MS", 1000)),
        );

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_env("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            retry,
        }
    }
}

/// Read and parse a variable, falling back to `default` when it is unset or
/// malformed.
fn parse_env<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring malformed environment variable");
            default
        }),
        Err(_) => default,
    }
}
