// Application configuration
// Values come from the environment (optionally a .env file) with local defaults

use std::str::FromStr;

const DEFAULT_DATABASE_URL: &str = "sqlite://member_query.db?mode=rwc";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime settings for the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite connection URL (`DATABASE_URL`)
    pub database_url: String,
    /// HTTP listen port (`SERVER_PORT`)
    pub port: u16,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`)
    pub max_connections: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            port: DEFAULT_PORT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl AppConfig {
    /// Loads `.env` if present, then reads the process environment
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    ///
    /// Missing or unparsable values fall back to the defaults with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| {
            tracing::warn!("DATABASE_URL not set, using default");
            defaults.database_url.clone()
        });

        Self {
            database_url,
            port: parse_or(&lookup, "SERVER_PORT", defaults.port),
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", defaults.max_connections),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy + std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value '{}', using {}", key, raw, default);
            default
        }),
        None => default,
    }
}
