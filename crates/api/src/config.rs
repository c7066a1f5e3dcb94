//! Server configuration read from the environment at startup.

use std::fmt::Display;
use std::str::FromStr;

use crate::auth::jwt::JwtConfig;

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// Everything the server needs to start, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by the CORS layer.
    pub cors_origins: Vec<String>,
    /// Requests running longer than this are answered with 408.
    pub request_timeout_secs: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
    /// Superuser account to create at startup if it does not exist yet.
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

/// Credentials for the startup superuser.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                     | Default                    |
    /// |-----------------------------|----------------------------|
    /// | `HOST`                      | `0.0.0.0`                  |
    /// | `PORT`                      | `3000`                     |
    /// | `CORS_ORIGINS`              | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`      | `30`                       |
    /// | `DATABASE_URL`              | required                   |
    /// | `DB_MAX_CONNECTIONS`        | `20`                       |
    /// | `JWT_SECRET`                | required                   |
    /// | `JWT_ACCESS_EXPIRY_MINS`    | `60`                       |
    /// | `BOOTSTRAP_ADMIN_USERNAME`  | unset (no bootstrap)       |
    /// | `BOOTSTRAP_ADMIN_PASSWORD`  | unset (no bootstrap)       |
    ///
    /// # Panics
    ///
    /// Panics on a missing required variable or an unparsable value, so a
    /// misconfigured server never starts.
    pub fn from_env() -> Self {
        Self {
            host: env_or("HOST", "0.0.0.0".to_string()),
            port: env_or("PORT", 3000),
            cors_origins: parse_origins(&env_or("CORS_ORIGINS", DEFAULT_CORS_ORIGIN.to_string())),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            database_url: required("DATABASE_URL"),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            jwt: JwtConfig {
                secret: required("JWT_SECRET"),
                access_token_expiry_mins: env_or("JWT_ACCESS_EXPIRY_MINS", 60),
            },
            bootstrap_admin: BootstrapAdmin::from_env(),
        }
    }
}

impl BootstrapAdmin {
    /// Present only when both variables are set and the username is non-empty.
    fn from_env() -> Option<Self> {
        let username = std::env::var("BOOTSTRAP_ADMIN_USERNAME").ok()?;
        let password = std::env::var("BOOTSTRAP_ADMIN_PASSWORD").ok()?;
        (!username.is_empty()).then_some(Self { username, password })
    }
}

fn required(key: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => panic!("{key} must be set in the environment"),
    }
}

fn env_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{key} has an invalid value {raw:?}: {e}")),
        Err(_) => default,
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
