//! Server Configuration
//!
//! Read once at startup from the environment (and `.env` in the working
//! directory, if present).

use std::fmt;
use std::net::SocketAddr;

use axum::http::HeaderValue;
use platform::config::{ConfigError, SECRET_LENGTH, flag_from_env, optional_env, secret_from_env};

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5173,http://127.0.0.1:5173";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<HeaderValue>,
    /// Signs session cookies
    pub session_secret: [u8; SECRET_LENGTH],
    pub cookie_secure: bool,
    pub db_max_connections: u32,
}

impl AppConfig {
    /// Load configuration from the environment
    ///
    /// Debug builds fall back to a random session secret and insecure
    /// cookies; release builds require `SESSION_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let development = cfg!(debug_assertions);

        let database_url =
            optional_env("DATABASE_URL").ok_or_else(|| ConfigError::Missing("DATABASE_URL".into()))?;

        let listen_addr = parse_listen_addr(
            &optional_env("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        )?;

        let frontend_origins = parse_origins(
            &optional_env("FRONTEND_ORIGINS")
                .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        let session_secret = secret_from_env("SESSION_SECRET", development)?;
        let cookie_secure = flag_from_env("COOKIE_SECURE", !development)?;

        let db_max_connections = match optional_env("DB_MAX_CONNECTIONS") {
            None => DEFAULT_DB_MAX_CONNECTIONS,
            Some(value) => parse_positive(&value).ok_or(ConfigError::InvalidValue {
                name: "DB_MAX_CONNECTIONS".to_string(),
                value,
            })?,
        };

        Ok(Self {
            database_url,
            listen_addr,
            frontend_origins,
            session_secret,
            cookie_secure,
            db_max_connections,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &"[REDACTED]")
            .field("listen_addr", &self.listen_addr)
            .field("frontend_origins", &self.frontend_origins)
            .field("session_secret", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

fn parse_listen_addr(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        name: "LISTEN_ADDR".to_string(),
        value: value.to_string(),
    })
}

/// Comma separated origins; entries that are not valid header values are skipped
fn parse_origins(value: &str) -> Vec<HeaderValue> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match origin.parse() {
            Ok(header) => Some(header),
            Err(_) => {
                tracing::warn!(origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect()
}

fn parse_positive(value: &str) -> Option<u32> {
    value.parse().ok().filter(|n| *n > 0)
}
