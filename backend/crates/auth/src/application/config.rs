//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use platform::config::SECRET_LENGTH;
use platform::cookie::{CookieConfig, SESSION_COOKIE_NAME};
use platform::crypto::random_bytes;
use platform::password::HashScheme;
use std::fmt;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing
    pub session_secret: [u8; SECRET_LENGTH],
    /// Session lifetime, renewed on activity past its half-life
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password derivation scheme for new credentials
    pub hash_scheme: HashScheme,
}

impl AuthConfig {
    /// Production configuration around an externally supplied secret
    pub fn new(session_secret: [u8; SECRET_LENGTH]) -> Self {
        Self {
            session_cookie_name: SESSION_COOKIE_NAME.to_string(),
            session_secret,
            session_ttl: Duration::days(7),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            hash_scheme: HashScheme::default(),
        }
    }

    /// Create config with a random session secret
    ///
    /// Sessions do not survive a restart.
    pub fn with_random_secret() -> Self {
        let mut secret = [0u8; SECRET_LENGTH];
        secret.copy_from_slice(&random_bytes(SECRET_LENGTH));
        Self::new(secret)
    }

    /// Create config for development (insecure cookie, random secret)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Session TTL in milliseconds
    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.num_milliseconds()
    }

    /// Cookie settings for the session cookie
    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            same_site: self.cookie_same_site,
            ..CookieConfig::session(self.cookie_secure, self.session_ttl.num_seconds())
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_secret", &"[REDACTED]")
            .field("session_ttl", &self.session_ttl)
            .field("cookie_secure", &self.cookie_secure)
            .field("cookie_same_site", &self.cookie_same_site)
            .field("hash_scheme", &self.hash_scheme)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new([1u8; SECRET_LENGTH]);
        assert!(config.cookie_secure);
        assert_eq!(config.hash_scheme, HashScheme::default());
        assert_eq!(config.session_ttl_ms(), 7 * 24 * 3600 * 1000);
    }

    #[test]
    fn test_development_uses_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert!(!a.cookie_secure);
        assert_ne!(a.session_secret, b.session_secret);
    }

    #[test]
    fn test_cookie_matches_config() {
        let config = AuthConfig::development();
        let cookie = config.cookie().build_set_cookie("t");
        assert!(cookie.starts_with("blog_session=t"));
        assert!(cookie.contains(&format!("Max-Age={}", 7 * 24 * 3600)));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::new([0xAB; SECRET_LENGTH]);
        let debug = format!("{:?}", config);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("171"));
    }
}
