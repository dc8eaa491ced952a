//! Secret and Environment Loading
//!
//! Secrets come from environment variables as standard base64. Nothing is
//! read from fixed file paths.

use std::env;

use thiserror::Error;

use crate::crypto::{from_base64, random_bytes};

/// Length in bytes of signing secrets
pub const SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(String),

    #[error("{name} is not valid base64: {source}")]
    InvalidBase64 {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("{name} must decode to {expected} bytes (got {actual})")]
    InvalidLength {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("{name} has an invalid value: {value}")]
    InvalidValue { name: String, value: String },
}

/// Decode a base64 secret into a fixed size key
pub fn decode_secret(name: &str, encoded: &str) -> Result<[u8; SECRET_LENGTH], ConfigError> {
    let bytes = from_base64(encoded.trim()).map_err(|source| ConfigError::InvalidBase64 {
        name: name.to_string(),
        source,
    })?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| ConfigError::InvalidLength {
            name: name.to_string(),
            expected: SECRET_LENGTH,
            actual: bytes.len(),
        })
}

/// Read a base64 secret from the environment
///
/// When the variable is unset, `fallback_random` decides between an
/// ephemeral random secret (development) and an error (production).
pub fn secret_from_env(
    name: &str,
    fallback_random: bool,
) -> Result<[u8; SECRET_LENGTH], ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => decode_secret(name, &value),
        _ if fallback_random => {
            let mut secret = [0u8; SECRET_LENGTH];
            secret.copy_from_slice(&random_bytes(SECRET_LENGTH));
            Ok(secret)
        }
        _ => Err(ConfigError::Missing(name.to_string())),
    }
}

/// Read an optional environment variable, treating blank as unset
pub fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse an optional boolean flag (`true/false`, `1/0`, `yes/no`)
pub fn flag_from_env(name: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_env(name) {
        None => Ok(default),
        Some(value) => parse_flag(&value).ok_or_else(|| ConfigError::InvalidValue {
            name: name.to_string(),
            value,
        }),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
