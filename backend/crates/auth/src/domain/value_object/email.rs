//! Email Value Object
//!
//! A validated, normalized email address. Only ever held in memory: the
//! persisted form is its [`IdentityKey`](super::identity_key::IdentityKey).

use kernel::error::app_error::{AppError, AppResult};
use std::str::FromStr;

/// Minimum email length
pub const EMAIL_MIN_LENGTH: usize = 10;

/// Maximum email length
pub const EMAIL_MAX_LENGTH: usize = 50;

/// Email address value object
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    /// Create a new email with validation
    ///
    /// Input is trimmed and lowercased before validation, so the same mailbox
    /// typed with different casing maps to the same account.
    pub fn new(email: impl Into<String>) -> AppResult<Self> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(AppError::bad_request("Email cannot be empty"));
        }

        let length = email.chars().count();
        if !(EMAIL_MIN_LENGTH..=EMAIL_MAX_LENGTH).contains(&length) {
            return Err(AppError::bad_request(format!(
                "Email must be between {} and {} characters",
                EMAIL_MIN_LENGTH, EMAIL_MAX_LENGTH
            )));
        }

        if !Self::is_valid_format(&email) {
            return Err(AppError::bad_request("Invalid email format"));
        }

        Ok(Self(email))
    }

    /// Basic email format validation
    fn is_valid_format(email: &str) -> bool {
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };

        if local.is_empty() || local.len() > 64 || domain.contains('@') {
            return false;
        }

        if local.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }

        if domain.is_empty() || !domain.contains('.') {
            return false;
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return false;
        }

        if domain.starts_with(['.', '-']) || domain.ends_with(['.', '-']) {
            return false;
        }

        !domain.contains("..")
    }

    /// Get the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the domain part of the email
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl FromStr for Email {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Email::new(s)
    }
}

// Addresses are personal data: keep them out of logs.
impl std::fmt::Debug for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Email(***@{})", self.domain())
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
