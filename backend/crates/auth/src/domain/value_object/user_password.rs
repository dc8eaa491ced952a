//! User Password Value Object
//!
//! Domain wrappers around `platform::password`:
//! - [`RawPassword`] - user input, zeroized on drop
//! - [`UserPassword`] - the stored PBKDF2-SHA512 credential
//!
//! ## Usage
//! ```rust
//! use auth::domain::value_object::user_password::{RawPassword, UserPassword};
//! use platform::password::HashScheme;
//!
//! let raw = RawPassword::new("correct horse battery".to_string()).unwrap();
//! let hashed = UserPassword::from_raw(&raw, HashScheme::pbkdf2_sha512(1_000));
//! assert!(hashed.verify(&raw));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashScheme, PasswordHashError, PasswordPolicyError, StoredCredential,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a new raw password for registration
    ///
    /// ## Errors
    /// Returns `AppError` with user-facing messages for policy violations
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } => AppError::bad_request(e.to_string())
                .with_action("Please choose a longer password"),

            PasswordPolicyError::TooLong { .. } => AppError::bad_request(e.to_string())
                .with_action("Please choose a shorter password"),

            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request("Password cannot be empty")
                    .with_action("Please enter a password")
            }

            PasswordPolicyError::InvalidCharacter => {
                AppError::bad_request("Password contains invalid characters")
                    .with_action("Please remove any special control characters")
            }
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a login attempt without applying the registration policy
    ///
    /// Accounts created under older rules must still be able to log in.
    pub fn for_verification(raw: String) -> Option<Self> {
        (!raw.is_empty()).then(|| Self(ClearTextPassword::new_unchecked(raw)))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Stored password credential
///
/// Persisted as three columns: scheme, salt and digest.
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(StoredCredential);

impl UserPassword {
    /// Hash a raw password with a fresh salt
    pub fn from_raw(raw: &RawPassword, scheme: HashScheme) -> Self {
        Self(raw.inner().hash(scheme))
    }

    /// Rebuild from stored columns
    ///
    /// Fails with the integrity error when the record is malformed.
    pub fn from_db(method: &str, salt: String, digest: String) -> Result<Self, PasswordHashError> {
        StoredCredential::from_parts(method, salt, digest).map(Self)
    }

    /// Well-formed credential that matches no password
    ///
    /// Verifying against it costs exactly as much as a real verification,
    /// so unknown accounts take as long to reject as wrong passwords.
    pub fn dummy(scheme: HashScheme) -> Self {
        Self(StoredCredential::placeholder(scheme))
    }

    pub fn method(&self) -> String {
        self.0.method()
    }

    pub fn salt(&self) -> &str {
        self.0.salt()
    }

    pub fn digest(&self) -> &str {
        self.0.digest()
    }

    /// Verify a raw password against this credential (constant time)
    pub fn verify(&self, raw: &RawPassword) -> bool {
        self.0.verify(raw.inner())
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("scheme", &self.0.scheme())
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
