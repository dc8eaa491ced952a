//! Password Hashing and Verification
//!
//! Credentials are derived with PBKDF2-HMAC-SHA512:
//! - 32 character random alphanumeric salt, fresh for every hash
//! - 1,048,576 iterations by default (deliberately slow)
//! - 64 byte derived key stored as lowercase hex
//!
//! A stored credential is three independent fields: the scheme identifier
//! (`pbkdf2:sha512:<iterations>`), the salt and the digest. Joined with `$`
//! they form the `method$salt$hash` string used by the records this blog
//! has always stored, so existing accounts keep verifying.
//!
//! ## Security Features
//! - Zeroization of clear text passwords and derived keys
//! - Constant-time digest comparison
//! - Malformed stored records are reported as an integrity error, never as
//!   a successful (or merely failed) login

use std::fmt;
use std::str::FromStr;

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::{constant_time_eq, random_alphanumeric};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 10;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Default PBKDF2 iteration count (2^20)
pub const DEFAULT_ITERATIONS: u32 = 1_048_576;

/// Salt length in characters
pub const SALT_LENGTH: usize = 32;

/// Derived key length in bytes (SHA-512 output size)
pub const DIGEST_LENGTH: usize = 64;

const SCHEME_PREFIX: &str = "pbkdf2:sha512";

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordHashError {
    /// The scheme identifier is not `pbkdf2:sha512:<iterations>`
    #[error("Unsupported or malformed hash scheme: {0}")]
    UnsupportedScheme(String),

    /// Stored salt is missing or malformed
    #[error("Stored credential has a malformed salt")]
    MalformedSalt,

    /// Stored digest is missing or malformed
    #[error("Stored credential has a malformed digest")]
    MalformedDigest,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// - Does not implement `Clone`
/// - Debug output is redacted
/// - No Unicode normalization is applied, so digests stay byte-compatible
///   with credentials created before this implementation
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Create a new clear text password with validation
    ///
    /// - Not empty or whitespace only
    /// - Between [`MIN_PASSWORD_LENGTH`] and [`MAX_PASSWORD_LENGTH`] code points
    /// - No control characters other than tab
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // Wrap first so the input is zeroized on every error path too
        let password = Self(raw);

        if password.0.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = password.0.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if password.0.chars().any(|ch| ch.is_control() && ch != '\t') {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Create without policy checks (tests and dummy verification only)
    pub fn new_unchecked(raw: String) -> Self {
        Self(raw)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Derive a fresh credential with a newly generated salt
    pub fn hash(&self, scheme: HashScheme) -> StoredCredential {
        let salt = random_alphanumeric(SALT_LENGTH);
        let derived = derive(self.as_bytes(), salt.as_bytes(), scheme.iterations);

        StoredCredential {
            scheme,
            salt,
            digest: hex::encode(derived.as_slice()),
        }
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hash Scheme
// ============================================================================

/// Key derivation scheme, rendered as `pbkdf2:sha512:<iterations>`
///
/// The iteration count is part of the stored record, so raising
/// [`DEFAULT_ITERATIONS`] later does not invalidate existing credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashScheme {
    iterations: u32,
}

impl HashScheme {
    /// PBKDF2-HMAC-SHA512 with the given iteration count
    ///
    /// Production code uses [`HashScheme::default`]; lower counts exist for
    /// tests, which would otherwise spend seconds per hash.
    pub const fn pbkdf2_sha512(iterations: u32) -> Self {
        Self { iterations }
    }

    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Scheme identifier as persisted (`pbkdf2:sha512:1048576`)
    pub fn identifier(&self) -> String {
        format!("{}:{}", SCHEME_PREFIX, self.iterations)
    }
}

impl Default for HashScheme {
    fn default() -> Self {
        Self::pbkdf2_sha512(DEFAULT_ITERATIONS)
    }
}

impl fmt::Display for HashScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", SCHEME_PREFIX, self.iterations)
    }
}

impl FromStr for HashScheme {
    type Err = PasswordHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unsupported = || PasswordHashError::UnsupportedScheme(s.to_string());

        let iterations = s
            .strip_prefix(SCHEME_PREFIX)
            .and_then(|rest| rest.strip_prefix(':'))
            .ok_or_else(unsupported)?;

        // Reject signs, whitespace and leading zeros so the identifier round-trips
        if iterations.is_empty()
            || !iterations.bytes().all(|b| b.is_ascii_digit())
            || (iterations.len() > 1 && iterations.starts_with('0'))
        {
            return Err(unsupported());
        }

        match iterations.parse::<u32>() {
            Ok(n) if n > 0 => Ok(Self::pbkdf2_sha512(n)),
            _ => Err(unsupported()),
        }
    }
}

// ============================================================================
// Stored Credential (Safe to store)
// ============================================================================

/// Salted, iterated password digest
///
/// Created once at registration and never mutated. The three fields are
/// stored independently so that verification can rebuild the exact original
/// derivation.
#[derive(Clone, PartialEq, Eq)]
pub struct StoredCredential {
    scheme: HashScheme,
    salt: String,
    digest: String,
}

impl StoredCredential {
    /// Rebuild a credential from its stored fields
    ///
    /// Fails with an integrity error when any field is missing or malformed.
    pub fn from_parts(
        method: &str,
        salt: impl Into<String>,
        digest: impl Into<String>,
    ) -> Result<Self, PasswordHashError> {
        let scheme = method.parse::<HashScheme>()?;
        let salt = salt.into();
        let digest = digest.into();

        if salt.is_empty() || salt.contains('$') || salt.chars().any(char::is_whitespace) {
            return Err(PasswordHashError::MalformedSalt);
        }

        let digest_ok = digest.len() == DIGEST_LENGTH * 2
            && digest
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !digest_ok {
            return Err(PasswordHashError::MalformedDigest);
        }

        Ok(Self {
            scheme,
            salt,
            digest,
        })
    }

    /// Well-formed credential that no password is expected to match
    ///
    /// Used to spend a full derivation when the account does not exist.
    pub fn placeholder(scheme: HashScheme) -> Self {
        Self {
            scheme,
            salt: "0".repeat(SALT_LENGTH),
            digest: "0".repeat(DIGEST_LENGTH * 2),
        }
    }

    /// Parse the combined `method$salt$digest` form
    pub fn from_encoded(encoded: &str) -> Result<Self, PasswordHashError> {
        let mut parts = encoded.splitn(3, '$');
        let method = parts.next().unwrap_or_default();
        let salt = parts.next().ok_or(PasswordHashError::MalformedSalt)?;
        let digest = parts.next().ok_or(PasswordHashError::MalformedDigest)?;
        Self::from_parts(method, salt, digest)
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Scheme identifier field for storage
    pub fn method(&self) -> String {
        self.scheme.identifier()
    }

    /// Salt field for storage
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Digest field for storage
    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Combined `method$salt$digest` form
    pub fn encoded(&self) -> String {
        format!("{}${}${}", self.scheme, self.salt, self.digest)
    }

    /// Verify a candidate password against this credential
    ///
    /// A mismatch is a normal `false`, not an error.
    pub fn verify(&self, candidate: &ClearTextPassword) -> bool {
        let derived = derive(
            candidate.as_bytes(),
            self.salt.as_bytes(),
            self.scheme.iterations,
        );

        // `from_parts` and `hash` both guarantee well-formed hex
        let Ok(expected) = hex::decode(&self.digest) else {
            return false;
        };

        constant_time_eq(derived.as_slice(), &expected)
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredential")
            .field("scheme", &self.scheme)
            .field("salt", &"[SALT]")
            .field("digest", &"[HASH]")
            .finish()
    }
}

/// Verify a candidate against stored fields
///
/// - `Ok(true)` - password matches
/// - `Ok(false)` - wrong password
/// - `Err(_)` - the stored record is corrupt; callers must fail closed
pub fn verify_credential(
    method: &str,
    salt: &str,
    digest: &str,
    candidate: &ClearTextPassword,
) -> Result<bool, PasswordHashError> {
    let credential = StoredCredential::from_parts(method, salt, digest)?;
    Ok(credential.verify(candidate))
}

fn derive(password: &[u8], salt: &[u8], iterations: u32) -> Zeroizing<[u8; DIGEST_LENGTH]> {
    let mut out = Zeroizing::new([0u8; DIGEST_LENGTH]);
    pbkdf2_hmac::<Sha512>(password, salt, iterations, out.as_mut_slice());
    out
}

// ============================================================================
// Tests
// ============================================================================
