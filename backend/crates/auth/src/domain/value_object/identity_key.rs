//! Identity Key Value Object
//!
//! The SHA-512 digest of a normalized email. This is the only form in which
//! an email address reaches storage, and it is unique per account.

use platform::identity::{identity_digest, is_identity_digest};
use std::fmt;

use super::email::Email;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub fn from_email(email: &Email) -> Self {
        Self(identity_digest(email.as_str()))
    }

    /// Create from database value
    ///
    /// Returns `None` when the stored value is not a digest.
    pub fn from_db(value: String) -> Option<Self> {
        is_identity_digest(&value).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({}…)", &self.0[..12])
    }
}
