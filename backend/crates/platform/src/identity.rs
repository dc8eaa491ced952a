//! Identity Hashing
//!
//! Accounts are looked up by a deterministic digest of the email address
//! rather than the address itself. The digest is unsalted SHA-512 rendered
//! as 128 lowercase hex characters, so the same email always maps to the
//! same key and lookups stay a plain equality match.
//!
//! This is a lookup key, not a secret: it does not protect low-entropy
//! addresses against offline guessing.

use crate::crypto::sha512_hex;

/// Length of an identity digest in hex characters
pub const IDENTITY_DIGEST_LENGTH: usize = 128;

/// Hash an identifier (already normalized by the caller)
///
/// Total function: any string, including the empty one, has a digest.
pub fn identity_digest(identifier: &str) -> String {
    sha512_hex(identifier.as_bytes())
}

/// Check that `s` has the shape of an identity digest
pub fn is_identity_digest(s: &str) -> bool {
    s.len() == IDENTITY_DIGEST_LENGTH
        && s
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
