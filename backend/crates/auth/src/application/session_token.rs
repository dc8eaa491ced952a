//! Session Tokens
//!
//! Cookie value format: `<session uuid>.<base64url(HMAC-SHA256(secret, uuid))>`.
//! The signature lets forged or mangled cookies be rejected without a
//! database lookup.

use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

/// Generate signed session token
pub fn issue(secret: &[u8], session_id: Uuid) -> String {
    let session_id = session_id.to_string();
    let signature = hmac_sha256(secret, session_id.as_bytes());

    format!("{}.{}", session_id, to_base64_url(&signature))
}

/// Parse and verify session token
pub fn verify(secret: &[u8], token: &str) -> AuthResult<Uuid> {
    let (session_id_str, signature_b64) =
        token.split_once('.').ok_or(AuthError::SessionInvalid)?;

    let signature = from_base64_url(signature_b64).map_err(|_| AuthError::SessionInvalid)?;

    if !verify_hmac_sha256(secret, session_id_str.as_bytes(), &signature) {
        return Err(AuthError::SessionInvalid);
    }

    session_id_str
        .parse()
        .map_err(|_| AuthError::SessionInvalid)
}
