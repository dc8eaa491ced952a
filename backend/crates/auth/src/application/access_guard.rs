//! Access Guard
//!
//! Gates administrator-only operations. Unauthenticated callers and
//! authenticated non-admins are refused alike with `AuthError::Forbidden`,
//! and the guarded operation is never started on refusal.
//!
//! [`AdminPrincipal`] has no public constructor: an operation that takes one
//! as a parameter cannot be reached without passing the guard.

use std::future::Future;

use crate::domain::entity::principal::Principal;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Proof that the current principal is the administrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdminPrincipal {
    user_id: UserId,
}

impl AdminPrincipal {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Check that `principal` is the administrator
pub fn require_admin(principal: Option<&Principal>) -> AuthResult<AdminPrincipal> {
    match principal {
        Some(p) if p.is_admin() => Ok(AdminPrincipal { user_id: p.user_id }),
        Some(p) => {
            tracing::warn!(user_id = %p.user_id, reason = "not_admin", "Access denied");
            Err(AuthError::Forbidden)
        }
        None => {
            tracing::warn!(reason = "unauthenticated", "Access denied");
            Err(AuthError::Forbidden)
        }
    }
}

/// Run `op` only if `principal` is the administrator
///
/// On refusal `op` is dropped without being called.
pub async fn admin_only<F, Fut, T, E>(principal: Option<&Principal>, op: F) -> Result<T, E>
where
    F: FnOnce(AdminPrincipal) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: From<AuthError>,
{
    let admin = require_admin(principal)?;
    op(admin).await
}
