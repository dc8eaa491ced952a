//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the session referenced by `session_token`
    ///
    /// Deleting a session that no longer exists is not an error.
    pub async fn execute(&self, session_token: &str) -> AuthResult<()> {
        let session_id = session_token::verify(&self.config.session_secret, session_token)?;
        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
