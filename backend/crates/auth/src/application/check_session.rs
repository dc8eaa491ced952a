//! Check Session Use Case
//!
//! Verifies a session token and resolves the principal behind it.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{auth_session::AuthSession, principal::Principal};
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

/// Session info output
pub struct SessionInfoOutput {
    pub principal: Principal,
    pub expires_at_ms: i64,
}

/// Principal behind a valid session cookie
#[derive(Debug, Clone, Copy)]
pub struct ResolvedSession {
    pub principal: Principal,
    /// The expiry slid forward, so the cookie needs a fresh `Max-Age`
    pub extended: bool,
}

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Check if session is valid and return session info
    pub async fn execute(&self, session_token: &str) -> AuthResult<SessionInfoOutput> {
        let session = self.get_session(session_token).await?;

        Ok(SessionInfoOutput {
            principal: session.principal(),
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Resolve the principal, treating every failure as anonymous
    ///
    /// Infrastructure failures are logged; the request then proceeds
    /// unauthenticated, which can only reduce what it may do.
    pub async fn resolve(&self, session_token: Option<&str>) -> Option<ResolvedSession> {
        let token = session_token?;

        match self.load_session(token).await {
            Ok((session, extended)) => Some(ResolvedSession {
                principal: session.principal(),
                extended,
            }),
            Err(AuthError::SessionInvalid) => None,
            Err(e) => {
                tracing::error!(error = %e, "Session lookup failed");
                None
            }
        }
    }

    /// Get session and update last activity
    pub async fn get_session(&self, session_token: &str) -> AuthResult<AuthSession> {
        self.load_session(session_token)
            .await
            .map(|(session, _)| session)
    }

    async fn load_session(&self, session_token: &str) -> AuthResult<(AuthSession, bool)> {
        let session_id = session_token::verify(&self.config.session_secret, session_token)?;

        let mut session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();
        let extended = session.extend_if_needed(self.config.session_ttl);

        // Update in background
        let session_clone = session.clone();
        let repo = Arc::clone(&self.session_repo);
        tokio::spawn(async move {
            if let Err(e) = repo.update(&session_clone).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok((session, extended))
    }
}
