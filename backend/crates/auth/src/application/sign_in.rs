//! Sign In Use Case
//!
//! Authenticates a user by email and password and creates a session.
//!
//! The caller only ever sees `InvalidCredentials`, whether the email is
//! unknown or the password is wrong. An unknown email still pays for a full
//! key derivation so the two cases also take the same time.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{auth_session::AuthSession, user::User};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    identity_key::IdentityKey,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
pub struct SignInOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Sign in use case
pub struct SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    credential_repo: Arc<C>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, C, S> SignInUseCase<U, C, S>
where
    U: UserRepository,
    C: CredentialRepository,
    S: AuthSessionRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        credential_repo: Arc<C>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            credential_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // No account can exist for a malformed email
        let email = Email::new(input.email).map_err(|_| {
            tracing::warn!(reason = "malformed_email", "Login failed");
            AuthError::InvalidCredentials
        })?;

        let raw_password =
            RawPassword::for_verification(input.password).ok_or(AuthError::InvalidCredentials)?;

        let email_key = IdentityKey::from_email(&email);

        let Some(user) = self.user_repo.find_by_email_key(&email_key).await? else {
            let dummy = UserPassword::dummy(self.config.hash_scheme);
            self.verify_password(dummy, raw_password).await?;
            tracing::warn!(
                reason = "unknown_email",
                email_domain = email.domain(),
                "Login failed"
            );
            return Err(AuthError::InvalidCredentials);
        };

        let credential = self
            .credential_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(user_id = %user.user_id, "User has no credential");
                AuthError::CredentialIntegrity
            })?;

        if !self.verify_password(credential.password, raw_password).await? {
            tracing::warn!(
                reason = "wrong_password",
                user_id = %user.user_id,
                "Login failed"
            );
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession::new(user.user_id, user.user_role, self.config.session_ttl);
        self.session_repo.create(&session).await?;

        let session_token = session_token::issue(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }

    /// Run the key derivation off the async executor
    async fn verify_password(
        &self,
        stored: UserPassword,
        candidate: RawPassword,
    ) -> AuthResult<bool> {
        tokio::task::spawn_blocking(move || stored.verify(&candidate))
            .await
            .map_err(|e| AuthError::Internal(format!("Password verification task failed: {e}")))
    }
}
