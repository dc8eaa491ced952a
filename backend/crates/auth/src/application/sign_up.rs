//! Sign Up Use Case
//!
//! Creates a new account and logs it in.

use std::sync::Arc;

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::session_token;
use crate::domain::entity::{auth_session::AuthSession, credential::Credential, user::User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{
    display_name::DisplayName,
    email::Email,
    identity_key::IdentityKey,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign up output
pub struct SignUpOutput {
    pub user: User,
    /// Session token for cookie
    pub session_token: String,
    pub expires_at_ms: i64,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let display_name =
            DisplayName::new(&input.name).map_err(|e| AuthError::Validation(e.to_string()))?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.message().to_string()))?;

        let email_key = IdentityKey::from_email(&email);

        if self.user_repo.exists_by_email_key(&email_key).await? {
            tracing::info!(email_domain = email.domain(), "Sign up with registered email");
            return Err(AuthError::EmailTaken);
        }

        // PBKDF2 at full cost takes a noticeable amount of CPU time
        let scheme = self.config.hash_scheme;
        let password = tokio::task::spawn_blocking(move || {
            UserPassword::from_raw(&raw_password, scheme)
        })
        .await
        .map_err(|e| AuthError::Internal(format!("Password hashing task failed: {e}")))?;

        // The first account becomes the blog's administrator
        let role = if self.user_repo.admin_exists().await? {
            UserRole::Reader
        } else {
            UserRole::Admin
        };

        let mut user = User::new(display_name, email_key, role);
        let credential = Credential::new(user.user_id, password);

        match self.user_repo.create(&user, &credential).await {
            Ok(()) => {}
            Err(AuthError::AdminConflict) => {
                // Lost a race for the admin role; register as a reader
                user.user_role = UserRole::Reader;
                user.updated_at = Utc::now();
                self.user_repo.create(&user, &credential).await?;
            }
            Err(e) => return Err(e),
        }

        let ttl = self.config.session_ttl;
        let session = AuthSession::new(user.user_id, user.user_role, ttl);
        self.session_repo.create(&session).await?;

        let session_token = session_token::issue(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            user_role = %user.user_role,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session_token,
            expires_at_ms: session.expires_at_ms,
        })
    }
}
