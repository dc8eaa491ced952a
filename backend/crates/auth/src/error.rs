//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// An account with this email already exists
    #[error("You've already signed up with that email, log in instead!")]
    EmailTaken,

    /// Another registration claimed the administrator role first
    #[error("The administrator account already exists")]
    AdminConflict,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session not found, expired or token forged
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Caller is not the administrator
    #[error("Administrator access required")]
    Forbidden,

    /// Name or email failed validation
    #[error("{0}")]
    Validation(String),

    /// Password failed the password policy
    #[error("{0}")]
    PasswordValidation(String),

    /// Stored credential is malformed
    #[error("Stored credential is corrupt")]
    CredentialIntegrity,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::AdminConflict => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Validation(_) | AuthError::PasswordValidation(_) => ErrorKind::BadRequest,
            AuthError::Database(e) => database_kind(e),
            AuthError::CredentialIntegrity | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    ///
    /// Server-side failures get a generic message; details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::EmailTaken => {
                AppError::new(self.kind(), self.to_string()).with_action("Log in instead")
            }
            AuthError::InvalidCredentials => {
                AppError::new(self.kind(), self.to_string()).with_action("Please try again")
            }
            _ if self.kind().is_server_error() => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::CredentialIntegrity => {
                tracing::error!("Stored credential failed integrity check");
            }
            AuthError::Forbidden => {
                tracing::warn!("Admin-only operation refused");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Database failures never blame the caller
fn database_kind(err: &sqlx::Error) -> ErrorKind {
    match sqlx_error_kind(err) {
        ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
        _ => ErrorKind::InternalServerError,
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                AuthError::Validation(err.message().to_string())
            }
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
