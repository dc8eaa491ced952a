//! Blog Error Types

use auth::AuthError;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    /// No post with the requested id
    #[error("Post not found")]
    PostNotFound,

    /// Another post already uses this title
    #[error("A post with this title already exists")]
    TitleTaken,

    /// Draft or comment failed validation
    #[error("{0}")]
    Validation(String),

    /// Caller is not the administrator
    #[error("Administrator access required")]
    Forbidden,

    /// Caller must be logged in
    #[error("You have to log in to comment")]
    LoginRequired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::TitleTaken => ErrorKind::Conflict,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Forbidden => ErrorKind::Forbidden,
            BlogError::LoginRequired => ErrorKind::Unauthorized,
            BlogError::Database(e) => match sqlx_error_kind(e) {
                ErrorKind::ServiceUnavailable => ErrorKind::ServiceUnavailable,
                _ => ErrorKind::InternalServerError,
            },
            BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::LoginRequired => {
                AppError::new(self.kind(), self.to_string()).with_action("Log in")
            }
            _ if self.kind().is_server_error() => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// The access guard reports refusals as auth errors
impl From<AuthError> for BlogError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Forbidden => BlogError::Forbidden,
            AuthError::SessionInvalid => BlogError::LoginRequired,
            AuthError::Database(e) => BlogError::Database(e),
            other => BlogError::Internal(other.to_string()),
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        err.to_app_error()
    }
}
