//! Error conversions - From implementations for common error types

use super::app_error::AppError;
use super::kind::ErrorKind;

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::Forbidden,
            std::io::ErrorKind::TimedOut => ErrorKind::RequestTimeout,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "I/O operation failed").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Classify a database error
///
/// Integrity violations (SQLSTATE class 23) are the caller's fault; an
/// unreachable or exhausted database is reported as unavailable.
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    // https://www.postgresql.org/docs/current/errcodes-appendix.html
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505" | "23503") => ErrorKind::Conflict,
            Some(code) if code.starts_with("23") => ErrorKind::BadRequest,
            Some(code) if code.starts_with("53") || code.starts_with("57P") => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let kind = sqlx_error_kind(&err);
        let message = match kind {
            ErrorKind::NotFound => "Record not found",
            ErrorKind::Conflict => "Conflicting record",
            ErrorKind::BadRequest => "Constraint violation",
            ErrorKind::ServiceUnavailable => "Database unavailable",
            _ => "Database error",
        };
        AppError::new(kind, message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // RFC 7807 Problem Details for HTTP APIs
        let body = serde_json::json!({
            "type": format!("https://httpstatuses.io/{}", self.status_code()),
            "title": self.kind().as_str(),
            "status": self.status_code(),
            "detail": self.message(),
            "action": self.action(),
        });

        (status, Json(body)).into_response()
    }
}
