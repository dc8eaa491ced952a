//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::IntoResponse;
use std::sync::Arc;

use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthSessionRepository, CredentialRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, LoginRequest, RegisterRequest, SessionStatusResponse,
};

/// Everything the auth handlers need from storage
pub trait AuthStore:
    UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository + CredentialRepository + AuthSessionRepository + Send + Sync + 'static
{
}

/// Shared state for auth handlers and the principal middleware
pub struct AuthAppState<R: AuthStore> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R: AuthStore> AuthAppState<R> {
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

impl<R: AuthStore> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse> {
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let input = SignUpInput {
        name: req.name,
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;
    let cookie = session_cookie(&state.config, &output.session_token)?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AccountResponse::new(&output.user, output.expires_at_ms)),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse> {
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;
    let cookie = session_cookie(&state.config, &output.session_token)?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AccountResponse::new(&output.user, output.expires_at_ms)),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse> {
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        // The cookie is cleared either way
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Sign out of unknown session");
        }
    }

    let cookie = state
        .config
        .cookie()
        .delete_cookie_header()
        .ok_or_else(|| AuthError::Internal("Invalid session cookie".to_string()))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse> {
    let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) else {
        return Json(SessionStatusResponse::anonymous());
    };

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());

    match use_case.execute(&token).await {
        Ok(info) => Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(info.principal.user_id.to_string()),
            role: Some(info.principal.user_role),
            expires_at_ms: Some(info.expires_at_ms),
        }),
        Err(AuthError::SessionInvalid) => Json(SessionStatusResponse::anonymous()),
        Err(e) => {
            tracing::error!(error = %e, "Session status lookup failed");
            Json(SessionStatusResponse::anonymous())
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn session_cookie(config: &AuthConfig, token: &str) -> AuthResult<HeaderValue> {
    config
        .cookie()
        .set_cookie_header(token)
        .ok_or_else(|| AuthError::Internal("Invalid session cookie".to_string()))
}
