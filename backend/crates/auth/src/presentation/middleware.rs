//! Auth Middleware
//!
//! Resolves the session cookie into a [`CurrentPrincipal`] for every request.
//! Routers downstream decide for themselves what an anonymous caller may do.
//! When the session's expiry slides forward the cookie is re-issued so the
//! browser keeps it as long as the server does.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use platform::cookie::extract_cookie;

use crate::application::{AuthConfig, CheckSessionUseCase};
use crate::domain::entity::principal::Principal;
use crate::presentation::handlers::{AuthAppState, AuthStore};

/// The authenticated principal of the request, if any
///
/// Extracting it never fails: without the middleware the request is
/// simply anonymous.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentPrincipal(pub Option<Principal>);

impl CurrentPrincipal {
    pub fn principal(&self) -> Option<&Principal> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<CurrentPrincipal>()
            .copied()
            .unwrap_or_default())
    }
}

/// Middleware inserting [`CurrentPrincipal`] into request extensions
///
/// Use with `axum::middleware::from_fn_with_state`.
pub async fn resolve_principal<R: AuthStore>(
    State(state): State<AuthAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let resolved = use_case.resolve(token.as_deref()).await;

    req.extensions_mut()
        .insert(CurrentPrincipal(resolved.map(|r| r.principal)));

    let mut response = next.run(req).await;

    if let (Some(token), Some(resolved)) = (token, resolved) {
        if resolved.extended {
            refresh_cookie(&state.config, &token, &mut response);
        }
    }

    response
}

/// Re-issue the session cookie unless the handler already set or cleared it
fn refresh_cookie(config: &AuthConfig, token: &str, response: &mut Response) {
    let prefix = format!("{}=", config.session_cookie_name);
    let handled = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|value| value.to_str().is_ok_and(|v| v.starts_with(&prefix)));
    if handled {
        return;
    }

    match config.cookie().set_cookie_header(token) {
        Some(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        None => tracing::warn!("Session cookie could not be re-issued"),
    }
}
