//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::handlers::{self, AuthAppState, AuthStore};

/// Create the Auth router for any repository implementation
pub fn auth_router<R: AuthStore>(state: AuthAppState<R>) -> Router {
    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .route("/session", get(handlers::session_status::<R>))
        .with_state(state)
}
