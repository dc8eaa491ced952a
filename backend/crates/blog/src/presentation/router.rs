//! Blog Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::presentation::handlers::{self, BlogAppState, BlogStore};

/// Create the Blog router for any repository implementation
pub fn blog_router<R: BlogStore>(state: BlogAppState<R>) -> Router {
    Router::new()
        .route(
            "/posts",
            get(handlers::list_posts::<R>).post(handlers::create_post::<R>),
        )
        .route(
            "/posts/{post_id}",
            get(handlers::show_post::<R>)
                .put(handlers::edit_post::<R>)
                .delete(handlers::delete_post::<R>),
        )
        .route("/posts/{post_id}/comments", post(handlers::add_comment::<R>))
        .with_state(state)
}
