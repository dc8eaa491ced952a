//! HTTP Handlers

use std::sync::Arc;

use auth::{CurrentPrincipal, admin_only};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::PostId;

use crate::application::{
    AddCommentInput, AddCommentUseCase, CreatePostUseCase, DeletePostUseCase, EditPostUseCase,
    ListPostsUseCase, PostInput, ShowPostUseCase,
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::error::{BlogError, BlogResult};
use crate::presentation::dto::{
    CommentCreatedResponse, CommentRequest, PostDetailResponse, PostRequest, PostSummaryResponse,
};

/// Everything the blog handlers need from storage
pub trait BlogStore: PostRepository + CommentRepository + Send + Sync + 'static {}

impl<T> BlogStore for T where T: PostRepository + CommentRepository + Send + Sync + 'static {}

/// Shared state for blog handlers
pub struct BlogAppState<R: BlogStore> {
    pub repo: Arc<R>,
}

impl<R: BlogStore> BlogAppState<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Arc::new(repo),
        }
    }

    async fn post_detail(&self, post_id: &PostId) -> BlogResult<PostDetailResponse> {
        let output = ShowPostUseCase::new(self.repo.clone(), self.repo.clone())
            .execute(post_id)
            .await?;

        Ok(PostDetailResponse::new(&output.post, &output.comments))
    }
}

impl<R: BlogStore> Clone for BlogAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

/// Malformed ids cannot name an existing post
fn parse_post_id(raw: &str) -> BlogResult<PostId> {
    raw.parse().map_err(|_| BlogError::PostNotFound)
}

impl From<PostRequest> for PostInput {
    fn from(req: PostRequest) -> Self {
        Self {
            title: req.title,
            subtitle: req.subtitle,
            img_url: req.img_url,
            body: req.body,
        }
    }
}

// ============================================================================
// Read
// ============================================================================

/// GET /api/blog/posts
pub async fn list_posts<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
) -> BlogResult<Json<Vec<PostSummaryResponse>>> {
    let posts = ListPostsUseCase::new(state.repo.clone()).execute().await?;

    Ok(Json(posts.iter().map(PostSummaryResponse::from).collect()))
}

/// GET /api/blog/posts/{post_id}
pub async fn show_post<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
    Path(post_id): Path<String>,
) -> BlogResult<Json<PostDetailResponse>> {
    let post_id = parse_post_id(&post_id)?;

    Ok(Json(state.post_detail(&post_id).await?))
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/blog/posts
pub async fn create_post<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Json(req): Json<PostRequest>,
) -> BlogResult<impl IntoResponse> {
    let use_case = CreatePostUseCase::new(state.repo.clone());

    let post = admin_only(principal.as_ref(), |admin| async move {
        use_case.execute(&admin, req.into()).await
    })
    .await?;

    Ok((StatusCode::CREATED, Json(state.post_detail(&post.post_id).await?)))
}

/// PUT /api/blog/posts/{post_id}
pub async fn edit_post<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(post_id): Path<String>,
    Json(req): Json<PostRequest>,
) -> BlogResult<Json<PostDetailResponse>> {
    let use_case = EditPostUseCase::new(state.repo.clone());

    let post = admin_only(principal.as_ref(), |admin| async move {
        let post_id = parse_post_id(&post_id)?;
        use_case.execute(&admin, &post_id, req.into()).await
    })
    .await?;

    Ok(Json(state.post_detail(&post.post_id).await?))
}

/// DELETE /api/blog/posts/{post_id}
pub async fn delete_post<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(post_id): Path<String>,
) -> BlogResult<StatusCode> {
    let use_case = DeletePostUseCase::new(state.repo.clone());

    admin_only(principal.as_ref(), |admin| async move {
        let post_id = parse_post_id(&post_id)?;
        use_case.execute(&admin, &post_id).await
    })
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Comments
// ============================================================================

/// POST /api/blog/posts/{post_id}/comments
pub async fn add_comment<R: BlogStore>(
    State(state): State<BlogAppState<R>>,
    CurrentPrincipal(principal): CurrentPrincipal,
    Path(post_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> BlogResult<impl IntoResponse> {
    let use_case = AddCommentUseCase::new(state.repo.clone(), state.repo.clone());

    let input = AddCommentInput {
        post_id: parse_post_id(&post_id)?,
        text: req.text,
    };

    let comment = use_case.execute(principal.as_ref(), input).await?;

    Ok((StatusCode::CREATED, Json(CommentCreatedResponse::from(&comment))))
}
