//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    blog_post::PostWithAuthor,
    comment::{Comment, CommentWithAuthor},
};

// ============================================================================
// Requests
// ============================================================================

/// Create/edit post request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRequest {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

/// Add comment request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRequest {
    pub text: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Post as shown on the index page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummaryResponse {
    pub post_id: String,
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub author: String,
    /// "%B %d, %Y"
    pub date: String,
}

impl From<&PostWithAuthor> for PostSummaryResponse {
    fn from(view: &PostWithAuthor) -> Self {
        let post = &view.post;
        Self {
            post_id: post.post_id.to_string(),
            title: post.title.to_string(),
            subtitle: post.subtitle.to_string(),
            img_url: post.img_url.to_string(),
            author: view.author_name.clone(),
            date: post.published_on_display(),
        }
    }
}

/// Full post with its comments
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetailResponse {
    pub post_id: String,
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
    pub author: String,
    pub author_id: String,
    pub date: String,
    pub comments: Vec<CommentResponse>,
}

impl PostDetailResponse {
    pub fn new(view: &PostWithAuthor, comments: &[CommentWithAuthor]) -> Self {
        let post = &view.post;
        Self {
            post_id: post.post_id.to_string(),
            title: post.title.to_string(),
            subtitle: post.subtitle.to_string(),
            img_url: post.img_url.to_string(),
            body: post.body.clone(),
            author: view.author_name.clone(),
            author_id: post.author_id.to_string(),
            date: post.published_on_display(),
            comments: comments.iter().map(CommentResponse::from).collect(),
        }
    }
}

/// Comment on a post
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub comment_id: String,
    pub text: String,
    pub author: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CommentWithAuthor> for CommentResponse {
    fn from(view: &CommentWithAuthor) -> Self {
        let comment = &view.comment;
        Self {
            comment_id: comment.comment_id.to_string(),
            text: comment.text.to_string(),
            author: view.author_name.clone(),
            author_id: comment.author_id.to_string(),
            created_at: comment.created_at,
        }
    }
}

/// Newly added comment
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreatedResponse {
    pub comment_id: String,
    pub post_id: String,
    pub text: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentCreatedResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.comment_id.to_string(),
            post_id: comment.post_id.to_string(),
            text: comment.text.to_string(),
            author_id: comment.author_id.to_string(),
            created_at: comment.created_at,
        }
    }
}
