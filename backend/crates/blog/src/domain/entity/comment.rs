//! Comment Entity

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId, UserId};

use crate::domain::value_object::comment_text::CommentText;

#[derive(Debug, Clone)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub text: CommentText,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: PostId, author_id: UserId, text: CommentText) -> Self {
        Self {
            comment_id: CommentId::new(),
            post_id,
            author_id,
            text,
            created_at: Utc::now(),
        }
    }
}

/// A comment joined with its author's display name
#[derive(Debug, Clone)]
pub struct CommentWithAuthor {
    pub comment: Comment,
    pub author_name: String,
}
