//! Create Post Use Case

use std::sync::Arc;

use auth::AdminPrincipal;

use crate::domain::entity::blog_post::BlogPost;
use crate::domain::repository::PostRepository;
use crate::domain::value_object::post_draft::PostDraft;
use crate::error::BlogResult;

/// Submitted post fields, shared by create and edit
pub struct PostInput {
    pub title: String,
    pub subtitle: String,
    pub img_url: String,
    pub body: String,
}

impl PostInput {
    pub fn into_draft(self) -> BlogResult<PostDraft> {
        PostDraft::new(&self.title, &self.subtitle, &self.img_url, self.body)
    }
}

pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, admin: &AdminPrincipal, input: PostInput) -> BlogResult<BlogPost> {
        let draft = input.into_draft()?;
        let post = BlogPost::new(draft, admin.user_id());

        self.post_repo.create(&post).await?;

        tracing::info!(post_id = %post.post_id, author_id = %post.author_id, "Post created");

        Ok(post)
    }
}
