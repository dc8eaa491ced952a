//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CommentId, PostId, UserId};
use platform::sanitize::SanitizedContent;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    blog_post::{BlogPost, PostWithAuthor},
    comment::{Comment, CommentWithAuthor},
};
use crate::domain::repository::{CommentRepository, PostRepository};
use crate::domain::value_object::{comment_text::CommentText, image_url::ImageUrl};
use crate::error::{BlogError, BlogResult};

/// Unique constraint on `blog_posts.title`
const TITLE_CONSTRAINT: &str = "blog_posts_title_key";

/// Foreign key from `comments.post_id`
const COMMENT_POST_FK: &str = "comments_post_id_fkey";

/// PostgreSQL-backed blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_post_write_error(err: sqlx::Error) -> BlogError {
    let title_taken = matches!(
        &err,
        sqlx::Error::Database(db_err)
            if db_err.is_unique_violation() && db_err.constraint() == Some(TITLE_CONSTRAINT)
    );

    if title_taken {
        BlogError::TitleTaken
    } else {
        BlogError::Database(err)
    }
}

/// The post was deleted between the existence check and the insert
fn map_comment_write_error(err: sqlx::Error) -> BlogError {
    let post_gone = matches!(
        &err,
        sqlx::Error::Database(db_err)
            if db_err.is_foreign_key_violation() && db_err.constraint() == Some(COMMENT_POST_FK)
    );

    if post_gone {
        BlogError::PostNotFound
    } else {
        BlogError::Database(err)
    }
}

// ============================================================================
// Post Repository Implementation
// ============================================================================

impl PostRepository for PgBlogRepository {
    async fn list(&self) -> BlogResult<Vec<PostWithAuthor>> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.post_id,
                p.title,
                p.subtitle,
                p.img_url,
                p.body,
                p.author_id,
                p.published_on,
                p.created_at,
                p.updated_at,
                u.display_name AS author_name
            FROM blog_posts p
            JOIN users u ON u.user_id = p.author_id
            ORDER BY p.created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }

    async fn find_by_id(&self, post_id: &PostId) -> BlogResult<Option<PostWithAuthor>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.post_id,
                p.title,
                p.subtitle,
                p.img_url,
                p.body,
                p.author_id,
                p.published_on,
                p.created_at,
                p.updated_at,
                u.display_name AS author_name
            FROM blog_posts p
            JOIN users u ON u.user_id = p.author_id
            WHERE p.post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn create(&self, post: &BlogPost) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO blog_posts (
                post_id,
                author_id,
                title,
                subtitle,
                img_url,
                body,
                published_on,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(post.title.as_str())
        .bind(post.subtitle.as_str())
        .bind(post.img_url.as_str())
        .bind(&post.body)
        .bind(post.published_on)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_post_write_error)?;

        Ok(())
    }

    async fn update(&self, post: &BlogPost) -> BlogResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE blog_posts
            SET author_id = $2,
                title = $3,
                subtitle = $4,
                img_url = $5,
                body = $6,
                updated_at = $7
            WHERE post_id = $1
            "#,
        )
        .bind(post.post_id.as_uuid())
        .bind(post.author_id.as_uuid())
        .bind(post.title.as_str())
        .bind(post.subtitle.as_str())
        .bind(post.img_url.as_str())
        .bind(&post.body)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_post_write_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_id: &PostId) -> BlogResult<bool> {
        // comments.post_id cascades
        let result = sqlx::query("DELETE FROM blog_posts WHERE post_id = $1")
            .bind(post_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Comment Repository Implementation
// ============================================================================

impl CommentRepository for PgBlogRepository {
    async fn list_for_post(&self, post_id: &PostId) -> BlogResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.comment_id,
                c.post_id,
                c.author_id,
                c.text,
                c.created_at,
                u.display_name AS author_name
            FROM comments c
            JOIN users u ON u.user_id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn create(&self, comment: &Comment) -> BlogResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (
                comment_id,
                post_id,
                author_id,
                text,
                created_at
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.comment_id.as_uuid())
        .bind(comment.post_id.as_uuid())
        .bind(comment.author_id.as_uuid())
        .bind(comment.text.as_str())
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_comment_write_error)?;

        Ok(())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: Uuid,
    title: String,
    subtitle: String,
    img_url: String,
    body: String,
    author_id: Uuid,
    published_on: NaiveDate,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: String,
}

impl PostRow {
    fn into_post(self) -> PostWithAuthor {
        PostWithAuthor {
            post: BlogPost {
                post_id: PostId::from_uuid(self.post_id),
                title: SanitizedContent::from_trusted(self.title),
                subtitle: SanitizedContent::from_trusted(self.subtitle),
                img_url: ImageUrl::from_db(self.img_url),
                body: self.body,
                author_id: UserId::from_uuid(self.author_id),
                published_on: self.published_on,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_name: self.author_name,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
    author_name: String,
}

impl CommentRow {
    fn into_comment(self) -> CommentWithAuthor {
        CommentWithAuthor {
            comment: Comment {
                comment_id: CommentId::from_uuid(self.comment_id),
                post_id: PostId::from_uuid(self.post_id),
                author_id: UserId::from_uuid(self.author_id),
                text: CommentText::from_db(self.text),
                created_at: self.created_at,
            },
            author_name: self.author_name,
        }
    }
}
