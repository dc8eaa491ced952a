//! Blog Post Entity

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{PostId, UserId};
use platform::sanitize::SanitizedContent;

use crate::domain::value_object::{image_url::ImageUrl, post_draft::PostDraft};

/// Display format of the publication date ("August 24, 2023")
pub const PUBLISHED_ON_FORMAT: &str = "%B %d, %Y";

#[derive(Debug, Clone)]
pub struct BlogPost {
    pub post_id: PostId,
    /// Unique across posts
    pub title: SanitizedContent,
    pub subtitle: SanitizedContent,
    pub img_url: ImageUrl,
    /// Trusted admin HTML, stored verbatim
    pub body: String,
    pub author_id: UserId,
    pub published_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    /// Publish a new post today
    pub fn new(draft: PostDraft, author_id: UserId) -> Self {
        let now = Utc::now();

        Self {
            post_id: PostId::new(),
            title: draft.title,
            subtitle: draft.subtitle,
            img_url: draft.img_url,
            body: draft.body,
            author_id,
            published_on: now.date_naive(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the contents, keeping id and publication date
    ///
    /// The editor becomes the author.
    pub fn revise(&mut self, draft: PostDraft, editor_id: UserId) {
        self.title = draft.title;
        self.subtitle = draft.subtitle;
        self.img_url = draft.img_url;
        self.body = draft.body;
        self.author_id = editor_id;
        self.updated_at = Utc::now();
    }

    pub fn published_on_display(&self) -> String {
        self.published_on.format(PUBLISHED_ON_FORMAT).to_string()
    }
}

/// A post joined with its author's display name
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: BlogPost,
    pub author_name: String,
}
