//! Post Draft
//!
//! Validated contents of a post as submitted by the administrator.
//! Title and subtitle are sanitized; the body is trusted admin HTML and is
//! kept verbatim.

use platform::sanitize::SanitizedContent;

use crate::domain::value_object::image_url::ImageUrl;
use crate::error::{BlogError, BlogResult};

/// Maximum title/subtitle length (`blog_posts.title`, `blog_posts.subtitle`)
pub const HEADING_MAX_LENGTH: usize = 250;

#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: SanitizedContent,
    pub subtitle: SanitizedContent,
    pub img_url: ImageUrl,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: &str, subtitle: &str, img_url: &str, body: String) -> BlogResult<Self> {
        let title = heading("Title", title)?;
        let subtitle = heading("Subtitle", subtitle)?;
        let img_url = ImageUrl::new(img_url)?;

        if body.trim().is_empty() {
            return Err(BlogError::Validation("Body is required".to_string()));
        }

        Ok(Self {
            title,
            subtitle,
            img_url,
            body,
        })
    }
}

fn heading(field: &str, raw: &str) -> BlogResult<SanitizedContent> {
    let sanitized = SanitizedContent::sanitize(raw.trim());

    if sanitized.as_str().trim().is_empty() {
        return Err(BlogError::Validation(format!("{field} is required")));
    }

    if sanitized.as_str().chars().count() > HEADING_MAX_LENGTH {
        return Err(BlogError::Validation(format!(
            "{field} must be at most {HEADING_MAX_LENGTH} characters"
        )));
    }

    Ok(sanitized)
}
