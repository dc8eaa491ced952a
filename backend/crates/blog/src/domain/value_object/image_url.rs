//! Image URL Value Object
//!
//! Header image of a post. Only absolute `https` URLs are accepted, and the
//! value still goes through the content sanitizer before it is stored.

use std::fmt;

use platform::sanitize::SanitizedContent;

use crate::error::{BlogError, BlogResult};

/// Maximum stored length (`blog_posts.img_url`)
pub const IMAGE_URL_MAX_LENGTH: usize = 250;

const HTTPS_PREFIX: &str = "https://";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrl(SanitizedContent);

impl ImageUrl {
    pub fn new(raw: &str) -> BlogResult<Self> {
        let url = raw.trim();

        if url.is_empty() {
            return Err(BlogError::Validation("Image URL is required".to_string()));
        }

        if !Self::is_valid(url) {
            return Err(BlogError::Validation(
                "Image URL must be an absolute https URL".to_string(),
            ));
        }

        let sanitized = SanitizedContent::sanitize(url);
        if sanitized.as_str().chars().count() > IMAGE_URL_MAX_LENGTH {
            return Err(BlogError::Validation(format!(
                "Image URL must be at most {} characters",
                IMAGE_URL_MAX_LENGTH
            )));
        }

        Ok(Self(sanitized))
    }

    fn is_valid(url: &str) -> bool {
        let Some(prefix) = url.get(..HTTPS_PREFIX.len()) else {
            return false;
        };
        if !prefix.eq_ignore_ascii_case(HTTPS_PREFIX) {
            return false;
        }

        let rest = &url[HTTPS_PREFIX.len()..];
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        if host.is_empty() || host.contains('@') {
            return false;
        }

        !url.chars()
            .any(|c| c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>'))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(url: String) -> Self {
        Self(SanitizedContent::from_trusted(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
