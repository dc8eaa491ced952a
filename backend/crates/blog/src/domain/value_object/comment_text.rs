//! Comment Text Value Object

use std::fmt;

use platform::sanitize::SanitizedContent;

use crate::error::{BlogError, BlogResult};

/// Maximum comment length, measured after sanitization
pub const COMMENT_MAX_LENGTH: usize = 1000;

/// Sanitized comment body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentText(SanitizedContent);

impl CommentText {
    pub fn new(raw: &str) -> BlogResult<Self> {
        let sanitized = SanitizedContent::sanitize(raw.trim());

        if sanitized.as_str().trim().is_empty() {
            return Err(BlogError::Validation("Comment cannot be empty".to_string()));
        }

        let length = sanitized.as_str().chars().count();
        if length > COMMENT_MAX_LENGTH {
            return Err(BlogError::Validation(format!(
                "Comment must be at most {} characters",
                COMMENT_MAX_LENGTH
            )));
        }

        Ok(Self(sanitized))
    }

    pub fn from_db(text: String) -> Self {
        Self(SanitizedContent::from_trusted(text))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CommentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_is_sanitized() {
        let text = CommentText::new("<p>Nice <script>alert(1)</script>post</p>").unwrap();
        assert_eq!(text.as_str(), "<p>Nice post</p>");
    }

    #[test]
    fn test_empty_after_sanitization() {
        assert!(CommentText::new("").is_err());
        assert!(CommentText::new("<script>alert(1)</script>").is_err());
    }

    #[test]
    fn test_length_limit() {
        assert!(CommentText::new(&"a".repeat(COMMENT_MAX_LENGTH)).is_ok());
        assert!(CommentText::new(&"a".repeat(COMMENT_MAX_LENGTH + 1)).is_err());
    }
}
