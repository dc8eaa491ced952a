pub mod comment_text;
pub mod image_url;
pub mod post_draft;
