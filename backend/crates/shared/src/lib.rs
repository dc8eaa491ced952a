//! Shared Kernel - vocabulary shared by every blog crate
//!
//! Only things whose meaning is identical across `auth` and `blog` live here:
//! - The unified [`error::app_error::AppError`] and its [`error::kind::ErrorKind`]
//! - Typed entity identifiers ([`id::UserId`], [`id::PostId`], [`id::CommentId`])

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
