//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the security primitives the blog is built on:
//! - Password hashing (PBKDF2-HMAC-SHA512, salted, deliberately slow)
//! - Identity hashing (unsalted SHA-512 lookup keys for email addresses)
//! - HTML sanitization (allow-list filtering of user supplied markup)
//! - Cryptographic utilities (SHA-2, HMAC, Base64, constant-time comparison)
//! - Cookie management
//! - Secret loading from the environment
//!
//! Everything here is synchronous and free of shared mutable state, so it
//! can be called from any number of request tasks concurrently.

pub mod config;
pub mod cookie;
pub mod crypto;
pub mod identity;
pub mod password;
pub mod sanitize;
