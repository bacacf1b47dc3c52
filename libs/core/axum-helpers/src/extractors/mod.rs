//! Custom extractors for the site's handlers.
//!
//! Rejections are [`AppError`](crate::errors::AppError)s so they end up on
//! the shared error page.

pub mod uuid_path;

pub use uuid_path::UuidPath;
