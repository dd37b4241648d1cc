//! # Blog Shared
//!
//! Wire types of the blog posts API.
//! Kept free of server dependencies so clients can reuse them.

pub mod dto;
pub mod response;

pub use dto::{PostRequest, PostResponse};
pub use response::ErrorResponse;
