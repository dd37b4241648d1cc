//! # Blog Core
//!
//! The domain layer of the blog posts service.
//! This crate contains the post entity, its column codecs and the five post
//! operations, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
pub use services::PostService;
