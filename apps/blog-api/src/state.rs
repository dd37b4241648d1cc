//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::PostService;
use blog_core::ports::PostRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
}

impl AppState {
    /// Build the application state over the given post storage.
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        tracing::info!("Application state initialized");
        Self {
            posts: PostService::new(repo),
        }
    }
}
