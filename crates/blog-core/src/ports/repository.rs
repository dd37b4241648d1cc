use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Post, PostDraft};
use crate::error::RepoError;

/// Post repository - the storage seam for the five post operations.
///
/// Implementations own the tag and timestamp column encoding. Every method
/// is a single storage round trip and never retries.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts in storage order.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Find a post by its id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError>;

    /// Insert a fully populated post.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Replace the caller-editable fields of the post with `id` and stamp
    /// `updated_at`. The stored `id` and `created_at` are never touched, and
    /// `updated_at` is written exactly as given.
    ///
    /// Returns `RepoError::NotFound` when no row matched.
    async fn update(
        &self,
        id: &str,
        draft: PostDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError>;

    /// Delete a post by its id. Returns `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: &str) -> Result<(), RepoError>;
}
