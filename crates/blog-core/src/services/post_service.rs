//! Post use-case service.
//!
//! Owns input validation, id and timestamp assignment, and the mapping of
//! repository failures onto `DomainError`. Storage failures are wrapped with
//! the operation and post id before they leave this module.

use std::sync::Arc;

use crate::domain::{Post, PostDraft, timestamp};
use crate::error::{DomainError, RepoError};
use crate::ports::PostRepository;

const ENTITY: &str = "post";

/// The five post operations over an injected repository.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts in storage order. Empty when there are none.
    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self
            .repo
            .find_all()
            .await
            .map_err(|e| internal("list posts", None, e))?;

        tracing::debug!(count = posts.len(), "Listed posts");
        Ok(posts)
    }

    /// Validate the draft and persist it as a new post.
    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        draft.validate()?;

        let post = Post::new(draft);
        let id = post.id.clone();
        let created = self
            .repo
            .insert(post)
            .await
            .map_err(|e| internal("create post", Some(&id), e))?;

        tracing::info!(post_id = %created.id, "Post created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Post, DomainError> {
        match self.repo.find_by_id(id).await {
            Ok(Some(post)) => Ok(post),
            Ok(None) => Err(not_found(id)),
            Err(e) => Err(classify("get post", id, e)),
        }
    }

    /// Full replacement of the editable fields; `updated_at` is refreshed.
    pub async fn update(&self, id: &str, draft: PostDraft) -> Result<Post, DomainError> {
        draft.validate()?;

        let updated = self
            .repo
            .update(id, draft, timestamp::now())
            .await
            .map_err(|e| classify("update post", id, e))?;

        tracing::info!(post_id = %id, "Post updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.repo
            .delete(id)
            .await
            .map_err(|e| classify("delete post", id, e))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }
}

fn not_found(id: &str) -> DomainError {
    tracing::debug!(post_id = %id, "Post not found");
    DomainError::NotFound {
        entity_type: ENTITY,
        id: id.to_string(),
    }
}

/// Map a repository failure for an operation addressed by id.
fn classify(operation: &'static str, id: &str, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => not_found(id),
        other => internal(operation, Some(id), other),
    }
}

fn internal(operation: &'static str, id: Option<&str>, err: RepoError) -> DomainError {
    tracing::error!(operation, post_id = ?id, error = %err, "Post operation failed");
    match id {
        Some(id) => DomainError::Internal(format!("{operation} {id}: {err}")),
        None => DomainError::Internal(format!("{operation}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use tokio::sync::Mutex;

    /// Vec-backed repository that can be switched into a failing mode.
    #[derive(Default)]
    struct StubRepository {
        rows: Mutex<Vec<Post>>,
        failure: Option<fn() -> RepoError>,
    }

    impl StubRepository {
        fn failing(failure: fn() -> RepoError) -> Self {
            Self {
                rows: Mutex::default(),
                failure: Some(failure),
            }
        }

        fn check(&self) -> Result<(), RepoError> {
            match self.failure {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl PostRepository for StubRepository {
        async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
            self.check()?;
            Ok(self.rows.lock().await.clone())
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
            self.check()?;
            Ok(self.rows.lock().await.iter().find(|p| p.id == id).cloned())
        }

        async fn insert(&self, post: Post) -> Result<Post, RepoError> {
            self.check()?;
            self.rows.lock().await.push(post.clone());
            Ok(post)
        }

        async fn update(
            &self,
            id: &str,
            draft: PostDraft,
            updated_at: DateTime<Utc>,
        ) -> Result<Post, RepoError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let post = rows
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(RepoError::NotFound)?;
            post.title = draft.title;
            post.content = draft.content;
            post.category = draft.category;
            post.tags = draft.tags;
            post.updated_at = updated_at;
            Ok(post.clone())
        }

        async fn delete(&self, id: &str) -> Result<(), RepoError> {
            self.check()?;
            let mut rows = self.rows.lock().await;
            let before = rows.len();
            rows.retain(|p| p.id != id);
            if rows.len() == before {
                return Err(RepoError::NotFound);
            }
            Ok(())
        }
    }

    fn service() -> PostService {
        PostService::new(Arc::new(StubRepository::default()))
    }

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: "World".to_string(),
            category: "tech".to_string(),
            tags: vec!["go".to_string(), "api".to_string()],
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_post() {
        let service = service();
        let created = service.create(draft("Hello")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let result = service().create(draft("")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let service = service();
        let created = service.create(draft("Hello")).await.unwrap();

        let mut replacement = draft("Hello again");
        replacement.tags.clear();
        let updated = service.update(&created.id, replacement).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.title, "Hello again");
        assert!(updated.tags.is_empty());
    }

    #[tokio::test]
    async fn test_update_validates_before_touching_storage() {
        let service = PostService::new(Arc::new(StubRepository::failing(|| {
            RepoError::Connection("down".to_string())
        })));
        let result = service.update("abc", draft(" ")).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found_for_every_operation() {
        let service = service();
        assert!(matches!(
            service.get("abc").await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.update("abc", draft("Hello")).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete("abc").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_after_delete_is_not_found() {
        let service = service();
        let created = service.create(draft("Hello")).await.unwrap();
        service.delete(&created.id).await.unwrap();
        assert!(matches!(
            service.get(&created.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_storage_failures_are_internal_with_context() {
        let service = PostService::new(Arc::new(StubRepository::failing(|| {
            RepoError::Codec("tags: expected a sequence".to_string())
        })));

        match service.get("abc").await {
            Err(DomainError::Internal(detail)) => {
                assert!(detail.starts_with("get post abc:"), "{detail}");
            }
            other => panic!("expected internal error, got {other:?}"),
        }
        assert!(matches!(
            service.list().await,
            Err(DomainError::Internal(_))
        ));
        assert!(matches!(
            service.create(draft("Hello")).await,
            Err(DomainError::Internal(_))
        ));
    }

    #[tokio::test]
    async fn test_list_on_empty_store_is_empty() {
        assert!(service().list().await.unwrap().is_empty());
    }
}
