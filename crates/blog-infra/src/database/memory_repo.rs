//! In-memory post repository - used when the postgres feature is off and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use blog_core::RepoError;
use blog_core::domain::{Post, PostDraft};
use blog_core::ports::PostRepository;

/// In-memory post store keeping insertion order.
///
/// Note: Data is lost on process restart.
pub struct InMemoryPostRepository {
    rows: RwLock<Vec<Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.id == post.id) {
            return Err(RepoError::Constraint(format!("duplicate post id {}", post.id)));
        }
        rows.push(post.clone());
        Ok(post)
    }

    async fn update(
        &self,
        id: &str,
        draft: PostDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError> {
        let mut rows = self.rows.write().await;
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
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);

        if rows.len() == before {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            content: String::new(),
            category: "tech".to_string(),
            tags: vec!["b".to_string(), "a".to_string(), "b".to_string()],
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(draft("One"))).await.unwrap();

        let found = repo.find_by_id(&post.id).await.unwrap();
        assert_eq!(found, Some(post));
        assert_eq!(repo.find_by_id("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let repo = InMemoryPostRepository::new();
        let first = repo.insert(Post::new(draft("One"))).await.unwrap();
        let second = repo.insert(Post::new(draft("Two"))).await.unwrap();

        let ids: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_a_constraint_violation() {
        let repo = InMemoryPostRepository::new();
        let post = Post::new(draft("One"));
        repo.insert(post.clone()).await.unwrap();
        assert!(matches!(
            repo.insert(post).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_rows() {
        let repo = InMemoryPostRepository::new();
        assert!(matches!(
            repo.update("abc", draft("One"), Utc::now()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.delete("abc").await, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_keeps_created_at() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(draft("One"))).await.unwrap();

        let later = post.created_at + chrono::Duration::seconds(60);
        let updated = repo.update(&post.id, draft("Two"), later).await.unwrap();
        assert_eq!(updated.title, "Two");
        assert_eq!(updated.updated_at, later);
        assert_eq!(updated.created_at, post.created_at);
    }
}
