//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use blog_core::RepoError;
use blog_core::domain::{Post, PostDraft, timestamp};
use blog_core::ports::PostRepository;

use super::entity::post::{self, Entity as PostEntity, encode_tags};
use super::error::classify;

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        // RFC 3339 text with a fixed precision sorts chronologically.
        let rows = PostEntity::find()
            .order_by_asc(post::Column::CreatedAt)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(classify)?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, RepoError> {
        tracing::debug!(post_id = %id, "Finding post by id");

        let row = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(classify)?;

        row.map(Post::try_from).transpose()
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let active_model = post::ActiveModel::try_from(&post)?;

        PostEntity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(classify)?;

        Ok(post)
    }

    async fn update(
        &self,
        id: &str,
        draft: PostDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Post, RepoError> {
        // id and created_at stay NotSet so the statement never writes them.
        let changes = post::ActiveModel {
            title: Set(draft.title),
            content: Set(draft.content),
            category: Set(draft.category),
            tags: Set(encode_tags(&draft.tags)?),
            updated_at: Set(timestamp::format(&updated_at)),
            ..Default::default()
        };

        let txn = self.db.begin().await.map_err(classify)?;

        let result = PostEntity::update_many()
            .set(changes)
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(classify)?;

        // UPDATE reports success for a missing id; only the row count tells.
        if result.rows_affected == 0 {
            txn.rollback().await.map_err(classify)?;
            return Err(RepoError::NotFound);
        }

        let stored = PostEntity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(classify)?
            .ok_or(RepoError::NotFound)?;

        // An undecodable row rolls back when `txn` drops.
        let post = Post::try_from(stored)?;

        txn.commit().await.map_err(classify)?;

        Ok(post)
    }

    async fn delete(&self, id: &str) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(classify)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
