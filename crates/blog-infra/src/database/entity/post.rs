//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::RepoError;
use blog_core::domain::{Post, tags, timestamp};

/// One row of the `posts` table. Tags and timestamps are stored as text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category: String,
    #[sea_orm(column_type = "Text")]
    pub tags: String,
    #[sea_orm(column_type = "Text")]
    pub created_at: String,
    #[sea_orm(column_type = "Text")]
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Decode a stored row into a domain Post.
impl TryFrom<Model> for Post {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let tags = tags::decode(&model.tags)
            .map_err(|e| RepoError::Codec(format!("tags of post {}: {}", model.id, e)))?;
        let created_at = timestamp::parse(&model.created_at)
            .map_err(|e| RepoError::Codec(format!("created_at of post {}: {}", model.id, e)))?;
        let updated_at = timestamp::parse(&model.updated_at)
            .map_err(|e| RepoError::Codec(format!("updated_at of post {}: {}", model.id, e)))?;

        Ok(Self {
            id: model.id,
            title: model.title,
            content: model.content,
            category: model.category,
            tags,
            created_at,
            updated_at,
        })
    }
}

/// Encode a domain Post as a fully set ActiveModel.
impl TryFrom<&Post> for ActiveModel {
    type Error = RepoError;

    fn try_from(post: &Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Set(post.id.clone()),
            title: Set(post.title.clone()),
            content: Set(post.content.clone()),
            category: Set(post.category.clone()),
            tags: Set(encode_tags(&post.tags)?),
            created_at: Set(timestamp::format(&post.created_at)),
            updated_at: Set(timestamp::format(&post.updated_at)),
        })
    }
}

pub(crate) fn encode_tags(values: &[String]) -> Result<String, RepoError> {
    tags::encode(values).map_err(|e| RepoError::Codec(format!("tags: {e}")))
}
