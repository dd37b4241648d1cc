use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::timestamp;
use crate::error::DomainError;

/// Longest title or category the `posts` table accepts.
pub const MAX_LABEL_CHARS: usize = 255;

/// Post entity - represents a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post with a generated id and matching timestamps.
    pub fn new(draft: PostDraft) -> Self {
        let now = timestamp::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The caller-supplied fields of a post, used for both create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
}

impl PostDraft {
    /// Check the required labels are present and fit their columns.
    pub fn validate(&self) -> Result<(), DomainError> {
        check_label("title", &self.title)?;
        check_label("category", &self.category)
    }
}

fn check_label(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > MAX_LABEL_CHARS {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {MAX_LABEL_CHARS} characters"
        )));
    }
    Ok(())
}
