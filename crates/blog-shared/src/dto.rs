//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Body of a create or update request.
///
/// `content` and `tags` may be omitted. Any other field, including `id`,
/// `createdAt` and `updatedAt`, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PostRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A post as returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_optional_fields() {
        let req: PostRequest =
            serde_json::from_str(r#"{"title":"Hello","category":"tech"}"#).unwrap();
        assert_eq!(req.content, "");
        assert!(req.tags.is_empty());
    }

    #[test]
    fn test_request_ignores_server_owned_fields() {
        let req: PostRequest = serde_json::from_str(
            r#"{"id":"x","title":"Hello","category":"tech","createdAt":"then","tags":["a"]}"#,
        )
        .unwrap();
        assert_eq!(req.title, "Hello");
        assert_eq!(req.tags, vec!["a"]);
    }

    #[test]
    fn test_request_requires_title_and_category() {
        assert!(serde_json::from_str::<PostRequest>(r#"{"category":"tech"}"#).is_err());
        assert!(serde_json::from_str::<PostRequest>(r#"{"title":"Hello"}"#).is_err());
    }

    #[test]
    fn test_response_uses_camel_case_timestamps() {
        let response = PostResponse {
            id: "1".to_string(),
            title: "Hello".to_string(),
            content: String::new(),
            category: "tech".to_string(),
            tags: Vec::new(),
            created_at: "2026-10-16T09:30:00.000000Z".to_string(),
            updated_at: "2026-10-16T09:30:00.000000Z".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["createdAt"], "2026-10-16T09:30:00.000000Z");
        assert_eq!(value["tags"], serde_json::json!([]));
        assert!(value.get("created_at").is_none());
    }
}
