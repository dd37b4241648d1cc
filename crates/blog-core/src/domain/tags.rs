//! JSON text codec for the `tags` column.
//!
//! Tags are stored as a JSON array of strings in a single text column.
//! Order and duplicates survive a round trip, and an empty list is stored
//! as `[]`. A stored `null` or any non-array value fails to decode.

/// Encode tags as JSON array text.
pub fn encode(tags: &[String]) -> Result<String, serde_json::Error> {
    serde_json::to_string(tags)
}

/// Decode JSON array text back into tags.
pub fn decode(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(raw)
}
