use chrono::{DateTime, Utc};

/// A posted content item. The raw bytes live in the content store; this is
/// only the metadata the core consumes. Rows are never mutated and are
/// deleted by explicit owner action only.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct ContentItem {
    pub id: i64,
    pub owner_id: i64,
    /// Free-form category string, matched exactly by the feed filter.
    pub category: String,
    pub description: String,
    pub file_path: String,
    pub file_size: i64,
    pub duration_secs: i32,
    pub created_at: DateTime<Utc>,
}
