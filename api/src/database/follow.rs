use chrono::{DateTime, Utc};

/// A directed follow edge. `(follower_id, following_id)` is unique at the
/// database level and `follower_id != following_id` always holds.
#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct Follow {
    pub id: i64,
    pub follower_id: i64,
    pub following_id: i64,
    pub created_at: DateTime<Utc>,
}
