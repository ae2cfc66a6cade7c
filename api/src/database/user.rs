use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, Default, PartialEq, sqlx::FromRow, serde::Serialize)]
pub struct User {
    /// The unique identifier for the user.
    pub id: i64,
    /// The display handle of the user.
    pub username: String,
    /// The time the user was created.
    pub created_at: DateTime<Utc>,
    /// The calendar date (UTC) of the user's most recent content item.
    /// Denormalized from the content timeline; refreshed on every insert,
    /// never read by the gate or streak logic.
    pub last_activity_date: Option<NaiveDate>,
}
