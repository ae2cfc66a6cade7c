use chrono::NaiveDate;

use crate::database::{ContentItem, Follow, User};

pub mod postgres;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. This is the authoritative
    /// guard against duplicate follow edges; callers translate it into their
    /// own conflict error instead of trusting a pre-check.
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Live aggregates for one user. Always recomputed from the row sets, never
/// cached, so they cannot drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    pub followers: i64,
    pub following: i64,
    pub content: i64,
}

/// Metadata for a content item about to be recorded. The content store owns
/// the bytes behind `file_path`.
#[derive(Debug, Clone)]
pub struct NewContentItem {
    pub category: String,
    pub description: String,
    pub file_path: String,
    pub file_size: i64,
    pub duration_secs: i32,
}

/// A content item joined with its owner's username.
#[derive(Debug, Clone, sqlx::FromRow, serde::Serialize)]
pub struct ContentEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub item: ContentItem,
    pub username: String,
}

/// The read/write units of work the social core needs from the relational
/// store. One logical operation per method; every aggregate is computed live.
#[async_trait::async_trait]
pub trait SocialStore: Send + Sync {
    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>>;

    async fn user_stats(&self, id: i64) -> StoreResult<UserStats>;

    async fn is_following(&self, follower: i64, following: i64) -> StoreResult<bool>;

    /// Inserts a follow edge. Fails with [`StoreError::UniqueViolation`] when
    /// the edge already exists.
    async fn insert_follow(&self, follower: i64, following: i64) -> StoreResult<Follow>;

    /// Removes a follow edge, returning whether one existed.
    async fn delete_follow(&self, follower: i64, following: i64) -> StoreResult<bool>;

    /// Users following `subject`, ordered by edge creation time descending.
    async fn followers_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>>;

    /// Users `subject` follows, ordered by edge creation time descending.
    async fn following_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>>;

    /// Users whose username contains `term` (case-insensitive), excluding
    /// `exclude`. Unordered; the search ranker sorts.
    async fn search_users(&self, term: &str, exclude: i64) -> StoreResult<Vec<User>>;

    /// Users the viewer does not follow and is not, unordered.
    async fn unfollowed_users(&self, viewer: i64) -> StoreResult<Vec<User>>;

    /// Inserts a content item and refreshes the owner's
    /// `last_activity_date` in the same transaction.
    async fn insert_content(&self, owner: i64, item: NewContentItem) -> StoreResult<ContentItem>;

    /// Deletes a content item if it belongs to `owner`, returning whether a
    /// row was removed.
    async fn delete_content(&self, owner: i64, id: i64) -> StoreResult<bool>;

    async fn content_by_id(&self, id: i64) -> StoreResult<Option<ContentEntry>>;

    /// `owner`'s items, newest first.
    async fn content_of(&self, owner: i64, offset: i64, limit: i64) -> StoreResult<Vec<ContentItem>>;

    /// Distinct calendar dates (UTC) on which `owner` posted, newest first.
    async fn content_dates(&self, owner: i64) -> StoreResult<Vec<NaiveDate>>;

    async fn has_content_on(&self, owner: i64, date: NaiveDate) -> StoreResult<bool>;

    /// Everyone else's items, optionally filtered by exact category, newest
    /// first.
    async fn feed_page(
        &self,
        viewer: i64,
        category: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<ContentEntry>>;
}
