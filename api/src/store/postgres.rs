use std::sync::Arc;

use chrono::NaiveDate;

use super::{ContentEntry, NewContentItem, SocialStore, StoreError, StoreResult, UserStats};
use crate::database::{ContentItem, Follow, User};

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

pub struct PgStore {
    db: Arc<sqlx::PgPool>,
}

impl PgStore {
    pub fn new(db: Arc<sqlx::PgPool>) -> Self {
        Self { db }
    }
}

fn map_constraint_err(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::UniqueViolation
        }
        _ => StoreError::Database(err),
    }
}

#[async_trait::async_trait]
impl SocialStore for PgStore {
    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let user = sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        Ok(user)
    }

    async fn user_stats(&self, id: i64) -> StoreResult<UserStats> {
        let (followers, following, content): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM follows WHERE following_id = $1),
                (SELECT COUNT(*) FROM follows WHERE follower_id = $1),
                (SELECT COUNT(*) FROM content_items WHERE owner_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(UserStats {
            followers,
            following,
            content,
        })
    }

    async fn is_following(&self, follower: i64, following: i64) -> StoreResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM follows WHERE follower_id = $1 AND following_id = $2)",
        )
        .bind(follower)
        .bind(following)
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(exists)
    }

    async fn insert_follow(&self, follower: i64, following: i64) -> StoreResult<Follow> {
        sqlx::query_as(
            "INSERT INTO follows (follower_id, following_id) VALUES ($1, $2) RETURNING *",
        )
        .bind(follower)
        .bind(following)
        .fetch_one(self.db.as_ref())
        .await
        .map_err(map_constraint_err)
    }

    async fn delete_follow(&self, follower: i64, following: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM follows WHERE follower_id = $1 AND following_id = $2")
            .bind(follower)
            .bind(following)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn followers_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as(
            r#"
            SELECT users.*
            FROM follows
            INNER JOIN users ON users.id = follows.follower_id
            WHERE follows.following_id = $1
            ORDER BY follows.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(subject)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(users)
    }

    async fn following_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as(
            r#"
            SELECT users.*
            FROM follows
            INNER JOIN users ON users.id = follows.following_id
            WHERE follows.follower_id = $1
            ORDER BY follows.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(subject)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(users)
    }

    async fn search_users(&self, term: &str, exclude: i64) -> StoreResult<Vec<User>> {
        // LIKE wildcards in the term must match literally.
        let term = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");

        let users =
            sqlx::query_as("SELECT * FROM users WHERE username ILIKE '%' || $1 || '%' AND id != $2")
                .bind(term)
                .bind(exclude)
                .fetch_all(self.db.as_ref())
                .await?;

        Ok(users)
    }

    async fn unfollowed_users(&self, viewer: i64) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as(
            r#"
            SELECT *
            FROM users
            WHERE id != $1
            AND id NOT IN (SELECT following_id FROM follows WHERE follower_id = $1)
            "#,
        )
        .bind(viewer)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(users)
    }

    async fn insert_content(&self, owner: i64, item: NewContentItem) -> StoreResult<ContentItem> {
        let mut tx = self.db.begin().await?;

        let item: ContentItem = sqlx::query_as(
            r#"
            INSERT INTO content_items (owner_id, category, description, file_path, file_size, duration_secs)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(owner)
        .bind(&item.category)
        .bind(&item.description)
        .bind(&item.file_path)
        .bind(item.file_size)
        .bind(item.duration_secs)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE users SET last_activity_date = $1 WHERE id = $2")
            .bind(item.created_at.date_naive())
            .bind(owner)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(item)
    }

    async fn delete_content(&self, owner: i64, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM content_items WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(self.db.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn content_by_id(&self, id: i64) -> StoreResult<Option<ContentEntry>> {
        let entry = sqlx::query_as(
            r#"
            SELECT content_items.*, users.username
            FROM content_items
            INNER JOIN users ON users.id = content_items.owner_id
            WHERE content_items.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.as_ref())
        .await?;

        Ok(entry)
    }

    async fn content_of(&self, owner: i64, offset: i64, limit: i64) -> StoreResult<Vec<ContentItem>> {
        let items = sqlx::query_as(
            r#"
            SELECT *
            FROM content_items
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(items)
    }

    async fn content_dates(&self, owner: i64) -> StoreResult<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar(
            r#"
            SELECT DISTINCT (created_at AT TIME ZONE 'UTC')::date AS post_date
            FROM content_items
            WHERE owner_id = $1
            ORDER BY post_date DESC
            "#,
        )
        .bind(owner)
        .fetch_all(self.db.as_ref())
        .await?;

        Ok(dates)
    }

    async fn has_content_on(&self, owner: i64, date: NaiveDate) -> StoreResult<bool> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1
                FROM content_items
                WHERE owner_id = $1
                AND (created_at AT TIME ZONE 'UTC')::date = $2
            )
            "#,
        )
        .bind(owner)
        .bind(date)
        .fetch_one(self.db.as_ref())
        .await?;

        Ok(exists)
    }

    async fn feed_page(
        &self,
        viewer: i64,
        category: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<ContentEntry>> {
        let entries = if let Some(category) = category {
            sqlx::query_as(
                r#"
                SELECT content_items.*, users.username
                FROM content_items
                INNER JOIN users ON users.id = content_items.owner_id
                WHERE content_items.owner_id != $1
                AND content_items.category = $2
                ORDER BY content_items.created_at DESC
                LIMIT $3 OFFSET $4
                "#,
            )
            .bind(viewer)
            .bind(category)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db.as_ref())
            .await?
        } else {
            sqlx::query_as(
                r#"
                SELECT content_items.*, users.username
                FROM content_items
                INNER JOIN users ON users.id = content_items.owner_id
                WHERE content_items.owner_id != $1
                ORDER BY content_items.created_at DESC
                LIMIT $2 OFFSET $3
                "#,
            )
            .bind(viewer)
            .bind(limit)
            .bind(offset)
            .fetch_all(self.db.as_ref())
            .await?
        };

        Ok(entries)
    }
}
