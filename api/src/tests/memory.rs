//! An in-memory [`SocialStore`] used by the unit tests. It honors the same
//! ordering and uniqueness contracts as the real store so the core logic can
//! be exercised without a database.

use std::sync::Mutex;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::database::{ContentItem, Follow, User};
use crate::store::{ContentEntry, NewContentItem, SocialStore, StoreError, StoreResult, UserStats};

#[derive(Default)]
struct Inner {
    users: Vec<User>,
    follows: Vec<Follow>,
    content: Vec<ContentItem>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn timestamp(seq: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::seconds(seq)
    }

    pub fn add_user(&self, username: &str) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        inner.users.push(User {
            id,
            username: username.to_string(),
            created_at: Self::timestamp(id),
            last_activity_date: None,
        });

        id
    }

    /// Seeds a content item dated `date` without touching
    /// `last_activity_date`, so the tests can set up stale denormalized
    /// state explicitly.
    pub fn add_content_on(&self, owner: i64, category: &str, date: NaiveDate) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        let created_at = Utc
            .from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
            + chrono::Duration::seconds(id);

        inner.content.push(ContentItem {
            id,
            owner_id: owner,
            category: category.to_string(),
            description: format!("item {id}"),
            file_path: format!("/store/{id}.bin"),
            file_size: 1024,
            duration_secs: 30,
            created_at,
        });

        id
    }

    pub fn set_last_activity(&self, user: i64, date: Option<NaiveDate>) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(user) = inner.users.iter_mut().find(|u| u.id == user) {
            user.last_activity_date = date;
        }
    }

    pub fn last_activity(&self, user: i64) -> Option<NaiveDate> {
        let inner = self.inner.lock().unwrap();
        inner
            .users
            .iter()
            .find(|u| u.id == user)
            .and_then(|u| u.last_activity_date)
    }

    fn username_of(inner: &Inner, id: i64) -> String {
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl SocialStore for MemoryStore {
    async fn user_by_id(&self, id: i64) -> StoreResult<Option<User>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_stats(&self, id: i64) -> StoreResult<UserStats> {
        let inner = self.inner.lock().unwrap();
        Ok(UserStats {
            followers: inner.follows.iter().filter(|f| f.following_id == id).count() as i64,
            following: inner.follows.iter().filter(|f| f.follower_id == id).count() as i64,
            content: inner.content.iter().filter(|c| c.owner_id == id).count() as i64,
        })
    }

    async fn is_following(&self, follower: i64, following: i64) -> StoreResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .follows
            .iter()
            .any(|f| f.follower_id == follower && f.following_id == following))
    }

    async fn insert_follow(&self, follower: i64, following: i64) -> StoreResult<Follow> {
        let mut inner = self.inner.lock().unwrap();

        if inner
            .follows
            .iter()
            .any(|f| f.follower_id == follower && f.following_id == following)
        {
            return Err(StoreError::UniqueViolation);
        }

        inner.next_id += 1;
        let id = inner.next_id;

        let edge = Follow {
            id,
            follower_id: follower,
            following_id: following,
            created_at: Self::timestamp(id),
        };
        inner.follows.push(edge.clone());

        Ok(edge)
    }

    async fn delete_follow(&self, follower: i64, following: i64) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.follows.len();
        inner
            .follows
            .retain(|f| !(f.follower_id == follower && f.following_id == following));
        Ok(inner.follows.len() != before)
    }

    async fn followers_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();

        let mut edges: Vec<&Follow> = inner
            .follows
            .iter()
            .filter(|f| f.following_id == subject)
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(edges
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|f| inner.users.iter().find(|u| u.id == f.follower_id).cloned())
            .collect())
    }

    async fn following_of(&self, subject: i64, offset: i64, limit: i64) -> StoreResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();

        let mut edges: Vec<&Follow> = inner
            .follows
            .iter()
            .filter(|f| f.follower_id == subject)
            .collect();
        edges.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(edges
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .filter_map(|f| inner.users.iter().find(|u| u.id == f.following_id).cloned())
            .collect())
    }

    async fn search_users(&self, term: &str, exclude: i64) -> StoreResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();
        let term = term.to_lowercase();

        Ok(inner
            .users
            .iter()
            .filter(|u| u.id != exclude && u.username.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn unfollowed_users(&self, viewer: i64) -> StoreResult<Vec<User>> {
        let inner = self.inner.lock().unwrap();

        Ok(inner
            .users
            .iter()
            .filter(|u| {
                u.id != viewer
                    && !inner
                        .follows
                        .iter()
                        .any(|f| f.follower_id == viewer && f.following_id == u.id)
            })
            .cloned()
            .collect())
    }

    async fn insert_content(&self, owner: i64, item: NewContentItem) -> StoreResult<ContentItem> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;

        let created_at = Utc::now();
        let item = ContentItem {
            id,
            owner_id: owner,
            category: item.category,
            description: item.description,
            file_path: item.file_path,
            file_size: item.file_size,
            duration_secs: item.duration_secs,
            created_at,
        };
        inner.content.push(item.clone());

        if let Some(user) = inner.users.iter_mut().find(|u| u.id == owner) {
            user.last_activity_date = Some(created_at.date_naive());
        }

        Ok(item)
    }

    async fn delete_content(&self, owner: i64, id: i64) -> StoreResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.content.len();
        inner.content.retain(|c| !(c.id == id && c.owner_id == owner));
        Ok(inner.content.len() != before)
    }

    async fn content_by_id(&self, id: i64) -> StoreResult<Option<ContentEntry>> {
        let inner = self.inner.lock().unwrap();

        Ok(inner.content.iter().find(|c| c.id == id).map(|c| ContentEntry {
            item: c.clone(),
            username: Self::username_of(&inner, c.owner_id),
        }))
    }

    async fn content_of(&self, owner: i64, offset: i64, limit: i64) -> StoreResult<Vec<ContentItem>> {
        let inner = self.inner.lock().unwrap();

        let mut items: Vec<ContentItem> = inner
            .content
            .iter()
            .filter(|c| c.owner_id == owner)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(items
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn content_dates(&self, owner: i64) -> StoreResult<Vec<NaiveDate>> {
        let inner = self.inner.lock().unwrap();

        let mut dates: Vec<NaiveDate> = inner
            .content
            .iter()
            .filter(|c| c.owner_id == owner)
            .map(|c| c.created_at.date_naive())
            .collect();
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();

        Ok(dates)
    }

    async fn has_content_on(&self, owner: i64, date: NaiveDate) -> StoreResult<bool> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .content
            .iter()
            .any(|c| c.owner_id == owner && c.created_at.date_naive() == date))
    }

    async fn feed_page(
        &self,
        viewer: i64,
        category: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> StoreResult<Vec<ContentEntry>> {
        let inner = self.inner.lock().unwrap();

        let mut items: Vec<&ContentItem> = inner
            .content
            .iter()
            .filter(|c| c.owner_id != viewer)
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(items
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .map(|c| ContentEntry {
                item: (*c).clone(),
                username: Self::username_of(&inner, c.owner_id),
            })
            .collect())
    }
}
