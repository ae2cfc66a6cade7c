//! The owner-facing content timeline: recording metadata, listing, detail
//! and deletion. Raw bytes never pass through here; they belong to the
//! content store.

use chrono::NaiveDate;
use serde::Serialize;

use super::{streak, PageRequest, Result, SocialError};
use crate::database::ContentItem;
use crate::store::{NewContentItem, SocialStore};

pub const MIN_DURATION_SECS: i32 = 10;
pub const MAX_DURATION_SECS: i32 = 60;

#[derive(Debug, Clone, Serialize)]
pub struct ContentDetail {
    #[serde(flatten)]
    pub item: ContentItem,
    pub username: String,
    pub follower_count: i64,
    pub is_following: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatorStats {
    pub total_content: i64,
    pub current_streak: u32,
    pub followers: i64,
}

/// Records a content item for `owner`. The item and the owner's
/// `last_activity_date` are written atomically by the store.
pub async fn record<S: SocialStore + ?Sized>(
    store: &S,
    owner: i64,
    item: NewContentItem,
) -> Result<ContentItem> {
    if item.category.trim().is_empty() {
        return Err(SocialError::Validation("category is required"));
    }

    if item.description.trim().is_empty() {
        return Err(SocialError::Validation("description is required"));
    }

    if !(MIN_DURATION_SECS..=MAX_DURATION_SECS).contains(&item.duration_secs) {
        return Err(SocialError::Validation(
            "content must be between 10 and 60 seconds",
        ));
    }

    Ok(store.insert_content(owner, item).await?)
}

/// Deletes `owner`'s item. Items belonging to anyone else are reported as
/// not found rather than forbidden.
pub async fn remove<S: SocialStore + ?Sized>(store: &S, owner: i64, id: i64) -> Result<()> {
    if !store.delete_content(owner, id).await? {
        return Err(SocialError::NotFound("content item"));
    }

    Ok(())
}

/// `owner`'s own items, newest first.
pub async fn list_mine<S: SocialStore + ?Sized>(
    store: &S,
    owner: i64,
    page: PageRequest,
) -> Result<Vec<ContentItem>> {
    Ok(store.content_of(owner, page.offset(), page.limit()).await?)
}

/// A single item with its owner annotations, as seen by `viewer`.
pub async fn detail<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    id: i64,
) -> Result<ContentDetail> {
    let entry = store
        .content_by_id(id)
        .await?
        .ok_or(SocialError::NotFound("content item"))?;

    let stats = store.user_stats(entry.item.owner_id).await?;
    let is_following = store.is_following(viewer, entry.item.owner_id).await?;

    Ok(ContentDetail {
        username: entry.username,
        follower_count: stats.followers,
        is_following,
        item: entry.item,
    })
}

/// The dashboard numbers for `user`: total items, current streak and live
/// follower count.
pub async fn creator_stats<S: SocialStore + ?Sized>(
    store: &S,
    user: i64,
    today: NaiveDate,
) -> Result<CreatorStats> {
    let stats = store.user_stats(user).await?;
    let current_streak = streak::current(store, user, today).await?;

    Ok(CreatorStats {
        total_content: stats.content,
        current_streak,
        followers: stats.followers,
    })
}
