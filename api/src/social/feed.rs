//! The gated community feed.

use chrono::NaiveDate;
use serde::Serialize;

use super::{gate, PageRequest, Result, SocialError};
use crate::database::ContentItem;
use crate::store::SocialStore;

#[derive(Debug, Clone, Default)]
pub struct FeedFilter {
    /// Exact category match when set.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedItem {
    #[serde(flatten)]
    pub item: ContentItem,
    pub username: String,
    pub follower_count: i64,
}

/// A page of other users' content for `viewer`, newest first. Fails with
/// [`SocialError::GateLocked`] until the viewer has posted today.
///
/// The gate check and the feed read are two sequential queries. That is
/// sound without a transaction: within one day the gate only ever becomes
/// more permissive, so the race cannot under-unlock.
pub async fn page<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    filter: &FeedFilter,
    page: PageRequest,
    today: NaiveDate,
) -> Result<Vec<FeedItem>> {
    if !gate::check(store, viewer, today).await?.is_unlocked() {
        return Err(SocialError::GateLocked);
    }

    let entries = store
        .feed_page(viewer, filter.category.as_deref(), page.offset(), page.limit())
        .await?;

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let follower_count = store.user_stats(entry.item.owner_id).await?.followers;
        items.push(FeedItem {
            item: entry.item,
            username: entry.username,
            follower_count,
        });
    }

    Ok(items)
}
