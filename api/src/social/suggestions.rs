//! Follow recommendations.

use super::{annotate, AnnotatedUser, Result};
use crate::store::SocialStore;

pub const DEFAULT_LIMIT: usize = 10;
pub const MAX_LIMIT: usize = 50;

/// Users the viewer does not already follow (and is not), greedily ranked by
/// content count, then follower count. Users with no content are still
/// eligible; they just sort last. No randomization.
pub async fn follow_candidates<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    limit: usize,
) -> Result<Vec<AnnotatedUser>> {
    let candidates = store.unfollowed_users(viewer).await?;

    let mut results = Vec::with_capacity(candidates.len());
    for user in &candidates {
        results.push(annotate(store, viewer, user).await?);
    }

    results.sort_by(|a, b| {
        b.content_count
            .cmp(&a.content_count)
            .then_with(|| b.follower_count.cmp(&a.follower_count))
            .then_with(|| a.username.cmp(&b.username))
    });

    results.truncate(limit.clamp(1, MAX_LIMIT));

    Ok(results)
}
