//! Ranked user search.

use super::{annotate, AnnotatedUser, PageRequest, Result, SocialError};
use crate::store::SocialStore;

pub const MIN_QUERY_CHARS: usize = 2;

/// Users whose handle contains the trimmed query (case-insensitive),
/// excluding the viewer. An exact handle match always outranks substring
/// matches; within each rank, higher follower count first.
pub async fn users<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    query: &str,
    page: PageRequest,
) -> Result<Vec<AnnotatedUser>> {
    let term = query.trim();
    if term.chars().count() < MIN_QUERY_CHARS {
        return Err(SocialError::Validation(
            "search query must be at least 2 characters",
        ));
    }

    let candidates = store.search_users(term, viewer).await?;

    let mut results = Vec::with_capacity(candidates.len());
    for user in &candidates {
        results.push(annotate(store, viewer, user).await?);
    }

    rank(term, &mut results);

    Ok(page.slice(&results).to_vec())
}

/// Ranking happens here rather than in the store so every backend orders
/// identically: exact match, then follower count descending, with username
/// as a deterministic tie-break.
pub(crate) fn rank(term: &str, results: &mut [AnnotatedUser]) {
    results.sort_by(|a, b| {
        let rank_a = u8::from(a.username != term);
        let rank_b = u8::from(b.username != term);

        rank_a
            .cmp(&rank_b)
            .then_with(|| b.follower_count.cmp(&a.follower_count))
            .then_with(|| a.username.cmp(&b.username))
    });
}
