//! The social graph and gated-feed engine.
//!
//! Every operation here is one unit of work: it takes an authenticated user
//! id from the caller, reads/writes through [`SocialStore`] and returns a
//! plain value or a typed [`SocialError`]. No state is held across calls.

use chrono::{DateTime, Utc};

use crate::database::User;
use crate::store::{SocialStore, UserStats};

pub mod content;
pub mod error;
pub mod feed;
pub mod gate;
pub mod graph;
pub mod search;
pub mod streak;
pub mod suggestions;

pub use error::{Result, SocialError};

/// 1-based offset pagination. Page numbers below 1 and out-of-range sizes
/// are clamped rather than rejected; a page past the end of the result set
/// is simply empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl PageRequest {
    pub const MAX_PAGE_SIZE: u32 = 100;

    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, Self::MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.page_size as i64
    }

    pub fn limit(&self) -> i64 {
        self.page_size as i64
    }

    /// Applies this page to an already-ranked slice, for the components that
    /// paginate after ranking in memory.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let offset = self.offset() as usize;
        if offset >= items.len() {
            return &[];
        }

        let end = (offset + self.page_size as usize).min(items.len());
        &items[offset..end]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 20)
    }
}

/// A user row augmented with the viewer-relative and aggregate fields the
/// clients render. Produced only by [`AnnotatedUser::new`] so the field set
/// stays fixed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct AnnotatedUser {
    pub id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub follower_count: i64,
    pub content_count: i64,
    pub is_following: bool,
}

impl AnnotatedUser {
    pub fn new(user: &User, stats: &UserStats, is_following: bool) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            created_at: user.created_at,
            follower_count: stats.followers,
            content_count: stats.content,
            is_following,
        }
    }
}

/// Annotates `user` as seen by `viewer`. Counts are live aggregates.
pub(crate) async fn annotate<S: SocialStore + ?Sized>(
    store: &S,
    viewer: i64,
    user: &User,
) -> Result<AnnotatedUser> {
    let stats = store.user_stats(user.id).await?;
    let is_following = store.is_following(viewer, user.id).await?;

    Ok(AnnotatedUser::new(user, &stats, is_following))
}
