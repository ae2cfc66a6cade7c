//! The daily feed-unlock gate.
//!
//! The gate has no stored state: it is recomputed on every check from the
//! content timeline, so it flips to [`FeedGate::Unlocked`] the moment a
//! today-dated item lands and relocks automatically when "today" advances.
//! All dates are UTC calendar dates.

use chrono::NaiveDate;

use super::Result;
use crate::store::SocialStore;

/// Reason attached to a denied feed response while the gate is locked.
pub const LOCKED_REASON: &str = "Record your daily progress to unlock the feed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedGate {
    Unlocked,
    Locked,
}

impl FeedGate {
    pub fn is_unlocked(self) -> bool {
        self == FeedGate::Unlocked
    }

    pub fn reason(self) -> Option<&'static str> {
        match self {
            FeedGate::Unlocked => None,
            FeedGate::Locked => Some(LOCKED_REASON),
        }
    }
}

/// Unlocked iff `user` has posted a content item dated `today`. Reads the
/// timeline directly; the denormalized `last_activity_date` is never
/// consulted here.
pub async fn check<S: SocialStore + ?Sized>(
    store: &S,
    user: i64,
    today: NaiveDate,
) -> Result<FeedGate> {
    if store.has_content_on(user, today).await? {
        Ok(FeedGate::Unlocked)
    } else {
        Ok(FeedGate::Locked)
    }
}
