//! Consecutive-day activity count over a user's content timeline.

use chrono::NaiveDate;

use super::Result;
use crate::store::SocialStore;

/// The length of the run of consecutive calendar days ending at `as_of`,
/// given the distinct post dates sorted descending.
///
/// The run must start at `as_of` itself: no post on `as_of` or `as_of - 1`
/// means a streak of 0, regardless of any older run. Formally, the result is
/// the largest `k` such that `as_of - dates[i] == i` days for all `i < k`.
pub fn consecutive_days(dates: &[NaiveDate], as_of: NaiveDate) -> u32 {
    let mut streak = 0;

    for (i, date) in dates.iter().enumerate() {
        if (as_of - *date).num_days() == i as i64 {
            streak += 1;
        } else {
            break;
        }
    }

    streak
}

/// `user`'s current streak as of `today` (UTC calendar date). Computed from
/// the canonical content timeline; multiple posts on one day count once.
pub async fn current<S: SocialStore + ?Sized>(
    store: &S,
    user: i64,
    today: NaiveDate,
) -> Result<u32> {
    let dates = store.content_dates(user).await?;

    Ok(consecutive_days(&dates, today))
}
