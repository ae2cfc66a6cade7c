use chrono::NaiveDate;

use crate::social::streak;
use crate::tests::memory::MemoryStore;

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn empty_timeline_is_zero() {
    assert_eq!(streak::consecutive_days(&[], d(2024, 3, 10)), 0);
}

#[test]
fn run_ending_today() {
    let dates = [d(2024, 3, 10), d(2024, 3, 9), d(2024, 3, 8)];
    assert_eq!(streak::consecutive_days(&dates, d(2024, 3, 10)), 3);
}

#[test]
fn no_post_today_breaks_the_run() {
    // The run must start at the reference date itself.
    let dates = [d(2024, 3, 9), d(2024, 3, 8), d(2024, 3, 7)];
    assert_eq!(streak::consecutive_days(&dates, d(2024, 3, 10)), 0);
}

#[test]
fn gap_right_after_today_leaves_one() {
    let dates = [d(2024, 3, 10), d(2024, 3, 8)];
    assert_eq!(streak::consecutive_days(&dates, d(2024, 3, 10)), 1);
}

#[test]
fn gap_inside_the_run_stops_the_count() {
    let dates = [d(2024, 3, 10), d(2024, 3, 9), d(2024, 3, 7), d(2024, 3, 6)];
    assert_eq!(streak::consecutive_days(&dates, d(2024, 3, 10)), 2);
}

#[test]
fn crosses_month_boundary() {
    let dates = [d(2024, 3, 1), d(2024, 2, 29), d(2024, 2, 28)];
    assert_eq!(streak::consecutive_days(&dates, d(2024, 3, 1)), 3);
}

#[tokio::test]
async fn multiple_posts_per_day_count_once() {
    let store = MemoryStore::new();
    let alice = store.add_user("alice");

    store.add_content_on(alice, "fitness", d(2024, 3, 10));
    store.add_content_on(alice, "reading", d(2024, 3, 10));
    store.add_content_on(alice, "fitness", d(2024, 3, 9));

    assert_eq!(streak::current(&store, alice, d(2024, 3, 10)).await.unwrap(), 2);
}

#[tokio::test]
async fn stale_denormalized_date_is_ignored() {
    let store = MemoryStore::new();
    let alice = store.add_user("alice");

    store.add_content_on(alice, "fitness", d(2024, 3, 9));
    // A lying last_activity_date must not extend the streak.
    store.set_last_activity(alice, Some(d(2024, 3, 10)));

    assert_eq!(streak::current(&store, alice, d(2024, 3, 10)).await.unwrap(), 0);
}
