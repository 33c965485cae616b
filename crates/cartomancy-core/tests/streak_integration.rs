//! Integration tests for the visit streak against an on-disk database.

use cartomancy_core::storage::STREAK_KEY;
use cartomancy_core::{
    CalendarZone, Database, FixedClock, KeyValueStore, StreakRecord, StreakTracker,
};
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;
use tempfile::TempDir;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn seed_record(db: &Database, record: &StreakRecord) {
    db.write(STREAK_KEY, &serde_json::to_string(record).unwrap())
        .unwrap();
}

#[test]
fn documented_scenarios() {
    let start = StreakRecord {
        current_streak: 5,
        highest_streak: 8,
        last_visit: ts("2024-03-10T09:00:00Z"),
    };

    let db = Database::open_memory().unwrap();
    seed_record(&db, &start);
    let next_day = StreakTracker::new(db).update_streak_at(ts("2024-03-11T08:00:00Z"));
    assert_eq!(
        next_day,
        StreakRecord {
            current_streak: 6,
            highest_streak: 8,
            last_visit: ts("2024-03-11T08:00:00Z"),
        }
    );

    let db = Database::open_memory().unwrap();
    seed_record(&db, &start);
    let after_gap = StreakTracker::new(db).update_streak_at(ts("2024-03-13T08:00:00Z"));
    assert_eq!(
        after_gap,
        StreakRecord {
            current_streak: 1,
            highest_streak: 8,
            last_visit: ts("2024-03-13T08:00:00Z"),
        }
    );
}

#[test]
fn streak_persists_across_sessions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cartomancy.db");
    let clock = FixedClock::new(ts("2024-06-01T20:00:00Z"));

    for _ in 0..5 {
        let db = Database::open_at(&path).unwrap();
        let mut tracker = StreakTracker::new(db)
            .with_clock(&clock)
            .with_zone(CalendarZone::utc());
        tracker.update_streak();
        clock.advance(Duration::days(1));
    }

    let db = Database::open_at(&path).unwrap();
    let tracker = StreakTracker::new(db);
    let record = tracker.current();
    assert_eq!(record.current_streak, 5);
    assert_eq!(record.highest_streak, 5);
    assert_eq!(record.last_visit, ts("2024-06-05T20:00:00Z"));
}

proptest! {
    #[test]
    fn same_day_calls_agree(first_minute in 0i64..1440, second_minute in 0i64..1440) {
        let midnight = ts("2024-03-12T00:00:00Z");
        let db = Database::open_memory().unwrap();
        seed_record(&db, &StreakRecord {
            current_streak: 2,
            highest_streak: 3,
            last_visit: ts("2024-03-11T12:00:00Z"),
        });
        let mut tracker = StreakTracker::new(db);
        let a = tracker.update_streak_at(midnight + Duration::minutes(first_minute));
        let b = tracker.update_streak_at(midnight + Duration::minutes(second_minute));
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.current_streak, 3);
    }

    #[test]
    fn highest_never_below_current(gaps in proptest::collection::vec(0i64..4, 1..40)) {
        let mut now = ts("2024-01-01T10:00:00Z");
        let mut tracker = StreakTracker::new(Database::open_memory().unwrap());
        let mut best = 0;
        for gap in gaps {
            now += Duration::days(gap);
            let record = tracker.update_streak_at(now);
            prop_assert!(record.highest_streak >= record.current_streak);
            prop_assert!(record.current_streak >= 1);
            prop_assert!(record.highest_streak >= best);
            best = record.highest_streak;
        }
    }
}
