//! Consecutive-day visit streak.
//!
//! A visit compares the calendar date of the stored `last_visit` with the
//! date of `now`:
//!
//! | relation                         | effect                 |
//! |----------------------------------|------------------------|
//! | same day                         | nothing changes        |
//! | exactly one day later            | streak + 1             |
//! | later gap, no record, or future  | streak restarts at 1   |
//!
//! Storage problems never reach the caller. An unreadable record is treated
//! as missing, and a failed write is logged while the updated record is
//! still returned for the current session.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::{CalendarZone, Clock, SystemClock};
use crate::error::StoreError;
use crate::storage::{read_json, write_json, KeyValueStore, STREAK_KEY};

/// Persisted streak state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StreakRecord {
    pub current_streak: u32,
    pub highest_streak: u32,
    pub last_visit: DateTime<Utc>,
}

impl StreakRecord {
    /// State before any visit has been recorded.
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            current_streak: 0,
            highest_streak: 0,
            last_visit: now,
        }
    }

    fn validate(&self, key: &str) -> Result<(), StoreError> {
        if self.highest_streak < self.current_streak {
            return Err(StoreError::corrupt(
                key,
                format!(
                    "highest streak {} below current streak {}",
                    self.highest_streak, self.current_streak
                ),
            ));
        }
        Ok(())
    }
}

/// How a visit relates to the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakTransition {
    SameDay,
    ConsecutiveDay,
    Gap,
}

impl StreakTransition {
    /// Classify a visit on `today` given the date of the previous visit.
    pub fn classify(last_visit: Option<NaiveDate>, today: NaiveDate) -> Self {
        match last_visit {
            Some(last) if last == today => StreakTransition::SameDay,
            Some(last) if last.succ_opt() == Some(today) => StreakTransition::ConsecutiveDay,
            _ => StreakTransition::Gap,
        }
    }
}

/// Pure streak step: the record after a visit at `now`.
pub fn next_record(
    previous: Option<&StreakRecord>,
    now: DateTime<Utc>,
    zone: CalendarZone,
) -> (StreakRecord, StreakTransition) {
    let today = zone.date_of(now);
    let transition =
        StreakTransition::classify(previous.map(|r| zone.date_of(r.last_visit)), today);
    let highest = previous.map(|r| r.highest_streak).unwrap_or(0);

    let record = match (transition, previous) {
        (StreakTransition::SameDay, Some(prev)) => prev.clone(),
        (StreakTransition::ConsecutiveDay, Some(prev)) => {
            let current = prev.current_streak.saturating_add(1);
            StreakRecord {
                current_streak: current,
                highest_streak: highest.max(current),
                last_visit: now,
            }
        }
        _ => StreakRecord {
            current_streak: 1,
            highest_streak: highest.max(1),
            last_visit: now,
        },
    };
    (record, transition)
}

/// Outcome of recording a visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreakUpdate {
    pub record: StreakRecord,
    pub transition: StreakTransition,
    /// False when the store rejected the write; `record` is still current
    /// for this session.
    pub persisted: bool,
}

/// Reads and updates the streak record in a [`KeyValueStore`].
pub struct StreakTracker<S, C = SystemClock> {
    store: S,
    clock: C,
    zone: CalendarZone,
}

impl<S: KeyValueStore> StreakTracker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
            zone: CalendarZone::default(),
        }
    }
}

impl<S: KeyValueStore, C: Clock> StreakTracker<S, C> {
    pub fn with_clock<C2: Clock>(self, clock: C2) -> StreakTracker<S, C2> {
        StreakTracker {
            store: self.store,
            clock,
            zone: self.zone,
        }
    }

    pub fn with_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self) -> Option<StreakRecord> {
        let record = read_json::<StreakRecord, _>(&self.store, STREAK_KEY).and_then(|record| {
            if let Some(r) = &record {
                r.validate(STREAK_KEY)?;
            }
            Ok(record)
        });
        match record {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = STREAK_KEY, error = %e, "discarding unreadable streak record");
                None
            }
        }
    }

    /// The stored record without recording a visit. Missing or unreadable
    /// data yields [`StreakRecord::empty`] at the clock's current time.
    pub fn current(&self) -> StreakRecord {
        self.load()
            .unwrap_or_else(|| StreakRecord::empty(self.clock.now()))
    }

    /// Record a visit at the clock's current time.
    pub fn update_streak(&mut self) -> StreakRecord {
        let now = self.clock.now();
        self.record_visit(now).record
    }

    /// Record a visit at `now`.
    pub fn update_streak_at(&mut self, now: DateTime<Utc>) -> StreakRecord {
        self.record_visit(now).record
    }

    /// Record a visit at `now` and report what happened.
    pub fn record_visit(&mut self, now: DateTime<Utc>) -> StreakUpdate {
        let previous = self.load();
        let (record, transition) = next_record(previous.as_ref(), now, self.zone);
        tracing::debug!(
            ?transition,
            current = record.current_streak,
            highest = record.highest_streak,
            "streak visit"
        );

        if transition == StreakTransition::SameDay && previous.is_some() {
            return StreakUpdate {
                record,
                transition,
                persisted: true,
            };
        }

        let persisted = match write_json(&self.store, STREAK_KEY, &record) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(key = STREAK_KEY, error = %e, "failed to persist streak");
                false
            }
        };
        StreakUpdate {
            record,
            transition,
            persisted,
        }
    }
}
