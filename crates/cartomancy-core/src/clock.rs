//! Time sources and calendar-day mapping.
//!
//! Every "once per day" rule in the crate compares calendar dates, not
//! durations. [`CalendarZone`] decides which date a timestamp falls on.

use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Offset, Timelike, Utc};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|guard| *guard).unwrap_or_else(|e| *e.into_inner())
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Fixed UTC offset that defines where one calendar day ends and the next
/// begins. Defaults to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarZone {
    offset: FixedOffset,
}

impl Default for CalendarZone {
    fn default() -> Self {
        Self::utc()
    }
}

impl CalendarZone {
    pub fn utc() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// The system's current local offset.
    pub fn local() -> Self {
        Self {
            offset: Local::now().offset().fix(),
        }
    }

    /// `None` if the offset is a day or more away from UTC.
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(minutes.checked_mul(60)?).map(|offset| Self { offset })
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    /// Calendar date on which `at` falls in this zone.
    pub fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }

    /// Hour of day (0-23) of `at` in this zone.
    pub fn hour_of(&self, at: DateTime<Utc>) -> u32 {
        at.with_timezone(&self.offset).hour()
    }

    /// Today's date according to `clock`.
    pub fn today(&self, clock: &impl Clock) -> NaiveDate {
        self.date_of(clock.now())
    }
}
