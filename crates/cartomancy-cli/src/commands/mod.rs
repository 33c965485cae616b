pub mod cards;
pub mod config;
pub mod friends;
pub mod journal;
pub mod moon;
pub mod planets;
pub mod streak;
pub mod today;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use cartomancy_core::{CalendarZone, Config, Database, FixedClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Everything a command needs: the store, the frozen "now", and the zone
/// that maps it to a calendar date.
pub struct Context {
    pub config: Config,
    pub db: Database,
    pub clock: FixedClock,
    pub zone: CalendarZone,
}

impl Context {
    pub fn open(config: Config, now: DateTime<Utc>) -> Result<Self, Box<dyn std::error::Error>> {
        let db = Database::open()?;
        let zone = config.calendar.zone();
        tracing::debug!(%now, offset_minutes = zone.offset_minutes(), "opened store");
        Ok(Self {
            config,
            db,
            clock: FixedClock::new(now),
            zone,
        })
    }

    pub fn today(&self) -> NaiveDate {
        self.zone.today(&self.clock)
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("invalid date '{raw}' (expected YYYY-MM-DD): {e}").into())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
