//! # Cartomancy Core Library
//!
//! Business logic for a card-of-the-day journaling app. The CLI and any
//! future front end are thin layers over this crate.
//!
//! ## Architecture
//!
//! - **Daily selection**: draws a set of distinct cards once per calendar
//!   day and reuses it until the date changes
//! - **Streak**: counts consecutive calendar days with a visit
//! - **Calendar**: lunar phase, sun sign, and the planet ruling each weekday
//! - **Journal**: reflections tagged with the day's cards
//! - **Friends**: a local friends list and card-to-card compatibility readings
//! - **Storage**: a string key-value seam with SQLite and in-memory
//!   implementations, plus TOML configuration
//!
//! Time and randomness are injected ([`Clock`], any [`rand::Rng`]) so every
//! component can be driven deterministically.
//!
//! ## Key Components
//!
//! - [`DailySelectionEngine`]: date-scoped draw with persistence
//! - [`StreakTracker`]: visit streak state machine
//! - [`KeyValueStore`]: persistence seam
//! - [`Config`]: application configuration

pub mod clock;
pub mod daily;
pub mod deck;
pub mod error;
pub mod friends;
pub mod journal;
pub mod moon;
pub mod planets;
pub mod storage;
pub mod streak;
pub mod today;

pub use clock::{CalendarZone, Clock, FixedClock, SystemClock};
pub use daily::{seeded_rng, DailySelectionEngine, DailySelectionRecord, Greeting};
pub use deck::{generate_deck, Card, Suit};
pub use error::{ConfigError, CoreError, StoreError, ValidationError};
pub use friends::{Comparison, Friend, Friends};
pub use journal::{Journal, JournalEntry};
pub use moon::{moon_phase, moon_phase_with_sign, zodiac_sign, MoonPhase, ZodiacSign};
pub use planets::{planet_for, week_ahead, DayProgress, Planet, PlanetaryDay, PlanetaryPath};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use streak::{StreakRecord, StreakTracker, StreakTransition, StreakUpdate};
pub use today::{open_today, TodayReport};
