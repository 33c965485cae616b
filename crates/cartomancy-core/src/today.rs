//! The "today" overview: everything the home screen shows on open.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use crate::clock::{CalendarZone, Clock};
use crate::daily::{DailySelectionEngine, Greeting};
use crate::deck::{generate_deck, Card};
use crate::error::Result;
use crate::moon::{moon_phase, zodiac_sign, MoonPhase, ZodiacSign};
use crate::planets::{planet_for, Planet};
use crate::storage::KeyValueStore;
use crate::streak::{StreakTracker, StreakUpdate};

#[derive(Debug, Clone, Serialize)]
pub struct TodayReport {
    pub date: NaiveDate,
    pub greeting: Greeting,
    pub moon_phase: MoonPhase,
    pub moon_sign: ZodiacSign,
    pub planet: Planet,
    pub streak: StreakUpdate,
    pub cards: Vec<Card>,
}

/// Record today's visit and gather the day's cards and calendar.
///
/// # Errors
/// Only when `card_count` exceeds the deck.
pub fn open_today<S, R, C>(
    store: &S,
    rng: R,
    clock: &C,
    zone: CalendarZone,
    card_count: usize,
) -> Result<TodayReport>
where
    S: KeyValueStore,
    R: Rng,
    C: Clock,
{
    let now = clock.now();
    let date = zone.date_of(now);

    // Draw first so a rejected count leaves the streak untouched.
    let cards = DailySelectionEngine::new(store, rng).get_or_draw(
        &generate_deck(),
        card_count,
        date,
    )?;
    let streak = StreakTracker::new(store).with_zone(zone).record_visit(now);

    Ok(TodayReport {
        date,
        greeting: Greeting::for_hour(zone.hour_of(now)),
        moon_phase: moon_phase(now),
        moon_sign: zodiac_sign(date),
        planet: planet_for(date),
        streak,
        cards,
    })
}
