//! Planetary path: one ruling planet per weekday, with a per-date
//! completion flag and notes kept in the store.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::storage::{read_json, write_json, KeyValueStore, PLANETARY_PROGRESS_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Planet {
    Sun,
    Moon,
    Mars,
    Mercury,
    Jupiter,
    Venus,
    Saturn,
}

impl Planet {
    /// Planet ruling `weekday`.
    pub fn for_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Planet::Sun,
            Weekday::Mon => Planet::Moon,
            Weekday::Tue => Planet::Mars,
            Weekday::Wed => Planet::Mercury,
            Weekday::Thu => Planet::Jupiter,
            Weekday::Fri => Planet::Venus,
            Weekday::Sat => Planet::Saturn,
        }
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            Planet::Sun => Weekday::Sun,
            Planet::Moon => Weekday::Mon,
            Planet::Mars => Weekday::Tue,
            Planet::Mercury => Weekday::Wed,
            Planet::Jupiter => Weekday::Thu,
            Planet::Venus => Weekday::Fri,
            Planet::Saturn => Weekday::Sat,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Planet::Sun => "Sun",
            Planet::Moon => "Moon",
            Planet::Mars => "Mars",
            Planet::Mercury => "Mercury",
            Planet::Jupiter => "Jupiter",
            Planet::Venus => "Venus",
            Planet::Saturn => "Saturn",
        }
    }

    pub fn theme(&self) -> &'static str {
        match self {
            Planet::Sun => "Identity & Purpose",
            Planet::Moon => "Emotions & Intuition",
            Planet::Mars => "Action & Courage",
            Planet::Mercury => "Communication & Learning",
            Planet::Jupiter => "Growth & Abundance",
            Planet::Venus => "Love & Harmony",
            Planet::Saturn => "Structure & Discipline",
        }
    }

    pub fn challenge(&self) -> &'static str {
        match self {
            Planet::Sun => "Reflect on your life purpose and authentic self-expression.",
            Planet::Moon => "Connect with your feelings and inner wisdom.",
            Planet::Mars => "Take bold action toward your goals.",
            Planet::Mercury => "Express yourself clearly and absorb new knowledge.",
            Planet::Jupiter => "Expand your horizons and embrace opportunities.",
            Planet::Venus => "Nurture relationships and find beauty in your surroundings.",
            Planet::Saturn => "Build foundations and establish healthy boundaries.",
        }
    }

    /// Display color as `#RRGGBB`.
    pub fn color(&self) -> &'static str {
        match self {
            Planet::Sun => "#FFB900",
            Planet::Moon => "#C0C0C0",
            Planet::Mars => "#FF4500",
            Planet::Mercury => "#9370DB",
            Planet::Jupiter => "#4169E1",
            Planet::Venus => "#32CD32",
            Planet::Saturn => "#696969",
        }
    }
}

impl std::fmt::Display for Planet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub fn planet_for(date: NaiveDate) -> Planet {
    Planet::for_weekday(date.weekday())
}

/// One day of the planetary week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanetaryDay {
    pub date: NaiveDate,
    pub planet: Planet,
    pub is_today: bool,
}

/// Seven consecutive days starting at `start`, which is marked as today.
pub fn week_ahead(start: NaiveDate) -> Vec<PlanetaryDay> {
    start
        .iter_days()
        .take(7)
        .enumerate()
        .map(|(i, date)| PlanetaryDay {
            date,
            planet: planet_for(date),
            is_today: i == 0,
        })
        .collect()
}

/// Progress recorded for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProgress {
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub notes: String,
}

/// Per-date planetary challenge progress.
pub struct PlanetaryPath<S> {
    store: S,
}

impl<S: KeyValueStore> PlanetaryPath<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All recorded progress. Unreadable data is logged and reads as empty.
    pub fn all(&self) -> BTreeMap<NaiveDate, DayProgress> {
        match read_json(&self.store, PLANETARY_PROGRESS_KEY) {
            Ok(map) => map.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = PLANETARY_PROGRESS_KEY, error = %e, "discarding unreadable planetary progress");
                BTreeMap::new()
            }
        }
    }

    pub fn progress(&self, date: NaiveDate) -> DayProgress {
        self.all().remove(&date).unwrap_or_default()
    }

    /// Flip the completion flag for `date` and return the new progress.
    pub fn toggle_complete(&mut self, date: NaiveDate) -> Result<DayProgress> {
        self.modify(date, |p| p.completed = !p.completed)
    }

    pub fn set_notes(&mut self, date: NaiveDate, notes: &str) -> Result<DayProgress> {
        self.modify(date, |p| p.notes = notes.to_string())
    }

    fn modify(
        &mut self,
        date: NaiveDate,
        f: impl FnOnce(&mut DayProgress),
    ) -> Result<DayProgress> {
        let mut all = self.all();
        let entry = all.entry(date).or_default();
        f(entry);
        let updated = entry.clone();
        write_json(&self.store, PLANETARY_PROGRESS_KEY, &all)?;
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn weekday_rulers() {
        // 2024-03-10 is a Sunday.
        assert_eq!(planet_for(d("2024-03-10")), Planet::Sun);
        assert_eq!(planet_for(d("2024-03-11")), Planet::Moon);
        assert_eq!(planet_for(d("2024-03-16")), Planet::Saturn);
        for planet in [Planet::Sun, Planet::Mars, Planet::Venus] {
            assert_eq!(Planet::for_weekday(planet.weekday()), planet);
        }
    }

    #[test]
    fn week_ahead_covers_every_planet_once() {
        let week = week_ahead(d("2024-03-13"));
        assert_eq!(week.len(), 7);
        assert!(week[0].is_today);
        assert!(week[1..].iter().all(|day| !day.is_today));
        assert_eq!(week[0].planet, Planet::Mercury);
        assert_eq!(week[6].date, d("2024-03-19"));

        let mut planets: Vec<_> = week.iter().map(|day| day.planet.name()).collect();
        planets.sort();
        planets.dedup();
        assert_eq!(planets.len(), 7);
    }

    #[test]
    fn toggle_and_notes_persist() {
        let store = MemoryStore::new();
        let mut path = PlanetaryPath::new(&store);
        assert_eq!(path.progress(d("2024-03-10")), DayProgress::default());

        assert!(path.toggle_complete(d("2024-03-10")).unwrap().completed);
        path.set_notes(d("2024-03-10"), "watched the sunrise").unwrap();
        path.toggle_complete(d("2024-03-11")).unwrap();

        let reopened = PlanetaryPath::new(&store);
        let progress = reopened.progress(d("2024-03-10"));
        assert!(progress.completed);
        assert_eq!(progress.notes, "watched the sunrise");
        assert_eq!(reopened.all().len(), 2);
    }

    #[test]
    fn toggle_twice_clears() {
        let mut path = PlanetaryPath::new(MemoryStore::new());
        path.toggle_complete(d("2024-03-10")).unwrap();
        let progress = path.toggle_complete(d("2024-03-10")).unwrap();
        assert!(!progress.completed);
    }

    #[test]
    fn stored_map_uses_date_keys() {
        let store = MemoryStore::new();
        let mut path = PlanetaryPath::new(&store);
        path.toggle_complete(d("2024-03-10")).unwrap();
        let raw = store.read(PLANETARY_PROGRESS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"2024-03-10":{"completed":true,"notes":""}}"#);
    }

    #[test]
    fn corrupt_progress_reads_empty() {
        let store = MemoryStore::new();
        store.write(PLANETARY_PROGRESS_KEY, "[1,2,3]").unwrap();
        let path = PlanetaryPath::new(&store);
        assert!(path.all().is_empty());
    }
}
