//! Date-scoped random selection.
//!
//! The engine draws `count` distinct items from a fixed population at most
//! once per calendar day and keeps the result in the store so that every
//! later call on the same day sees the same items.

use chrono::NaiveDate;
use rand::Rng;
use rand_pcg::Mcg128Xsl64;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clock::{CalendarZone, Clock};
use crate::error::{Result, StoreError, ValidationError};
use crate::storage::{read_json, write_json, KeyValueStore, DAILY_CARDS_KEY};

/// The persisted draw for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DailySelectionRecord<T> {
    /// Day the items were drawn for, `YYYY-MM-DD`.
    pub selection_date: NaiveDate,
    pub items: Vec<T>,
}

impl<T> DailySelectionRecord<T> {
    fn validate(&self, key: &str) -> std::result::Result<(), StoreError> {
        if self.items.is_empty() {
            return Err(StoreError::corrupt(key, "selection has no items"));
        }
        Ok(())
    }
}

/// Uniformly sample `count` distinct items from `population` without
/// replacement. The result is in draw order.
///
/// # Errors
/// [`ValidationError::CountExceedsPopulation`] when `count` is larger than
/// the population.
pub fn draw_distinct<T: Clone, R: Rng + ?Sized>(
    population: &[T],
    count: usize,
    rng: &mut R,
) -> std::result::Result<Vec<T>, ValidationError> {
    if count > population.len() {
        return Err(ValidationError::CountExceedsPopulation {
            count,
            len: population.len(),
        });
    }
    Ok(rand::seq::index::sample(rng, population.len(), count)
        .into_iter()
        .map(|i| population[i].clone())
        .collect())
}

/// Read the selection stored under `key` without drawing. Missing,
/// unparseable, or empty records all come back as `None`; the latter two are
/// logged.
pub fn load_selection<T, S>(store: &S, key: &str) -> Option<DailySelectionRecord<T>>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let record = read_json::<DailySelectionRecord<T>, _>(store, key).and_then(|record| {
        if let Some(r) = &record {
            r.validate(key)?;
        }
        Ok(record)
    });
    match record {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unreadable daily selection");
            None
        }
    }
}

/// Draws and persists one selection per calendar day.
pub struct DailySelectionEngine<S, R = Mcg128Xsl64> {
    store: S,
    rng: R,
    key: String,
}

impl<S: KeyValueStore, R: Rng> DailySelectionEngine<S, R> {
    /// Engine storing its record under the daily-cards key.
    pub fn new(store: S, rng: R) -> Self {
        Self {
            store,
            rng,
            key: DAILY_CARDS_KEY.to_string(),
        }
    }

    /// Store the record under a different key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The stored record, if one exists and is well-formed. Read failures are
    /// logged and reported as `None`.
    pub fn stored<T: DeserializeOwned>(&self) -> Option<DailySelectionRecord<T>> {
        load_selection(&self.store, &self.key)
    }

    /// Return today's selection, drawing and persisting a fresh one if the
    /// stored record is missing, unreadable, or from another day.
    ///
    /// `count == 0` returns an empty selection and leaves the store alone.
    ///
    /// # Errors
    /// [`ValidationError::CountExceedsPopulation`] when `count` is larger
    /// than the population. Store failures are logged, never returned.
    pub fn get_or_draw<T>(
        &mut self,
        population: &[T],
        count: usize,
        today: NaiveDate,
    ) -> Result<Vec<T>>
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        if count == 0 {
            return Ok(Vec::new());
        }
        if count > population.len() {
            return Err(ValidationError::CountExceedsPopulation {
                count,
                len: population.len(),
            }
            .into());
        }

        if let Some(record) = self.stored::<T>() {
            if record.selection_date == today && record.items.len() == count {
                tracing::debug!(key = %self.key, %today, "reusing daily selection");
                return Ok(record.items);
            }
        }

        let items = draw_distinct(population, count, &mut self.rng)?;
        let record = DailySelectionRecord {
            selection_date: today,
            items,
        };
        tracing::debug!(key = %self.key, %today, count, "drew new daily selection");

        if let Err(e) = write_json(&self.store, &self.key, &record) {
            tracing::warn!(key = %self.key, error = %e, "failed to persist daily selection");
        }
        Ok(record.items)
    }

    /// [`get_or_draw`](Self::get_or_draw) for the current date of `clock` in `zone`.
    pub fn get_or_draw_today<T>(
        &mut self,
        population: &[T],
        count: usize,
        clock: &impl Clock,
        zone: CalendarZone,
    ) -> Result<Vec<T>>
    where
        T: Clone + Serialize + DeserializeOwned,
    {
        self.get_or_draw(population, count, zone.today(clock))
    }
}
