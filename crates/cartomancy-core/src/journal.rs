//! Reflection journal.
//!
//! Entries are kept newest first as a single JSON list. Unlike the streak,
//! journal writes report failure to the caller: the entry text would
//! otherwise be lost without notice.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::CalendarZone;
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{read_json, write_json, KeyValueStore, JOURNAL_KEY};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    /// Calendar day the entry was written on.
    pub date: NaiveDate,
    pub content: String,
    /// Names of the cards drawn that day.
    #[serde(default)]
    pub cards: Vec<String>,
    /// Last modification, milliseconds since the Unix epoch.
    pub timestamp: i64,
}

pub struct Journal<S> {
    store: S,
    zone: CalendarZone,
}

impl<S: KeyValueStore> Journal<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            zone: CalendarZone::default(),
        }
    }

    pub fn with_zone(mut self, zone: CalendarZone) -> Self {
        self.zone = zone;
        self
    }

    /// All entries, newest first. Unreadable data is logged and reads as
    /// an empty journal.
    pub fn list(&self) -> Vec<JournalEntry> {
        match read_json::<Vec<JournalEntry>, _>(&self.store, JOURNAL_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = JOURNAL_KEY, error = %e, "discarding unreadable journal");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<JournalEntry> {
        self.list().into_iter().find(|e| e.id == id)
    }

    /// Add an entry written at `now`.
    ///
    /// # Errors
    /// Blank `content` is rejected; store write failures are returned.
    pub fn add(
        &mut self,
        content: &str,
        cards: Vec<String>,
        now: DateTime<Utc>,
    ) -> Result<JournalEntry> {
        let content = non_blank(content)?;
        let entry = JournalEntry {
            id: Uuid::new_v4().to_string(),
            date: self.zone.date_of(now),
            content,
            cards,
            timestamp: now.timestamp_millis(),
        };
        let mut entries = self.list();
        entries.insert(0, entry.clone());
        self.save(&entries)?;
        Ok(entry)
    }

    /// Replace the text of entry `id`.
    pub fn edit(&mut self, id: &str, content: &str, now: DateTime<Utc>) -> Result<JournalEntry> {
        let content = non_blank(content)?;
        let mut entries = self.list();
        let entry = entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| not_found(id))?;
        entry.content = content;
        entry.timestamp = now.timestamp_millis();
        let updated = entry.clone();
        self.save(&entries)?;
        Ok(updated)
    }

    /// Remove entry `id`.
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(not_found(id));
        }
        self.save(&entries)
    }

    fn save(&self, entries: &[JournalEntry]) -> Result<()> {
        write_json(&self.store, JOURNAL_KEY, entries)?;
        Ok(())
    }
}

fn non_blank(content: &str) -> Result<String> {
    if content.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "content".into(),
            message: "reflection is empty".into(),
        }
        .into());
    }
    Ok(content.to_string())
}

fn not_found(id: &str) -> CoreError {
    ValidationError::NotFound {
        kind: "journal entry".into(),
        id: id.to_string(),
    }
    .into()
}
