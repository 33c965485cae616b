mod config;
pub mod database;
mod memory;
pub mod migrations;

pub use config::{CalendarConfig, CardsConfig, Config};
pub use database::Database;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;

/// Storage key for the daily card draw.
pub const DAILY_CARDS_KEY: &str = "dailyCards";
/// Storage key for the visit streak.
pub const STREAK_KEY: &str = "cartomancy_streak";
/// Storage key for journal entries.
pub const JOURNAL_KEY: &str = "journalEntries";
/// Storage key for the friends list.
pub const FRIENDS_KEY: &str = "friends";
/// Storage key for planetary path progress.
pub const PLANETARY_PROGRESS_KEY: &str = "planetaryProgress";

/// Durable string key-value store.
///
/// Writes are best-effort and not atomic with respect to preceding reads;
/// components that read-modify-write a key take `&mut self` so a single
/// owner serializes its own updates.
pub trait KeyValueStore {
    /// Raw value under `key`, or `None` if it was never written.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).write(key, value)
    }
}

/// Read and decode a JSON record. A value that fails to parse is reported as
/// [`StoreError::Corrupt`].
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, StoreError>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.read(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::corrupt(key, e)),
        None => Ok(None),
    }
}

/// Encode a record as JSON and write it.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|e| StoreError::WriteFailed {
        key: key.to_string(),
        message: e.to_string(),
    })?;
    store.write(key, &raw)
}

/// Returns the data directory, creating it if needed.
///
/// `CARTOMANCY_DATA_DIR` overrides the location outright. Otherwise this is
/// `~/.config/cartomancy[-dev]/`, with `CARTOMANCY_ENV=dev` selecting the
/// development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let dir = data_dir_path();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Where [`data_dir`] points, without touching the filesystem.
pub fn data_dir_path() -> PathBuf {
    match std::env::var_os("CARTOMANCY_DATA_DIR") {
        Some(custom) => PathBuf::from(custom),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("CARTOMANCY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("cartomancy-dev")
            } else {
                base_dir.join("cartomancy")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        n: u32,
    }

    #[test]
    fn json_helpers_roundtrip_through_store() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "ace".into(),
            n: 1,
        };
        write_json(&store, "sample", &sample).unwrap();
        let back: Option<Sample> = read_json(&store, "sample").unwrap();
        assert_eq!(back, Some(sample));
    }

    #[test]
    fn read_json_reports_unparseable_value_as_corrupt() {
        let store = MemoryStore::new();
        store.write("sample", "{not json").unwrap();
        let err = read_json::<Sample, _>(&store, "sample").unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref key, .. } if key == "sample"));
    }

    #[test]
    fn read_json_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(read_json::<Sample, _>(&store, "nothing").unwrap().is_none());
    }
}
