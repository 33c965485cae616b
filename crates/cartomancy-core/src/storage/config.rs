//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - How many cards are drawn per day, and an optional fixed seed
//! - Which UTC offset defines a calendar day
//! - The default log level for the CLI
//!
//! Configuration is stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::clock::CalendarZone;
use crate::error::{ConfigError, CoreError};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Daily card draw configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsConfig {
    #[serde(default = "default_daily_count")]
    pub daily_count: usize,
    /// Fixed seed for the draw; absent means entropy-seeded.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Calendar-day configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CalendarConfig {
    /// Offset from UTC, in minutes, that defines the day boundary.
    /// Absent means the system's local offset.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub cards: CardsConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_daily_count() -> usize {
    3
}
fn default_log_level() -> String {
    "warn".into()
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            daily_count: default_daily_count(),
            seed: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cards: CardsConfig::default(),
            calendar: CalendarConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl CalendarConfig {
    /// Zone used to turn timestamps into calendar dates.
    pub fn zone(&self) -> CalendarZone {
        match self.utc_offset_minutes {
            Some(minutes) => CalendarZone::from_offset_minutes(minutes).unwrap_or_default(),
            None => CalendarZone::local(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn is_clear(value: &str) -> bool {
        value.is_empty() || value.eq_ignore_ascii_case("none")
    }

    /// Optional keys are the ones whose default is unset.
    fn is_optional(key: &str) -> bool {
        serde_json::to_value(Self::default())
            .ok()
            .and_then(|defaults| Self::get_json_value_by_path(&defaults, key).cloned())
            .is_some_and(|v| v.is_null())
    }

    fn coerce_untyped(value: &str) -> serde_json::Value {
        if Self::is_clear(value) {
            serde_json::Value::Null
        } else if let Ok(n) = value.parse::<i64>() {
            serde_json::Value::Number(n.into())
        } else if let Ok(b) = value.parse::<bool>() {
            serde_json::Value::Bool(b)
        } else {
            serde_json::Value::String(value.into())
        }
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = if Self::is_clear(value) && Self::is_optional(key) {
                    serde_json::Value::Null
                } else {
                    match existing {
                        serde_json::Value::Bool(_) => serde_json::Value::Bool(
                            value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                        ),
                        serde_json::Value::Number(_) => {
                            if let Ok(n) = value.parse::<i64>() {
                                serde_json::Value::Number(n.into())
                            } else {
                                return Err(invalid(format!("cannot parse '{value}' as number")));
                            }
                        }
                        serde_json::Value::Null => Self::coerce_untyped(value),
                        serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                            serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                        }
                        serde_json::Value::String(_) => serde_json::Value::String(value.into()),
                    }
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Reject values that deserialize but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cards.daily_count > crate::deck::DECK_SIZE {
            return Err(ConfigError::InvalidValue {
                key: "cards.daily_count".into(),
                message: format!("must be at most {}", crate::deck::DECK_SIZE),
            });
        }
        if let Some(minutes) = self.calendar.utc_offset_minutes {
            if minutes.abs() > MAX_OFFSET_MINUTES {
                return Err(ConfigError::InvalidValue {
                    key: "calendar.utc_offset_minutes".into(),
                    message: format!("must be within ±{MAX_OFFSET_MINUTES}"),
                });
            }
        }
        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "log_level".into(),
                message: format!("expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        Ok(())
    }

    fn path() -> Result<PathBuf, CoreError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or write and return the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, CoreError> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path,
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), CoreError> {
        let path = Self::path()?;
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(&path, content).map_err(|e| ConfigError::SaveFailed {
            path,
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type or range.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), CoreError> {
        self.apply(key, value)?;
        self.save()
    }

    /// Load from disk, returning default on error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.cards.daily_count, 3);
        assert!(parsed.cards.seed.is_none());
        assert_eq!(parsed.log_level, "warn");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[cards]\nseed = 7\n").unwrap();
        assert_eq!(parsed.cards.daily_count, 3);
        assert_eq!(parsed.cards.seed, Some(7));
        assert!(parsed.calendar.utc_offset_minutes.is_none());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("cards.daily_count").as_deref(), Some("3"));
        assert_eq!(cfg.get("log_level").as_deref(), Some("warn"));
        assert_eq!(cfg.get("cards.seed").as_deref(), Some("null"));
        assert!(cfg.get("cards.missing_key").is_none());
    }

    #[test]
    fn apply_sets_optional_fields_from_null() {
        let mut cfg = Config::default();
        cfg.apply("cards.seed", "42").unwrap();
        cfg.apply("calendar.utc_offset_minutes", "-300").unwrap();
        assert_eq!(cfg.cards.seed, Some(42));
        assert_eq!(cfg.calendar.utc_offset_minutes, Some(-300));

        cfg.apply("cards.seed", "none").unwrap();
        assert!(cfg.cards.seed.is_none());
        cfg.apply("calendar.utc_offset_minutes", "").unwrap();
        assert!(cfg.calendar.utc_offset_minutes.is_none());
    }

    #[test]
    fn clearing_applies_only_to_optional_keys() {
        let mut cfg = Config::default();
        assert!(cfg.apply("cards.daily_count", "none").is_err());
        assert_eq!(cfg.cards.daily_count, 3);

        cfg.apply("cards.seed", "7").unwrap();
        assert!(cfg.apply("cards.seed", "lucky").is_err());
        assert_eq!(cfg.cards.seed, Some(7));
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let result = cfg.apply("cards.nonexistent_key", "1");
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("cards.daily_count", "three").is_err());
        assert!(cfg.apply("cards.seed", "lucky").is_err());
        assert_eq!(cfg.cards.daily_count, 3);
    }

    #[test]
    fn apply_rejects_out_of_range_values() {
        let mut cfg = Config::default();
        assert!(cfg.apply("cards.daily_count", "53").is_err());
        assert!(cfg.apply("calendar.utc_offset_minutes", "1440").is_err());
        assert!(cfg.apply("log_level", "loud").is_err());
        cfg.apply("log_level", "debug").unwrap();
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn calendar_zone_uses_configured_offset() {
        let cfg = CalendarConfig {
            utc_offset_minutes: Some(60),
        };
        assert_eq!(cfg.zone().offset_minutes(), 60);
    }
}
