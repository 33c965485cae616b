//! Friends list and daily-card comparisons.
//!
//! Friends are kept in insertion order as a single JSON list. There is no
//! account backend, so a friend's card for the day is recorded by hand.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::deck::find_card;
use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{read_json, write_json, KeyValueStore, FRIENDS_KEY};

/// Readings offered when two daily cards are compared.
pub const COMPATIBILITY_READINGS: [&str; 5] = [
    "Your energies complement each other today. A good day for collaboration.",
    "There's some tension between your cards. Take time to listen and understand.",
    "A powerful combination! Creative projects will flourish if you work together.",
    "Your cards suggest a need for space and independence today.",
    "A harmonious match. Your connection feels especially strong right now.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub date_added: DateTime<Utc>,
    /// Name of the card the friend drew, e.g. "Queen of Hearts".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_card: Option<String>,
}

/// Your card next to a friend's, with a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub friend: String,
    pub my_card: String,
    pub friend_card: String,
    pub reading: &'static str,
}

/// Pick a compatibility reading.
pub fn compatibility_reading<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COMPATIBILITY_READINGS
        .choose(rng)
        .copied()
        .unwrap_or(COMPATIBILITY_READINGS[0])
}

pub struct Friends<S> {
    store: S,
}

impl<S: KeyValueStore> Friends<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// All friends in the order they were added. Unreadable data is logged
    /// and reads as an empty list.
    pub fn list(&self) -> Vec<Friend> {
        match read_json::<Vec<Friend>, _>(&self.store, FRIENDS_KEY) {
            Ok(friends) => friends.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(key = FRIENDS_KEY, error = %e, "discarding unreadable friends list");
                Vec::new()
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Friend> {
        self.list().into_iter().find(|f| f.id == id)
    }

    /// Add a friend by name. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    /// A blank name is rejected; store write failures are returned.
    pub fn add(&mut self, name: &str, now: DateTime<Utc>) -> Result<Friend> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: "name".into(),
                message: "friend name is empty".into(),
            }
            .into());
        }
        let friend = Friend {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            date_added: now,
            daily_card: None,
        };
        let mut friends = self.list();
        friends.push(friend.clone());
        self.save(&friends)?;
        Ok(friend)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        let mut friends = self.list();
        let before = friends.len();
        friends.retain(|f| f.id != id);
        if friends.len() == before {
            return Err(not_found(id));
        }
        self.save(&friends)
    }

    /// Record the friend's card by deck id, e.g. `hearts-12`.
    pub fn set_card(&mut self, id: &str, card_id: &str) -> Result<Friend> {
        let card = find_card(card_id).ok_or_else(|| ValidationError::NotFound {
            kind: "card".into(),
            id: card_id.to_string(),
        })?;
        let mut friends = self.list();
        let friend = friends
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| not_found(id))?;
        friend.daily_card = Some(card.name);
        let updated = friend.clone();
        self.save(&friends)?;
        Ok(updated)
    }

    /// Compare `my_card` with the friend's recorded card.
    ///
    /// # Errors
    /// Unknown friend, or a friend with no card recorded.
    pub fn compare<R: Rng + ?Sized>(
        &self,
        id: &str,
        my_card: &str,
        rng: &mut R,
    ) -> Result<Comparison> {
        let friend = self.get(id).ok_or_else(|| not_found(id))?;
        let friend_card = friend.daily_card.ok_or_else(|| ValidationError::InvalidValue {
            field: "daily_card".into(),
            message: format!("no card recorded for {}", friend.name),
        })?;
        Ok(Comparison {
            friend: friend.name,
            my_card: my_card.to_string(),
            friend_card,
            reading: compatibility_reading(rng),
        })
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        write_json(&self.store, FRIENDS_KEY, friends)?;
        Ok(())
    }
}

fn not_found(id: &str) -> CoreError {
    ValidationError::NotFound {
        kind: "friend".into(),
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn add_trims_name_and_keeps_order() {
        let mut friends = Friends::new(MemoryStore::new());
        let sarah = friends.add("  Sarah ", ts("2024-03-10T09:00:00Z")).unwrap();
        let emma = friends.add("Emma", ts("2024-03-11T09:00:00Z")).unwrap();

        assert_eq!(sarah.name, "Sarah");
        assert_eq!(friends.list(), vec![sarah.clone(), emma]);
        assert_eq!(friends.get(&sarah.id).unwrap().date_added, ts("2024-03-10T09:00:00Z"));
    }

    #[test]
    fn blank_name_is_rejected() {
        let mut friends = Friends::new(MemoryStore::new());
        let err = friends.add(" \t", ts("2024-03-10T09:00:00Z")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(_)));
        assert!(friends.list().is_empty());
    }

    #[test]
    fn remove_and_unknown_id() {
        let mut friends = Friends::new(MemoryStore::new());
        let a = friends.add("A", ts("2024-03-10T09:00:00Z")).unwrap();
        let b = friends.add("B", ts("2024-03-10T09:01:00Z")).unwrap();
        friends.remove(&a.id).unwrap();
        assert_eq!(friends.list(), vec![b]);
        assert!(matches!(
            friends.remove(&a.id),
            Err(CoreError::InvalidArgument(ValidationError::NotFound { .. }))
        ));
    }

    #[test]
    fn stored_shape_uses_camel_case() {
        let store = MemoryStore::new();
        let mut friends = Friends::new(&store);
        friends.add("Sarah", ts("2024-03-10T09:00:00Z")).unwrap();
        let raw = store.read(FRIENDS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"dateAdded\":\"2024-03-10T09:00:00Z\""));
        assert!(!raw.contains("dailyCard"));
    }

    #[test]
    fn compare_requires_friend_card() {
        let mut friends = Friends::new(MemoryStore::new());
        let sarah = friends.add("Sarah", ts("2024-03-10T09:00:00Z")).unwrap();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);

        assert!(friends.compare(&sarah.id, "Ace of Hearts", &mut rng).is_err());

        friends.set_card(&sarah.id, "hearts-12").unwrap();
        let comparison = friends.compare(&sarah.id, "Ace of Hearts", &mut rng).unwrap();
        assert_eq!(comparison.friend, "Sarah");
        assert_eq!(comparison.friend_card, "Queen of Hearts");
        assert_eq!(comparison.my_card, "Ace of Hearts");
        assert!(COMPATIBILITY_READINGS.contains(&comparison.reading));
    }

    #[test]
    fn set_card_rejects_unknown_card_and_friend() {
        let mut friends = Friends::new(MemoryStore::new());
        let sarah = friends.add("Sarah", ts("2024-03-10T09:00:00Z")).unwrap();
        assert!(friends.set_card(&sarah.id, "cups-3").is_err());
        assert!(friends.set_card("nobody", "hearts-1").is_err());
        assert!(friends.get(&sarah.id).unwrap().daily_card.is_none());
    }

    #[test]
    fn corrupt_list_reads_as_empty() {
        let store = MemoryStore::new();
        store.write(FRIENDS_KEY, "[{\"id\":").unwrap();
        assert!(Friends::new(&store).list().is_empty());
    }

    struct FullDisk;

    impl KeyValueStore for FullDisk {
        fn read(&self, _key: &str) -> std::result::Result<Option<String>, StoreError> {
            Ok(None)
        }

        fn write(&self, key: &str, _value: &str) -> std::result::Result<(), StoreError> {
            Err(StoreError::WriteFailed {
                key: key.to_string(),
                message: "disk full".into(),
            })
        }
    }

    #[test]
    fn write_failure_is_reported() {
        let mut friends = Friends::new(FullDisk);
        let err = friends.add("Sarah", ts("2024-03-10T09:00:00Z")).unwrap_err();
        assert!(matches!(err, CoreError::Store(StoreError::WriteFailed { .. })));
    }
}
