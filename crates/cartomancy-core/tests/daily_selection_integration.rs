//! Integration tests for the daily draw against an on-disk database.

use std::collections::HashSet;

use cartomancy_core::storage::DAILY_CARDS_KEY;
use cartomancy_core::{
    generate_deck, Card, DailySelectionEngine, DailySelectionRecord, Database, KeyValueStore,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;
use tempfile::TempDir;

fn day(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn draw_survives_reopening_the_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cartomancy.db");
    let deck = generate_deck();

    let first = {
        let db = Database::open_at(&path).unwrap();
        let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(1));
        engine.get_or_draw(&deck, 3, day("2024-03-10")).unwrap()
    };

    let db = Database::open_at(&path).unwrap();
    let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(2));
    let again = engine.get_or_draw(&deck, 3, day("2024-03-10")).unwrap();
    assert_eq!(first, again);

    let record: DailySelectionRecord<Card> = engine.stored().unwrap();
    assert_eq!(record.selection_date, day("2024-03-10"));
    assert_eq!(record.items, first);
}

#[test]
fn numbered_population_scenario() {
    let db = Database::open_memory().unwrap();
    let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(10));
    let population: Vec<u32> = (1..=13).collect();

    let a = engine.get_or_draw(&population, 3, day("2024-03-10")).unwrap();
    let b = engine.get_or_draw(&population, 3, day("2024-03-10")).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.iter().collect::<HashSet<_>>().len(), 3);
    assert!(a.iter().all(|v| population.contains(v)));
}

#[test]
fn stored_record_matches_wire_shape() {
    let db = Database::open_memory().unwrap();
    let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(3));
    engine
        .get_or_draw(&["a", "b", "c"].map(String::from), 2, day("2024-03-10"))
        .unwrap();

    let raw = engine.store().read(DAILY_CARDS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["selectionDate"], "2024-03-10");
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

proptest! {
    #[test]
    fn draw_returns_count_distinct_members(len in 1usize..60, pick in 0usize..60, seed: u64) {
        let count = pick % (len + 1);
        let population: Vec<usize> = (0..len).collect();
        let db = Database::open_memory().unwrap();
        let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(seed));

        let items = engine.get_or_draw(&population, count, day("2024-03-10")).unwrap();
        prop_assert_eq!(items.len(), count);
        prop_assert_eq!(items.iter().collect::<HashSet<_>>().len(), count);
        prop_assert!(items.iter().all(|i| *i < len));

        let again = engine.get_or_draw(&population, count, day("2024-03-10")).unwrap();
        prop_assert_eq!(items, again);
    }

    #[test]
    fn oversized_count_never_writes(len in 0usize..20, extra in 1usize..10) {
        let population: Vec<usize> = (0..len).collect();
        let db = Database::open_memory().unwrap();
        let mut engine = DailySelectionEngine::new(db, Mcg128Xsl64::seed_from_u64(0));
        prop_assert!(engine.get_or_draw(&population, len + extra, day("2024-03-10")).is_err());
        prop_assert!(engine.store().read(DAILY_CARDS_KEY).unwrap().is_none());
    }
}
