//! Once-per-day content: the daily draw and the time-of-day greeting.

mod greeting;
pub mod selection;

pub use greeting::Greeting;
pub use selection::{draw_distinct, load_selection, DailySelectionEngine, DailySelectionRecord};

use rand::SeedableRng;
use rand_pcg::Mcg128Xsl64;

/// Random source for draws: reproducible when `seed` is given, otherwise
/// seeded from OS entropy.
pub fn seeded_rng(seed: Option<u64>) -> Mcg128Xsl64 {
    match seed {
        Some(s) => Mcg128Xsl64::seed_from_u64(s),
        None => Mcg128Xsl64::from_entropy(),
    }
}
