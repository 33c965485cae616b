use chrono::{DateTime, Utc};
use clap::Subcommand;

use cartomancy_core::{Config, StreakTracker, StreakTransition};

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Show the stored streak without recording a visit
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record today's visit
    Update {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StreakAction, config: Config, now: DateTime<Utc>) -> CliResult {
    let ctx = Context::open(config, now)?;
    let mut tracker = StreakTracker::new(&ctx.db)
        .with_clock(&ctx.clock)
        .with_zone(ctx.zone);

    match action {
        StreakAction::Show { json } => {
            let record = tracker.current();
            if json {
                return print_json(&record);
            }
            println!(
                "current: {}\nhighest: {}\nlast visit: {}",
                record.current_streak,
                record.highest_streak,
                record.last_visit.to_rfc3339()
            );
        }
        StreakAction::Update { json } => {
            let update = tracker.record_visit(now);
            if json {
                return print_json(&update);
            }
            let note = match update.transition {
                StreakTransition::SameDay => "already counted today",
                StreakTransition::ConsecutiveDay => "streak extended",
                StreakTransition::Gap => "streak started",
            };
            println!(
                "{note}: {} day(s) (best {})",
                update.record.current_streak, update.record.highest_streak
            );
            if !update.persisted {
                eprintln!("warning: streak could not be saved");
            }
        }
    }
    Ok(())
}
