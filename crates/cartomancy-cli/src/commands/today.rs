use chrono::{DateTime, Utc};

use cartomancy_core::{open_today, seeded_rng, Config};

use super::{print_json, CliResult, Context};

pub fn run(config: Config, now: DateTime<Utc>, json: bool) -> CliResult {
    let ctx = Context::open(config, now)?;
    let report = open_today(
        &ctx.db,
        seeded_rng(ctx.config.cards.seed),
        &ctx.clock,
        ctx.zone,
        ctx.config.cards.daily_count,
    )?;

    if json {
        return print_json(&report);
    }

    println!("{}", report.greeting);
    println!("{} in {}", report.moon_phase, report.moon_sign);
    println!(
        "{} -- {}: {}",
        report.date.format("%B %-d"),
        report.planet,
        report.planet.theme()
    );
    println!(
        "Streak: {} day(s) (best {})",
        report.streak.record.current_streak, report.streak.record.highest_streak
    );
    println!();
    println!("Here's today's cards");
    for card in &report.cards {
        println!("  {} [{}]: {}", card.name, card.id, card.meaning);
    }
    Ok(())
}
