use chrono::{DateTime, Utc};
use clap::Subcommand;

use cartomancy_core::{planet_for, week_ahead, Config, PlanetaryPath};

use super::{parse_date, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum PlanetsAction {
    /// The next seven days and their planets
    Week {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Planet, challenge and progress for a date
    Show {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Toggle the challenge for a date as completed
    Toggle {
        /// Date (YYYY-MM-DD)
        date: String,
    },
    /// Set notes for a date
    Note {
        /// Date (YYYY-MM-DD)
        date: String,
        /// Note text
        text: String,
    },
}

pub fn run(action: PlanetsAction, config: Config, now: DateTime<Utc>) -> CliResult {
    let ctx = Context::open(config, now)?;
    let mut path = PlanetaryPath::new(&ctx.db);

    match action {
        PlanetsAction::Week { json } => {
            let week = week_ahead(ctx.today());
            if json {
                return print_json(&week);
            }
            for day in &week {
                let done = if path.progress(day.date).completed { "x" } else { " " };
                let marker = if day.is_today { " (today)" } else { "" };
                println!(
                    "[{done}] {} {:<8} {}{marker}",
                    day.date.format("%a %b %-d"),
                    day.planet.name(),
                    day.planet.theme()
                );
            }
        }
        PlanetsAction::Show { date } => {
            let date = parse_date(&date)?;
            let planet = planet_for(date);
            let progress = path.progress(date);
            println!("{} ({})", planet, date.format("%A"));
            println!("Theme: {}", planet.theme());
            println!("Challenge: {}", planet.challenge());
            println!("Completed: {}", if progress.completed { "yes" } else { "no" });
            if !progress.notes.is_empty() {
                println!("Notes: {}", progress.notes);
            }
        }
        PlanetsAction::Toggle { date } => {
            let date = parse_date(&date)?;
            let progress = path.toggle_complete(date)?;
            println!(
                "{date}: {}",
                if progress.completed { "completed" } else { "not completed" }
            );
        }
        PlanetsAction::Note { date, text } => {
            let date = parse_date(&date)?;
            path.set_notes(date, &text)?;
            println!("ok");
        }
    }
    Ok(())
}
