use chrono::{DateTime, Utc};
use clap::Subcommand;

use cartomancy_core::daily::load_selection;
use cartomancy_core::storage::DAILY_CARDS_KEY;
use cartomancy_core::{Card, Config, DailySelectionRecord, Journal};

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum JournalAction {
    /// Write a new reflection, tagged with today's cards
    Add {
        /// Reflection text
        text: String,
    },
    /// List reflections, newest first
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Replace the text of a reflection
    Edit {
        /// Entry ID
        id: String,
        /// New text
        text: String,
    },
    /// Delete a reflection
    Delete {
        /// Entry ID
        id: String,
    },
}

/// Names of the cards drawn today, if a draw exists for today.
fn todays_card_names(ctx: &Context) -> Vec<String> {
    match load_selection::<Card, _>(&ctx.db, DAILY_CARDS_KEY) {
        Some(DailySelectionRecord {
            selection_date,
            items,
        }) if selection_date == ctx.today() => items.into_iter().map(|c| c.name).collect(),
        _ => Vec::new(),
    }
}

pub fn run(action: JournalAction, config: Config, now: DateTime<Utc>) -> CliResult {
    let ctx = Context::open(config, now)?;
    let cards = todays_card_names(&ctx);
    let mut journal = Journal::new(&ctx.db).with_zone(ctx.zone);

    match action {
        JournalAction::Add { text } => {
            let entry = journal.add(&text, cards, now)?;
            println!("{}", entry.id);
        }
        JournalAction::List { json } => {
            let entries = journal.list();
            if json {
                return print_json(&entries);
            }
            for entry in &entries {
                println!("{}  {}", entry.date.format("%B %-d, %Y"), entry.id);
                println!("  {}", entry.content);
                if !entry.cards.is_empty() {
                    println!("  cards: {}", entry.cards.join(", "));
                }
            }
        }
        JournalAction::Edit { id, text } => {
            journal.edit(&id, &text, now)?;
            println!("ok");
        }
        JournalAction::Delete { id } => {
            journal.delete(&id)?;
            println!("deleted");
        }
    }
    Ok(())
}
