use chrono::{DateTime, Utc};
use clap::Subcommand;

use cartomancy_core::deck::{find_card, personalized_meaning};
use cartomancy_core::{generate_deck, seeded_rng, Config, DailySelectionEngine};

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum CardsAction {
    /// Today's cards, drawn once per day
    Draw {
        /// Number of cards (defaults to cards.daily_count)
        #[arg(long)]
        count: Option<usize>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the full deck
    Deck {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// A personal reading for one card
    Meaning {
        /// Card ID (e.g. "hearts-1")
        id: String,
    },
}

pub fn run(action: CardsAction, config: Config, now: DateTime<Utc>) -> CliResult {
    match action {
        CardsAction::Draw { count, json } => {
            let ctx = Context::open(config, now)?;
            let count = count.unwrap_or(ctx.config.cards.daily_count);
            let mut engine = DailySelectionEngine::new(&ctx.db, seeded_rng(ctx.config.cards.seed));
            let cards = engine.get_or_draw(&generate_deck(), count, ctx.today())?;
            if json {
                return print_json(&cards);
            }
            for card in &cards {
                println!("{} [{}]: {}", card.name, card.id, card.meaning);
            }
        }
        CardsAction::Deck { json } => {
            let deck = generate_deck();
            if json {
                return print_json(&deck);
            }
            for card in &deck {
                println!("{:<12} {:<18} {}", card.id, card.name, card.meaning);
            }
        }
        CardsAction::Meaning { id } => {
            let card = find_card(&id).ok_or_else(|| format!("unknown card: {id}"))?;
            let mut rng = seeded_rng(config.cards.seed);
            println!("{}", card.name);
            println!("{}", personalized_meaning(&card, &mut rng));
        }
    }
    Ok(())
}
