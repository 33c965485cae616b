use chrono::{DateTime, Utc};
use clap::Subcommand;

use cartomancy_core::{generate_deck, seeded_rng, Config, DailySelectionEngine, Friends};

use super::{print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum FriendsAction {
    /// Add a friend
    Add {
        /// Friend's name
        name: String,
    },
    /// List friends
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a friend
    Remove {
        /// Friend ID
        id: String,
    },
    /// Record the card a friend drew today
    Card {
        /// Friend ID
        id: String,
        /// Card ID (e.g. "hearts-12")
        card: String,
    },
    /// Compare your first card of the day with a friend's
    Compare {
        /// Friend ID
        id: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: FriendsAction, config: Config, now: DateTime<Utc>) -> CliResult {
    let ctx = Context::open(config, now)?;
    let mut friends = Friends::new(&ctx.db);

    match action {
        FriendsAction::Add { name } => {
            let friend = friends.add(&name, now)?;
            println!("{}", friend.id);
        }
        FriendsAction::List { json } => {
            let list = friends.list();
            if json {
                return print_json(&list);
            }
            for friend in &list {
                let card = friend.daily_card.as_deref().unwrap_or("-");
                println!("{}  {:<16} {}", friend.id, friend.name, card);
            }
        }
        FriendsAction::Remove { id } => {
            friends.remove(&id)?;
            println!("removed");
        }
        FriendsAction::Card { id, card } => {
            let friend = friends.set_card(&id, &card)?;
            println!("{}: {}", friend.name, friend.daily_card.unwrap_or_default());
        }
        FriendsAction::Compare { id, json } => {
            let mut rng = seeded_rng(ctx.config.cards.seed);
            let count = ctx.config.cards.daily_count.max(1);
            let mut engine = DailySelectionEngine::new(&ctx.db, seeded_rng(ctx.config.cards.seed));
            let mine = engine.get_or_draw(&generate_deck(), count, ctx.today())?;
            let my_card = mine
                .into_iter()
                .next()
                .map(|c| c.name)
                .ok_or("no card drawn today")?;
            let comparison = friends.compare(&id, &my_card, &mut rng)?;
            if json {
                return print_json(&comparison);
            }
            println!("You: {}", comparison.my_card);
            println!("{}: {}", comparison.friend, comparison.friend_card);
            println!("{}", comparison.reading);
        }
    }
    Ok(())
}
