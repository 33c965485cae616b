use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cartomancy_core::Config;

mod commands;

#[derive(Parser)]
#[command(name = "cartomancy", version, about = "Cartomancy CLI")]
struct Cli {
    /// Act as if the current time were this RFC 3339 timestamp
    #[arg(long, global = true)]
    at: Option<DateTime<Utc>>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Greeting, moon, streak and today's cards
    Today {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Daily card draw and the deck
    Cards {
        #[command(subcommand)]
        action: commands::cards::CardsAction,
    },
    /// Visit streak
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Moon phase and sign
    Moon {
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Planetary path
    Planets {
        #[command(subcommand)]
        action: commands::planets::PlanetsAction,
    },
    /// Reflection journal
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Friends and card comparisons
    Friends {
        #[command(subcommand)]
        action: commands::friends::FriendsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = Config::load_or_default();
    init_tracing(&config);

    let now = cli.at.unwrap_or_else(Utc::now);
    let result = match cli.command {
        Commands::Today { json } => commands::today::run(config, now, json),
        Commands::Cards { action } => commands::cards::run(action, config, now),
        Commands::Streak { action } => commands::streak::run(action, config, now),
        Commands::Moon { date } => commands::moon::run(date, config, now),
        Commands::Planets { action } => commands::planets::run(action, config, now),
        Commands::Journal { action } => commands::journal::run(action, config, now),
        Commands::Friends { action } => commands::friends::run(action, config, now),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
