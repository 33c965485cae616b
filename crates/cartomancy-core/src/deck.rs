//! The 52-card playing deck used for readings.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of cards in a full deck.
pub const DECK_SIZE: usize = 52;

const FALLBACK_MEANING: &str = "Meaning to be discovered";

const READING_PREFIXES: [&str; 5] = [
    "Today, this card suggests that you",
    "For you today, this means",
    "This card's energy invites you to",
    "Consider how you might",
    "Reflect on ways you can",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn as_str(&self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
            Suit::Spades => "Spades",
        }
    }

    // Index matches value - 1.
    fn meanings(&self) -> &'static [&'static str; 13] {
        match self {
            Suit::Hearts => &[
                "New beginnings in love, happiness, and emotional fulfillment",
                "Partnership, mutual attraction, and shared feelings",
                "Celebration, friendship, and creative expression",
                "Stability in relationships, emotional security",
                "Loss, disappointment, but potential for renewal",
                "Nostalgia, reunion, healing of relationships",
                "Daydreams, fantasy, new possibilities in love",
                "Leaving something behind for something better",
                "Wishes fulfilled, contentment, emotional satisfaction",
                "Perfect love, harmony in relationships, happy family life",
                "Young person in love, messenger of love",
                "Loving, nurturing person, emotional intelligence",
                "Wise and loving counsel, emotional mastery",
            ],
            Suit::Diamonds => &[
                "New financial opportunity, manifestation",
                "Balance in finances, weighing options",
                "Mastery of skills, recognition of talents",
                "Financial security, material stability",
                "Material loss, but opportunity for growth",
                "Generosity, gifts, material comfort",
                "Assessment of values, long-term investments",
                "Skilled work, attention to detail",
                "Material abundance, luxury, self-sufficiency",
                "Family wealth, material success, inheritance",
                "Student of wealth, ambitious young person",
                "Financially savvy, practical person",
                "Financial mastery, business acumen",
            ],
            Suit::Clubs => &[
                "New ideas, inspiration, spiritual awakening",
                "Decisions about direction, partnership in ventures",
                "Enterprise, trade, adventure",
                "Community, celebration, completion",
                "Competition, tests of strength",
                "Victory after struggle, progress",
                "Victory through courage, overcoming odds",
                "Movement, quick developments",
                "Resilience, strength, preparedness",
                "Success in business, achievement",
                "Energetic youth, bearer of news",
                "Warm, social, creative person",
                "Leadership, authority, power",
            ],
            Suit::Spades => &[
                "Breakthrough, new perspective, transformation",
                "Difficult choice, stalemate, peace through wisdom",
                "Heartbreak, but growth through pain",
                "Rest, recuperation, contemplation",
                "Defeat, but opportunity for change",
                "Transition, moving forward, healing",
                "Deception, but wisdom through challenge",
                "Restriction, but potential for freedom",
                "Anxiety, but deep wisdom available",
                "Ending, but potential for rebirth",
                "Vigilant youth, bearer of challenging news",
                "Perceptive, transformative person",
                "Authority, wisdom through experience",
            ],
        }
    }
}

/// A single playing card with its divinatory meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// `<suit>-<value>`, e.g. `hearts-1`.
    pub id: String,
    pub name: String,
    pub suit: Suit,
    /// 1 = Ace, 11 = Jack, 12 = Queen, 13 = King.
    pub value: u8,
    pub meaning: String,
}

impl Card {
    pub fn new(suit: Suit, value: u8) -> Option<Self> {
        if !(1..=13).contains(&value) {
            return None;
        }
        let meaning = suit
            .meanings()
            .get(usize::from(value) - 1)
            .copied()
            .unwrap_or(FALLBACK_MEANING);
        Some(Self {
            id: format!("{}-{}", suit.as_str(), value),
            name: format!("{} of {}", rank_name(value), suit.title()),
            suit,
            value,
            meaning: meaning.to_string(),
        })
    }
}

fn rank_name(value: u8) -> String {
    match value {
        1 => "Ace".to_string(),
        11 => "Jack".to_string(),
        12 => "Queen".to_string(),
        13 => "King".to_string(),
        n => n.to_string(),
    }
}

/// Full deck, suits in hearts/diamonds/clubs/spades order, values ascending.
pub fn generate_deck() -> Vec<Card> {
    Suit::ALL
        .iter()
        .flat_map(|&suit| (1..=13).filter_map(move |value| Card::new(suit, value)))
        .collect()
}

/// Look a card up by its id.
pub fn find_card(id: &str) -> Option<Card> {
    let (suit, value) = id.split_once('-')?;
    let suit = Suit::ALL.into_iter().find(|s| s.as_str() == suit)?;
    Card::new(suit, value.parse().ok()?)
}

/// A reading of `card` phrased for the user, opening with a randomly chosen
/// prefix.
pub fn personalized_meaning<R: Rng + ?Sized>(card: &Card, rng: &mut R) -> String {
    let prefix = READING_PREFIXES
        .choose(rng)
        .copied()
        .unwrap_or(READING_PREFIXES[0]);
    let meaning = card
        .meaning
        .to_lowercase()
        .replacen("but", "and", 1)
        .replacen("potential for", "opportunity for", 1)
        .replacen("through", "by embracing", 1);
    format!("{prefix} {meaning}.")
}
