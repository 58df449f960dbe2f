//! Eco escape room: four chained puzzles against one session countdown.
//!
//! Each room poses a calculation whose numeric answer is the door code.
//! Answers are free text, matched after trimming and without regard to
//! case. Retries stay open at a ten-point cost per failed attempt, hints
//! cost twenty-five, and the time bonus pays one point per ten seconds
//! left on the session clock.

use ecolearn_engine::{
    Catalog, ChallengeItem, Difficulty, Outcome, ScoringPolicy, SessionConfig, TimerScope,
};
use serde::{Deserialize, Serialize};

/// One escape-room puzzle as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzlePrompt {
    /// Room number, starting at one.
    pub room: u32,
    /// Room name.
    pub title: String,
    /// Scene-setting text.
    pub description: String,
    /// The puzzle itself.
    pub question: String,
    /// Revealed on request, at a cost.
    pub hint: String,
}

/// A typed-in door code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleAnswer(pub String);

type Puzzle = (
    &'static str,
    &'static str,
    u32,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    Difficulty,
    u32,
);

#[rustfmt::skip]
const PUZZLES: [Puzzle; 4] = [
    (
        "waste-sorting", "Recycling Chamber", 1,
        "The first door is sealed behind a wall of mixed waste.",
        "Each waste type maps to a digit: Paper=1, Glass=7, Plastic=4, Organic=2. \
         Enter the code for Paper, Plastic, Glass, Organic.",
        "1472",
        "Read the digits in the order the items are listed, not the order in the legend.",
        Difficulty::Easy, 100,
    ),
    (
        "energy-calculation", "Solar Energy Lab", 2,
        "Panels hum overhead; the exit lock wants a power reading.",
        "A solar panel produces 300 watts per hour. How many kilowatt-hours do \
         two hours of sunlight produce? Answer as a decimal.",
        "0.6",
        "Multiply watts by hours, then divide by 1000 to convert to kWh.",
        Difficulty::Medium, 150,
    ),
    (
        "water-conservation", "Hydro Conservation Center", 3,
        "Water gauges line the walls of the third room.",
        "A dripping tap wastes 4 liters a day. Fixing it on day one, how many \
         liters does a household save over two weeks?",
        "56",
        "Two weeks is 14 days. Multiply the daily waste by the days saved.",
        Difficulty::Medium, 125,
    ),
    (
        "carbon-footprint", "Climate Control Room", 4,
        "The final door tracks your footprint. One honest number opens it.",
        "A car emits 250 grams of CO2 per kilometer, the bus only 80. How \
         many grams does taking the bus save on a 20 km trip?",
        "3400",
        "Find the savings per kilometer first, then multiply by the distance.",
        Difficulty::Hard, 175,
    ),
];

/// The four built-in escape rooms.
pub fn escape_catalog() -> Catalog<PuzzlePrompt, PuzzleAnswer> {
    let items = PUZZLES
        .iter()
        .map(
            |(id, title, room, description, question, code, hint, difficulty, points)| {
                let code = *code;
                ChallengeItem::new(
                    *id,
                    PuzzlePrompt {
                        room: *room,
                        title: (*title).to_owned(),
                        description: (*description).to_owned(),
                        question: (*question).to_owned(),
                        hint: (*hint).to_owned(),
                    },
                    "escape",
                    *difficulty,
                    *points,
                    move |answer: &PuzzleAnswer| {
                        if answer.0.trim().eq_ignore_ascii_case(code) {
                            Outcome::Correct
                        } else {
                            Outcome::Incorrect
                        }
                    },
                )
            },
        )
        .collect();
    Catalog::new(items).expect("built-in room ids are distinct")
}

/// Session shape for the escape room: all four rooms against one
/// fifteen-minute countdown, retries allowed.
pub fn escape_room() -> SessionConfig {
    SessionConfig::default()
        .with_item_count(4)
        .with_timer_scope(TimerScope::PerSession { seconds: 900 })
        .with_allow_retry(true)
        .with_max_hints_per_item(1)
        .with_policy(
            ScoringPolicy::default()
                .with_time_bonus_weight(1)
                .with_time_bonus_divisor(10)
                .with_hint_penalty(25)
                .with_attempt_penalty(10)
                .with_min_award_on_correct(25),
        )
        .with_resolve_display_ms(1_500)
}
