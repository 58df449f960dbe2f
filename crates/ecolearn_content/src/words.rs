//! Environmental word search: find hidden vocabulary against the clock.
//!
//! Each item is one target word worth ten points per letter. Eight of the
//! twelve words are drawn per session against a five-minute countdown.
//! How the word is hidden is the presentation's business; the engine only
//! judges guesses, folding case and surrounding whitespace.

use ecolearn_engine::{Catalog, ChallengeItem, Difficulty, Outcome, SessionConfig, TimerScope};
use serde::{Deserialize, Serialize};

/// One hidden word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPrompt {
    /// The word to find, uppercase.
    pub word: String,
}

/// A word the player claims to have found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGuess(pub String);

/// Points per letter of a found word.
pub const POINTS_PER_LETTER: u32 = 10;

const WORDS: [&str; 12] = [
    "RECYCLE", "SOLAR", "WATER", "FOREST", "CLIMATE", "CARBON", "ORGANIC", "ENERGY", "WASTE",
    "GREEN", "PLANT", "OZONE",
];

fn difficulty_for(word: &str) -> Difficulty {
    match word.len() {
        0..=5 => Difficulty::Easy,
        6 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

/// The built-in vocabulary list.
pub fn word_list() -> Catalog<WordPrompt, WordGuess> {
    let items = WORDS
        .iter()
        .map(|word| {
            let target = *word;
            ChallengeItem::new(
                target.to_ascii_lowercase(),
                WordPrompt {
                    word: target.to_owned(),
                },
                "vocabulary",
                difficulty_for(target),
                POINTS_PER_LETTER * target.len() as u32,
                move |guess: &WordGuess| {
                    if guess.0.trim().eq_ignore_ascii_case(target) {
                        Outcome::Correct
                    } else {
                        Outcome::Incorrect
                    }
                },
            )
        })
        .collect();
    Catalog::new(items).expect("built-in words are distinct")
}

/// Session shape for the word search: eight words in five minutes, misses
/// free, retries open.
pub fn word_search() -> SessionConfig {
    SessionConfig::default()
        .with_item_count(8)
        .with_timer_scope(TimerScope::PerSession { seconds: 300 })
        .with_allow_retry(true)
        .with_max_hints_per_item(0)
        .with_resolve_display_ms(600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_words_priced_by_length() {
        let list = word_list();
        assert_eq!(list.len(), 12);
        let recycle = list.items().iter().find(|item| item.id() == "recycle").unwrap();
        assert_eq!(recycle.points_base(), 70);
        let ozone = list.items().iter().find(|item| item.id() == "ozone").unwrap();
        assert_eq!(ozone.points_base(), 50);
    }

    #[test]
    fn test_guesses_fold_case_and_whitespace() {
        let list = word_list();
        let solar = list.items().iter().find(|item| item.id() == "solar").unwrap();
        assert_eq!(solar.resolve(&WordGuess("solar".into())), Outcome::Correct);
        assert_eq!(solar.resolve(&WordGuess(" SOLAR ".into())), Outcome::Correct);
        assert_eq!(solar.resolve(&WordGuess("lunar".into())), Outcome::Incorrect);
    }

    #[test]
    fn test_preset_draws_eight_against_one_countdown() {
        let config = word_search();
        assert_eq!(config.item_count, 8);
        assert_eq!(config.timer_scope, TimerScope::PerSession { seconds: 300 });
        assert!(config.allow_retry);
        assert_eq!(config.policy.incorrect_penalty, 0);
    }
}
