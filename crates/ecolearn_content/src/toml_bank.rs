//! External question banks in TOML.
//!
//! Teachers can hand the quiz their own questions instead of the built-in
//! bank. A bank file is a list of `[[questions]]` tables:
//!
//! ```toml
//! [[questions]]
//! id = "local-river"
//! question = "Which river runs through our town?"
//! options = ["Ganga", "Kaveri", "Yamuna"]
//! correct = 1
//! category = "water"
//! difficulty = "easy"
//! explanation = "The Kaveri supplies most of the town's drinking water."
//! # points defaults to 100
//! ```
//!
//! Loading validates what the types cannot: at least one question, at
//! least two options each, and an answer index inside the options.

use crate::quiz::{QUESTION_POINTS, QuizAnswer, QuizCategory, QuizPrompt};
use derive_more::{Display, Error};
use ecolearn_engine::{Catalog, ChallengeItem, Difficulty, Outcome};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Question bank error.
#[derive(Debug, Clone, Display, Error)]
#[display("Question bank error: {} at {}:{}", message, file, line)]
pub struct BankError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BankError {
    /// Creates a new question bank error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[instrument]
fn default_points() -> u32 {
    QUESTION_POINTS
}

/// One `[[questions]]` table.
#[derive(Debug, Clone, Deserialize)]
struct BankQuestion {
    id: String,
    question: String,
    options: Vec<String>,
    correct: usize,
    category: QuizCategory,
    difficulty: Difficulty,
    explanation: String,
    #[serde(default = "default_points")]
    points: u32,
}

/// A whole bank file.
#[derive(Debug, Clone, Deserialize)]
struct BankFile {
    questions: Vec<BankQuestion>,
}

/// Loads a quiz catalog from a TOML bank file.
#[instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_quiz_bank(
    path: impl AsRef<Path>,
) -> Result<Catalog<QuizPrompt, QuizAnswer>, BankError> {
    debug!("Loading question bank");
    let content = std::fs::read_to_string(path.as_ref())
        .map_err(|e| BankError::new(format!("Failed to read bank file: {}", e)))?;
    parse_quiz_bank(&content)
}

/// Parses and validates TOML bank text into a quiz catalog.
#[instrument(skip(text))]
pub fn parse_quiz_bank(text: &str) -> Result<Catalog<QuizPrompt, QuizAnswer>, BankError> {
    let bank: BankFile = toml::from_str(text)
        .map_err(|e| BankError::new(format!("Failed to parse bank: {}", e)))?;

    if bank.questions.is_empty() {
        return Err(BankError::new("Bank contains no questions".to_string()));
    }

    let mut items = Vec::with_capacity(bank.questions.len());
    for q in bank.questions {
        if q.options.len() < 2 {
            return Err(BankError::new(format!(
                "Question '{}' needs at least two options",
                q.id
            )));
        }
        if q.correct >= q.options.len() {
            return Err(BankError::new(format!(
                "Question '{}' marks option {} correct but only has {}",
                q.id,
                q.correct,
                q.options.len()
            )));
        }
        let correct = q.correct;
        items.push(ChallengeItem::new(
            q.id,
            QuizPrompt {
                question: q.question,
                options: q.options,
                explanation: q.explanation,
            },
            q.category.to_string(),
            q.difficulty,
            q.points,
            move |answer: &QuizAnswer| {
                if answer.0 == correct {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            },
        ));
    }

    let catalog = Catalog::new(items)
        .map_err(|e| BankError::new(format!("Invalid bank: {}", e)))?;
    info!(questions = catalog.len(), "Question bank loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD_BANK: &str = r#"
        [[questions]]
        id = "local-river"
        question = "Which river runs through our town?"
        options = ["Ganga", "Kaveri", "Yamuna"]
        correct = 1
        category = "water"
        difficulty = "easy"
        explanation = "The Kaveri supplies most of the town's drinking water."

        [[questions]]
        id = "local-tree"
        question = "Which native tree shades the school yard?"
        options = ["Neem", "Eucalyptus"]
        correct = 0
        category = "biodiversity"
        difficulty = "medium"
        explanation = "Neem is native; eucalyptus was introduced."
        points = 150
    "#;

    #[test]
    fn test_good_bank_loads_with_defaulted_points() {
        let catalog = parse_quiz_bank(GOOD_BANK).unwrap();
        assert_eq!(catalog.len(), 2);
        let river = catalog
            .items()
            .iter()
            .find(|item| item.id() == "local-river")
            .unwrap();
        assert_eq!(river.points_base(), QUESTION_POINTS);
        assert_eq!(river.category(), "water");
        assert_eq!(river.resolve(&QuizAnswer(1)), Outcome::Correct);
        let tree = catalog
            .items()
            .iter()
            .find(|item| item.id() == "local-tree")
            .unwrap();
        assert_eq!(tree.points_base(), 150);
    }

    #[test]
    fn test_empty_bank_is_rejected() {
        let err = parse_quiz_bank("questions = []").unwrap_err();
        assert!(err.message.contains("no questions"));
    }

    #[test]
    fn test_out_of_range_answer_is_rejected() {
        let bank = r#"
            [[questions]]
            id = "broken"
            question = "Pick one"
            options = ["a", "b"]
            correct = 2
            category = "general"
            difficulty = "easy"
            explanation = "unreachable"
        "#;
        let err = parse_quiz_bank(bank).unwrap_err();
        assert!(err.message.contains("broken"));
    }

    #[test]
    fn test_single_option_question_is_rejected() {
        let bank = r#"
            [[questions]]
            id = "lonely"
            question = "Only one way"
            options = ["a"]
            correct = 0
            category = "general"
            difficulty = "easy"
            explanation = "unreachable"
        "#;
        let err = parse_quiz_bank(bank).unwrap_err();
        assert!(err.message.contains("two options"));
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let bank = r#"
            [[questions]]
            id = "twin"
            question = "First"
            options = ["a", "b"]
            correct = 0
            category = "general"
            difficulty = "easy"
            explanation = "x"

            [[questions]]
            id = "twin"
            question = "Second"
            options = ["a", "b"]
            correct = 1
            category = "general"
            difficulty = "easy"
            explanation = "y"
        "#;
        let err = parse_quiz_bank(bank).unwrap_err();
        assert!(err.message.contains("twin"));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = parse_quiz_bank("[[questions").unwrap_err();
        assert!(err.message.contains("parse"));
    }
}
