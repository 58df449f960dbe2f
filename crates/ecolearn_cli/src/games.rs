//! Terminal views and launchers for the built-in games.

use crate::runner::{GameView, run_session};
use anyhow::{Result, anyhow};
use ecolearn_content::detective::{self, Accusation, CasePrompt};
use ecolearn_content::escape::{self, PuzzleAnswer, PuzzlePrompt};
use ecolearn_content::quiz::{self, QuizAnswer, QuizCategory, QuizPrompt, QuizRating};
use ecolearn_content::sorting::{self, BinChoice, WasteBin, WastePrompt};
use ecolearn_content::toml_bank;
use ecolearn_content::words::{self, WordGuess, WordPrompt};
use ecolearn_engine::{
    CurrentItem, Difficulty, ItemFilter, ItemOutcome, ResolutionRecord, SessionSummary,
};
use std::path::PathBuf;
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Launches the quiz battle.
#[instrument]
pub async fn play_quiz(
    count: usize,
    category: Option<String>,
    difficulty: Option<String>,
    bank: Option<PathBuf>,
    seed: Option<u64>,
    json: bool,
) -> Result<()> {
    let catalog = match bank {
        Some(path) => toml_bank::load_quiz_bank(&path)?,
        None => quiz::question_bank(),
    };
    let mut filter = ItemFilter::default();
    if let Some(name) = category {
        let category = QuizCategory::from_str(&name).map_err(|_| {
            anyhow!("Unknown category '{name}' (one of: {})", list::<QuizCategory>())
        })?;
        filter.category = Some(category.to_string());
    }
    if let Some(name) = difficulty {
        let difficulty = Difficulty::from_str(&name).map_err(|_| {
            anyhow!("Unknown difficulty '{name}' (one of: {})", list::<Difficulty>())
        })?;
        filter.difficulty = Some(difficulty);
    }
    let mut config = quiz::quiz_battle().with_item_count(count);
    if filter != ItemFilter::default() {
        config = config.with_filter(Some(filter));
    }
    run_session(&QuizView, &catalog, config, seed, json).await?;
    Ok(())
}

/// Launches the escape room.
#[instrument]
pub async fn play_escape(seed: Option<u64>, json: bool) -> Result<()> {
    let catalog = escape::escape_catalog();
    run_session(&EscapeView, &catalog, escape::escape_room(), seed, json).await?;
    Ok(())
}

/// Launches the pollution detective.
#[instrument]
pub async fn play_detective(seed: Option<u64>, json: bool) -> Result<()> {
    let catalog = detective::case_files();
    run_session(&DetectiveView, &catalog, detective::pollution_detective(), seed, json).await?;
    Ok(())
}

/// Launches the sorting game.
#[instrument]
pub async fn play_sort(seed: Option<u64>, json: bool) -> Result<()> {
    let catalog = sorting::waste_pile();
    run_session(&SortView, &catalog, sorting::recycle_sorting(), seed, json).await?;
    Ok(())
}

/// Launches the word search.
#[instrument]
pub async fn play_words(seed: Option<u64>, json: bool) -> Result<()> {
    let catalog = words::word_list();
    run_session(&WordsView, &catalog, words::word_search(), seed, json).await?;
    Ok(())
}

/// Comma-separated variant list for error messages.
fn list<E: IntoEnumIterator + ToString>() -> String {
    E::iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

fn delta_text(delta: i64) -> String {
    if delta == 0 {
        "No points lost.".to_owned()
    } else {
        format!("{delta} points")
    }
}

struct QuizView;

impl GameView for QuizView {
    type Prompt = QuizPrompt;
    type Answer = QuizAnswer;

    fn banner(&self) -> String {
        "Eco Quiz Battle! Answer each question by number.".to_owned()
    }

    fn render_prompt(&self, item: &CurrentItem<QuizPrompt>) {
        println!(
            "[{} / {}] {}",
            item.category, item.difficulty, item.prompt.question
        );
        for (index, option) in item.prompt.options.iter().enumerate() {
            println!("  {}) {}", index + 1, option);
        }
    }

    fn parse_answer(&self, line: &str, item: &CurrentItem<QuizPrompt>) -> Option<QuizAnswer> {
        let choice: usize = line.parse().ok()?;
        (1..=item.prompt.options.len())
            .contains(&choice)
            .then(|| QuizAnswer(choice - 1))
    }

    fn render_resolution(&self, record: &ResolutionRecord, item: &CurrentItem<QuizPrompt>) {
        match record.outcome {
            ItemOutcome::Correct => println!("Correct! +{} points", record.delta),
            ItemOutcome::Incorrect => println!("Wrong. {}", delta_text(record.delta)),
            ItemOutcome::TimedOut => println!("Out of time! {}", delta_text(record.delta)),
        }
        println!("  {}", item.prompt.explanation);
    }

    fn hint(&self, _item: &CurrentItem<QuizPrompt>, _hints_taken: u32) -> Option<String> {
        None
    }

    fn epilogue(&self, summary: &SessionSummary) -> Option<String> {
        Some(format!("Rating: {}", QuizRating::for_summary(summary)))
    }
}

struct EscapeView;

impl GameView for EscapeView {
    type Prompt = PuzzlePrompt;
    type Answer = PuzzleAnswer;

    fn banner(&self) -> String {
        "Eco Escape Room. Crack each room's code to unlock the next door.".to_owned()
    }

    fn render_prompt(&self, item: &CurrentItem<PuzzlePrompt>) {
        let puzzle = &item.prompt;
        println!("Room {}: {}", puzzle.room, puzzle.title);
        println!("{}", puzzle.description);
        println!("{}", puzzle.question);
    }

    fn parse_answer(&self, line: &str, _item: &CurrentItem<PuzzlePrompt>) -> Option<PuzzleAnswer> {
        (!line.is_empty()).then(|| PuzzleAnswer(line.to_owned()))
    }

    fn render_resolution(&self, record: &ResolutionRecord, _item: &CurrentItem<PuzzlePrompt>) {
        match record.outcome {
            ItemOutcome::Correct => println!("The door unlocks! +{} points", record.delta),
            _ => println!("The room stays sealed. {}", delta_text(record.delta)),
        }
    }

    fn hint(&self, item: &CurrentItem<PuzzlePrompt>, hints_taken: u32) -> Option<String> {
        (hints_taken > 0).then(|| item.prompt.hint.clone())
    }
}

struct DetectiveView;

impl GameView for DetectiveView {
    type Prompt = CasePrompt;
    type Answer = Accusation;

    fn banner(&self) -> String {
        "Pollution Detective. 'hint' reveals evidence; accuse a suspect by name or number."
            .to_owned()
    }

    fn render_prompt(&self, item: &CurrentItem<CasePrompt>) {
        let case = &item.prompt;
        println!("Case: {}", case.title);
        println!("Location: {}", case.location);
        println!("{}", case.description);
        println!("Suspects:");
        for (index, suspect) in case.suspects.iter().enumerate() {
            println!("  {}) {}", index + 1, suspect);
        }
    }

    fn parse_answer(&self, line: &str, item: &CurrentItem<CasePrompt>) -> Option<Accusation> {
        if let Ok(choice) = line.parse::<usize>() {
            let suspect = item.prompt.suspects.get(choice.checked_sub(1)?)?;
            return Some(Accusation(suspect.clone()));
        }
        (!line.is_empty()).then(|| Accusation(line.to_owned()))
    }

    fn render_resolution(&self, record: &ResolutionRecord, item: &CurrentItem<CasePrompt>) {
        match record.outcome {
            ItemOutcome::Correct => {
                println!("Case closed! +{} points", record.delta);
                println!("  {}", item.prompt.solution);
            }
            _ => println!("The case stays open. {}", delta_text(record.delta)),
        }
    }

    fn hint(&self, item: &CurrentItem<CasePrompt>, hints_taken: u32) -> Option<String> {
        let clue = item.prompt.clues.get(hints_taken.checked_sub(1)? as usize)?;
        Some(format!(
            "{}: {} ({}). {}",
            clue.title, clue.data, clue.value, clue.impact
        ))
    }
}

struct SortView;

impl GameView for SortView {
    type Prompt = WastePrompt;
    type Answer = BinChoice;

    fn banner(&self) -> String {
        format!("Recycle Rush! Sort each item into a bin: {}.", list::<WasteBin>())
    }

    fn render_prompt(&self, item: &CurrentItem<WastePrompt>) {
        println!("In your hand: {}", item.prompt.name);
    }

    fn parse_answer(&self, line: &str, _item: &CurrentItem<WastePrompt>) -> Option<BinChoice> {
        WasteBin::from_str(&line.to_lowercase()).ok().map(BinChoice)
    }

    fn render_resolution(&self, record: &ResolutionRecord, _item: &CurrentItem<WastePrompt>) {
        match record.outcome {
            ItemOutcome::Correct => println!("Good sort! +{} points", record.delta),
            _ => println!("Wrong bin. {}", delta_text(record.delta)),
        }
    }

    fn hint(&self, _item: &CurrentItem<WastePrompt>, _hints_taken: u32) -> Option<String> {
        None
    }
}

struct WordsView;

impl GameView for WordsView {
    type Prompt = WordPrompt;
    type Answer = WordGuess;

    fn banner(&self) -> String {
        "Eco Word Search. Unscramble the letters and type the hidden word.".to_owned()
    }

    fn render_prompt(&self, item: &CurrentItem<WordPrompt>) {
        println!("Letters: {}", scramble(&item.prompt.word));
    }

    fn parse_answer(&self, line: &str, _item: &CurrentItem<WordPrompt>) -> Option<WordGuess> {
        (!line.is_empty()).then(|| WordGuess(line.to_owned()))
    }

    fn render_resolution(&self, record: &ResolutionRecord, item: &CurrentItem<WordPrompt>) {
        match record.outcome {
            ItemOutcome::Correct => {
                println!("Found {}! +{} points", item.prompt.word, record.delta)
            }
            _ => println!("Not it. {}", delta_text(record.delta)),
        }
    }

    fn hint(&self, _item: &CurrentItem<WordPrompt>, _hints_taken: u32) -> Option<String> {
        None
    }
}

/// Deterministic letter shuffle: even positions first, then odd.
fn scramble(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let mut out = String::with_capacity(word.len());
    out.extend(chars.iter().step_by(2));
    out.extend(chars.iter().skip(1).step_by(2));
    out
}
