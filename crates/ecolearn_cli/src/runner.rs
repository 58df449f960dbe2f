//! Session driver: owns the wall clock and the keyboard.
//!
//! The engine never sleeps or reads input, so this loop does both. It
//! holds at most one ticker and one scheduled advance at a time, fires
//! them through `select!`, and forwards typed lines as commands. Stale
//! timers are harmless by contract: a rejected command leaves the session
//! untouched, so the error is logged and dropped.

use anyhow::Result;
use ecolearn_engine::{
    Catalog, CurrentItem, Directive, ItemOutcome, ResolutionRecord, Session, SessionConfig,
    SessionPhase, SessionSnapshot, SessionSummary, Transition,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, instrument};

/// How one game turns prompts into terminal output and typed lines into
/// answers.
///
/// The engine treats prompts and answers as opaque payloads; a view is
/// where they take shape. Everything else (the ticker, the status line,
/// the summary) is shared across games and lives in [`run_session`].
pub trait GameView {
    /// Prompt payload of this game's items.
    type Prompt: Clone + Serialize;
    /// Parsed answer type submitted to the session.
    type Answer;

    /// Opening line shown once before the first item.
    fn banner(&self) -> String;

    /// Prints the item in play.
    fn render_prompt(&self, item: &CurrentItem<Self::Prompt>);

    /// Parses a typed line into an answer, or `None` to re-prompt.
    fn parse_answer(&self, line: &str, item: &CurrentItem<Self::Prompt>) -> Option<Self::Answer>;

    /// Prints the outcome of a resolved item.
    fn render_resolution(&self, record: &ResolutionRecord, item: &CurrentItem<Self::Prompt>);

    /// Text of the `hints_taken`-th hint on the item, if the game has one.
    fn hint(&self, item: &CurrentItem<Self::Prompt>, hints_taken: u32) -> Option<String>;

    /// Extra line under the summary, such as a rating.
    fn epilogue(&self, summary: &SessionSummary) -> Option<String> {
        let _ = summary;
        None
    }
}

/// Drives one session to a terminal phase and returns its summary.
///
/// With `json` set, every transition and the final summary go to stdout
/// as single JSON lines and prose rendering is suppressed.
#[instrument(skip(view, catalog, config))]
pub async fn run_session<V: GameView>(
    view: &V,
    catalog: &Catalog<V::Prompt, V::Answer>,
    config: SessionConfig,
    seed: Option<u64>,
    json: bool,
) -> Result<SessionSummary> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config)?;
    let mut ticker: Option<Interval> = None;
    let mut advance_at: Option<Instant> = None;
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    let started = session.start(catalog, &mut rng)?;
    absorb(&started, json, &mut ticker, &mut advance_at)?;
    if !json {
        println!("{}", view.banner());
        println!("Type an answer and press Enter. 'hint' asks for a hint, 'quit' ends the game.");
        if let Some(item) = &started.snapshot.current {
            render_status(&started.snapshot);
            view.render_prompt(item);
        }
    }

    while !session.is_terminal() {
        tokio::select! {
            _ = next_tick(&mut ticker) => {
                match session.tick() {
                    Ok(transition) => {
                        absorb(&transition, json, &mut ticker, &mut advance_at)?;
                        if !json {
                            render_tick(view, &transition.snapshot);
                        }
                    }
                    Err(error) => debug!(%error, "Dropped stale tick"),
                }
            }
            _ = advance_due(&advance_at) => {
                advance_at = None;
                match session.advance() {
                    Ok(transition) => {
                        absorb(&transition, json, &mut ticker, &mut advance_at)?;
                        if !json && matches!(transition.snapshot.phase, SessionPhase::InProgress) {
                            if let Some(item) = &transition.snapshot.current {
                                render_status(&transition.snapshot);
                                view.render_prompt(item);
                            }
                        }
                    }
                    Err(error) => debug!(%error, "Dropped stale advance"),
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("Input closed, ending session");
                    break;
                };
                let line = line.trim();
                if matches!(line, "quit" | "exit") {
                    info!("Player quit");
                    break;
                }
                handle_line(view, &mut session, line, json, &mut ticker, &mut advance_at)?;
            }
        }
    }

    let summary = session.summary();
    if json {
        println!("{}", serde_json::to_string(&summary)?);
    } else {
        render_summary(&summary);
        if let Some(extra) = view.epilogue(&summary) {
            println!("{extra}");
        }
    }
    info!(
        score = summary.score,
        accuracy = summary.accuracy_pct,
        expired = summary.expired,
        "Session over"
    );
    Ok(summary)
}

/// Waits for the next tick; pends forever when no ticker is armed.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// Waits until the scheduled advance; pends forever when none is armed.
async fn advance_due(advance_at: &Option<Instant>) {
    match advance_at {
        Some(at) => tokio::time::sleep_until(*at).await,
        None => std::future::pending().await,
    }
}

/// Applies a transition's directives to the host timers and, in JSON
/// mode, prints the transition.
fn absorb<P: Serialize>(
    transition: &Transition<P>,
    json: bool,
    ticker: &mut Option<Interval>,
    advance_at: &mut Option<Instant>,
) -> Result<()> {
    for directive in &transition.directives {
        match directive {
            Directive::StartTicker { period_ms } => {
                let period = Duration::from_millis(*period_ms);
                // First tick lands one full period out, not immediately.
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
                *ticker = Some(interval);
            }
            Directive::StopTicker => {
                *ticker = None;
            }
            Directive::ScheduleAdvance { after_ms } => {
                *advance_at = Some(Instant::now() + Duration::from_millis(*after_ms));
            }
        }
    }
    if json {
        println!("{}", serde_json::to_string(transition)?);
    }
    Ok(())
}

/// Routes one typed line to the right command.
fn handle_line<V: GameView>(
    view: &V,
    session: &mut Session<V::Prompt, V::Answer>,
    line: &str,
    json: bool,
    ticker: &mut Option<Interval>,
    advance_at: &mut Option<Instant>,
) -> Result<()> {
    match line {
        "" => {}
        "hint" => match session.request_hint() {
            Ok(transition) => {
                absorb(&transition, json, ticker, advance_at)?;
                if !json {
                    let snapshot = &transition.snapshot;
                    let text = snapshot
                        .current
                        .as_ref()
                        .and_then(|item| view.hint(item, snapshot.hints_on_current));
                    match text {
                        Some(text) => println!("Hint: {text}"),
                        None => println!("No hint available."),
                    }
                }
            }
            Err(error) => debug!(%error, "Hint rejected"),
        },
        answer => {
            let Some(item) = session.snapshot().current else {
                debug!("Input ignored outside an open item");
                return Ok(());
            };
            let Some(answer) = view.parse_answer(answer, &item) else {
                if !json {
                    println!("Didn't catch that, try again.");
                }
                return Ok(());
            };
            match session.submit(&answer) {
                Ok(transition) => {
                    absorb(&transition, json, ticker, advance_at)?;
                    if !json {
                        match &transition.snapshot.phase {
                            SessionPhase::ItemResolved(record) => {
                                view.render_resolution(record, &item);
                            }
                            SessionPhase::InProgress => {
                                println!(
                                    "Not quite, try again. Score {}",
                                    transition.snapshot.score
                                );
                            }
                            _ => {}
                        }
                    }
                }
                Err(error) => debug!(%error, "Submission rejected"),
            }
        }
    }
    Ok(())
}

/// Prose output for a tick: timeouts, expiry, and a low-time warning.
fn render_tick<V: GameView>(view: &V, snapshot: &SessionSnapshot<V::Prompt>) {
    match &snapshot.phase {
        SessionPhase::ItemResolved(record) if record.outcome == ItemOutcome::TimedOut => {
            if let Some(item) = &snapshot.current {
                view.render_resolution(record, item);
            }
        }
        SessionPhase::Expired => {
            println!();
            println!("Time's up!");
        }
        _ => {
            if snapshot.remaining == Some(5) {
                println!("  5 seconds left!");
            }
        }
    }
}

fn render_status<P>(snapshot: &SessionSnapshot<P>) {
    let mut status = format!(
        "Item {}/{}  Score {}",
        snapshot.cursor + 1,
        snapshot.items_total,
        snapshot.score
    );
    if let Some(remaining) = snapshot.remaining {
        status.push_str(&format!("  Time {remaining}s"));
    }
    if snapshot.streak > 1 {
        status.push_str(&format!("  Streak x{}", snapshot.streak));
    }
    println!();
    println!("=== {status} ===");
}

fn render_summary(summary: &SessionSummary) {
    println!();
    println!("=== Session over ===");
    if summary.expired {
        println!("The clock ran out.");
    }
    println!("Score: {}", summary.score);
    println!(
        "Resolved {}/{} items, {} correct ({}% accuracy)",
        summary.items_resolved, summary.items_total, summary.correct, summary.accuracy_pct
    );
    if summary.timed_out > 0 {
        println!("{} timed out", summary.timed_out);
    }
}
