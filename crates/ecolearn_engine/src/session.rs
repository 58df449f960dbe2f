//! The session state machine.
//!
//! A [`Session`] is a synchronous command processor. Hosts apply commands
//! (`start`, `submit`, `tick`, `advance`, `request_hint`); each either
//! rejects without touching state or returns a [`Transition`] carrying the
//! new snapshot and scheduling directives. The engine never sleeps, spawns,
//! or reads the wall clock, which is what keeps every run replayable from
//! a command sequence and a seed.

use crate::clock::{SessionClock, TimerScope};
use crate::command::{CommandError, CommandKind, Directive, StartError, TICK_PERIOD_MS};
use crate::config::{ConfigError, SessionConfig};
use crate::content::{Catalog, ChallengeItem, Outcome};
use crate::invariants;
use crate::phase::{ItemOutcome, ResolutionRecord, SessionPhase, SessionSummary};
use crate::snapshot::{CurrentItem, SessionSnapshot};
use derive_getters::Getters;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Result of a successfully applied command.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition<P> {
    /// State after the command.
    pub snapshot: SessionSnapshot<P>,
    /// Intents for the host scheduler, in emission order.
    pub directives: Vec<Directive>,
}

/// A single play-through of drawn items under one configuration.
///
/// Commands are the only way to mutate a session. A rejected command is a
/// guarantee that nothing changed, so hosts may fire stale scheduled
/// commands (a leftover advance, a late tick) and simply drop the error.
#[derive(Debug, Getters)]
pub struct Session<P, R> {
    /// Configuration the session was built from.
    pub(crate) config: SessionConfig,
    /// Items drawn at start, in play order.
    pub(crate) items: Vec<ChallengeItem<P, R>>,
    /// Index of the item in play.
    pub(crate) cursor: usize,
    /// Cumulative score.
    pub(crate) score: i64,
    /// Consecutive correct resolutions.
    pub(crate) streak: u32,
    /// Submissions against the current item.
    pub(crate) attempts_on_current: u32,
    /// Hints taken on the current item.
    pub(crate) hints_on_current: u32,
    /// Countdown; absent for untimed sessions.
    pub(crate) clock: Option<SessionClock>,
    /// Current phase.
    pub(crate) phase: SessionPhase,
    /// Resolution history, in play order.
    pub(crate) ledger: Vec<ResolutionRecord>,
}

impl<P, R> Session<P, R> {
    /// Builds a session in `NotStarted`. Items are drawn by
    /// [`Session::start`], not here.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(items = config.item_count, "Session prepared");
        Ok(Self {
            score: config.initial_score,
            items: Vec::new(),
            cursor: 0,
            streak: 0,
            attempts_on_current: 0,
            hints_on_current: 0,
            clock: None,
            phase: SessionPhase::NotStarted,
            ledger: Vec::new(),
            config,
        })
    }

    /// Seconds left on the clock; `None` for untimed sessions.
    pub fn remaining(&self) -> Option<u32> {
        self.clock.as_ref().map(SessionClock::remaining)
    }

    /// Number of items drawn for this session.
    pub fn items_total(&self) -> usize {
        self.items.len()
    }

    /// The item in play, present in `InProgress` and `ItemResolved`.
    pub fn current_item(&self) -> Option<&ChallengeItem<P, R>> {
        match &self.phase {
            SessionPhase::InProgress | SessionPhase::ItemResolved(_) => {
                self.items.get(self.cursor)
            }
            _ => None,
        }
    }

    /// Whether the session accepts no further commands.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Results-screen numbers for the session so far.
    pub fn summary(&self) -> SessionSummary {
        let correct = self
            .ledger
            .iter()
            .filter(|record| record.outcome.is_correct())
            .count();
        let timed_out = self
            .ledger
            .iter()
            .filter(|record| matches!(record.outcome, ItemOutcome::TimedOut))
            .count();
        let items_total = self.items.len();
        let accuracy_pct = if items_total == 0 {
            0
        } else {
            ((correct * 100 + items_total / 2) / items_total) as u32
        };
        SessionSummary {
            score: self.score,
            items_total,
            items_resolved: self.ledger.len(),
            correct,
            timed_out,
            accuracy_pct,
            expired: matches!(self.phase, SessionPhase::Expired),
        }
    }
}

impl<P: Clone, R> Session<P, R> {
    /// Draws items from the catalog and begins play.
    ///
    /// Sampling and clock validation both run before any state changes, so
    /// a failed start leaves the session in `NotStarted`.
    #[instrument(skip(self, catalog, rng))]
    pub fn start(
        &mut self,
        catalog: &Catalog<P, R>,
        rng: &mut impl Rng,
    ) -> Result<Transition<P>, StartError> {
        if !matches!(self.phase, SessionPhase::NotStarted) {
            warn!(phase = %self.phase.kind(), "Start rejected");
            return Err(StartError::AlreadyStarted {
                phase: self.phase.kind(),
            });
        }
        let items = catalog.sample(self.config.item_count, self.config.filter.as_ref(), rng)?;
        let clock = match self.config.timer_scope {
            TimerScope::PerItem { seconds } | TimerScope::PerSession { seconds } => {
                let mut clock = SessionClock::new();
                clock.start(seconds)?;
                Some(clock)
            }
            TimerScope::Untimed => None,
        };
        self.items = items;
        self.clock = clock;
        self.phase = SessionPhase::InProgress;
        info!(
            items = self.items.len(),
            scope = ?self.config.timer_scope,
            "Session started"
        );
        let directives = if self.clock.is_some() {
            vec![Directive::StartTicker {
                period_ms: TICK_PERIOD_MS,
            }]
        } else {
            Vec::new()
        };
        invariants::assert_invariants(self);
        Ok(self.transition(directives))
    }

    /// Judges a response against the current item.
    ///
    /// A correct response always resolves the item. An incorrect one
    /// resolves it too unless the configuration allows retries, in which
    /// case the item stays open, the penalty lands, and the streak resets.
    #[instrument(skip(self, response))]
    pub fn submit(&mut self, response: &R) -> Result<Transition<P>, CommandError> {
        if !matches!(self.phase, SessionPhase::InProgress) {
            warn!(phase = %self.phase.kind(), "Submission rejected");
            return Err(CommandError::WrongPhase {
                command: CommandKind::Submit,
                phase: self.phase.kind(),
            });
        }
        let item = &self.items[self.cursor];
        let outcome = item.resolve(response);
        let item_id = item.id().to_owned();
        let points_base = item.points_base();
        self.attempts_on_current += 1;
        let remaining = self.clock.as_ref().map_or(0, SessionClock::remaining);
        let directives = match outcome {
            Outcome::Correct => {
                let delta = self.config.policy.score_correct(
                    points_base,
                    remaining,
                    self.streak,
                    self.hints_on_current,
                    self.attempts_on_current,
                );
                self.score = self.config.policy.apply(self.score, delta);
                self.streak += 1;
                let record = ResolutionRecord::new(
                    item_id,
                    ItemOutcome::Correct,
                    delta,
                    self.attempts_on_current,
                    self.hints_on_current,
                    remaining,
                );
                self.resolve_current(record)
            }
            Outcome::Incorrect => {
                let delta = self.config.policy.score_incorrect();
                self.score = self.config.policy.apply(self.score, delta);
                self.streak = 0;
                if self.config.allow_retry {
                    debug!(
                        item = %item_id,
                        attempts = self.attempts_on_current,
                        "Incorrect, item stays open"
                    );
                    Vec::new()
                } else {
                    let record = ResolutionRecord::new(
                        item_id,
                        ItemOutcome::Incorrect,
                        delta,
                        self.attempts_on_current,
                        self.hints_on_current,
                        remaining,
                    );
                    self.resolve_current(record)
                }
            }
        };
        invariants::assert_invariants(self);
        Ok(self.transition(directives))
    }

    /// Delivers one second to the clock.
    ///
    /// Untimed sessions accept ticks as no-ops. A per-item expiry resolves
    /// the current item as timed out; a per-session expiry ends the whole
    /// session, even while a resolution is on display.
    #[instrument(skip(self))]
    pub fn tick(&mut self) -> Result<Transition<P>, CommandError> {
        if !matches!(
            self.phase,
            SessionPhase::InProgress | SessionPhase::ItemResolved(_)
        ) {
            return Err(CommandError::WrongPhase {
                command: CommandKind::Tick,
                phase: self.phase.kind(),
            });
        }
        let expired = match self.clock.as_mut() {
            Some(clock) => {
                clock.tick();
                clock.is_expired()
            }
            None => false,
        };
        let directives = if expired {
            match self.config.timer_scope {
                TimerScope::PerItem { .. } if matches!(self.phase, SessionPhase::InProgress) => {
                    let item_id = self.items[self.cursor].id().to_owned();
                    let delta = self.config.policy.score_incorrect();
                    self.score = self.config.policy.apply(self.score, delta);
                    self.streak = 0;
                    warn!(item = %item_id, "Item timed out");
                    let record = ResolutionRecord::new(
                        item_id,
                        ItemOutcome::TimedOut,
                        delta,
                        self.attempts_on_current,
                        self.hints_on_current,
                        0,
                    );
                    self.resolve_current(record)
                }
                TimerScope::PerSession { .. } => {
                    self.phase = SessionPhase::Expired;
                    warn!(cursor = self.cursor, score = self.score, "Session expired");
                    vec![Directive::StopTicker]
                }
                _ => Vec::new(),
            }
        } else {
            Vec::new()
        };
        invariants::assert_invariants(self);
        Ok(self.transition(directives))
    }

    /// Moves past a resolved item, either to the next item or to
    /// `Completed` when none remain.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Result<Transition<P>, CommandError> {
        if !matches!(self.phase, SessionPhase::ItemResolved(_)) {
            debug!(phase = %self.phase.kind(), "Advance rejected");
            return Err(CommandError::WrongPhase {
                command: CommandKind::Advance,
                phase: self.phase.kind(),
            });
        }
        self.cursor += 1;
        self.attempts_on_current = 0;
        self.hints_on_current = 0;
        let directives = if self.cursor == self.items.len() {
            let bonus = self.config.policy.score_completion();
            if bonus != 0 {
                self.score = self.config.policy.apply(self.score, bonus);
            }
            self.phase = SessionPhase::Completed;
            info!(score = self.score, items = self.items.len(), "Session completed");
            if self.clock.is_some() {
                vec![Directive::StopTicker]
            } else {
                Vec::new()
            }
        } else {
            if let TimerScope::PerItem { seconds } = self.config.timer_scope {
                if let Some(clock) = self.clock.as_mut() {
                    clock
                        .reset(seconds)
                        .expect("per-item duration validated at start");
                }
            }
            self.phase = SessionPhase::InProgress;
            debug!(cursor = self.cursor, "Advanced to next item");
            Vec::new()
        };
        invariants::assert_invariants(self);
        Ok(self.transition(directives))
    }

    /// Takes a hint on the current item, up to the configured cap.
    ///
    /// Requests beyond the cap succeed without effect, so a host can wire
    /// the hint button straight through. The deduction for paid hints lands
    /// when the item resolves, not here.
    #[instrument(skip(self))]
    pub fn request_hint(&mut self) -> Result<Transition<P>, CommandError> {
        if !matches!(self.phase, SessionPhase::InProgress) {
            return Err(CommandError::WrongPhase {
                command: CommandKind::RequestHint,
                phase: self.phase.kind(),
            });
        }
        if self.hints_on_current < self.config.max_hints_per_item {
            self.hints_on_current += 1;
            debug!(hints = self.hints_on_current, "Hint taken");
        } else {
            debug!(cap = self.config.max_hints_per_item, "Hint cap reached");
        }
        invariants::assert_invariants(self);
        Ok(self.transition(Vec::new()))
    }

    /// Point-in-time view of the session.
    pub fn snapshot(&self) -> SessionSnapshot<P> {
        let current = match &self.phase {
            SessionPhase::InProgress | SessionPhase::ItemResolved(_) => {
                self.items.get(self.cursor).map(|item| CurrentItem {
                    id: item.id().to_owned(),
                    prompt: item.prompt().clone(),
                    category: item.category().to_owned(),
                    difficulty: item.difficulty(),
                    points_base: item.points_base(),
                })
            }
            _ => None,
        };
        SessionSnapshot {
            phase: self.phase.clone(),
            cursor: self.cursor,
            items_total: self.items.len(),
            score: self.score,
            streak: self.streak,
            attempts_on_current: self.attempts_on_current,
            hints_on_current: self.hints_on_current,
            remaining: self.remaining(),
            current,
        }
    }

    /// Pauses a per-item clock, records the resolution, and enters
    /// `ItemResolved`.
    fn resolve_current(&mut self, record: ResolutionRecord) -> Vec<Directive> {
        if matches!(self.config.timer_scope, TimerScope::PerItem { .. }) {
            if let Some(clock) = self.clock.as_mut() {
                clock.pause();
            }
        }
        info!(
            item = %record.item_id,
            outcome = %record.outcome,
            delta = record.delta,
            score = self.score,
            "Item resolved"
        );
        self.ledger.push(record.clone());
        self.phase = SessionPhase::ItemResolved(record);
        vec![Directive::ScheduleAdvance {
            after_ms: self.config.resolve_display_ms,
        }]
    }

    fn transition(&self, directives: Vec<Directive>) -> Transition<P> {
        Transition {
            snapshot: self.snapshot(),
            directives,
        }
    }
}
