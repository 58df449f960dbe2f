//! Commands, rejections, and host scheduling directives.

use crate::clock::ClockError;
use crate::content::SampleError;
use crate::phase::PhaseKind;
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// Tick period hosts should use when honoring [`Directive::StartTicker`].
pub const TICK_PERIOD_MS: u64 = 1_000;

/// The commands a host can apply to a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum CommandKind {
    /// Draw items and begin play.
    Start,
    /// Judge a response against the current item.
    Submit,
    /// Deliver one second to the clock.
    Tick,
    /// Move past a resolved item.
    Advance,
    /// Take a hint on the current item.
    RequestHint,
}

/// Rejection of a command. The session is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum CommandError {
    /// The command is not accepted in the current phase.
    #[display("{command} rejected in phase {phase}")]
    WrongPhase {
        /// The rejected command.
        command: CommandKind,
        /// The phase that rejected it.
        phase: PhaseKind,
    },
}

/// Failure of [`crate::Session::start`] before any state changes.
#[derive(Debug, Clone, PartialEq, Display, Error, From)]
pub enum StartError {
    /// The catalog could not fill the session.
    #[display("{_0}")]
    Sampling(SampleError),
    /// The configured duration was rejected by the clock.
    #[display("{_0}")]
    Clock(ClockError),
    /// The session already left `NotStarted`.
    #[display("Session already started (phase {phase})")]
    #[from(ignore)]
    AlreadyStarted {
        /// Phase the session was found in.
        phase: PhaseKind,
    },
}

/// Scheduling intent returned to the host alongside a snapshot.
///
/// The engine owns no timers; these tell the driving layer what to arrange.
/// Directives are requests about the future, so a later command (or session
/// teardown) can make an earlier one moot, and hosts must tolerate firing a
/// scheduled command into a phase that now rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Begin delivering `tick` once per `period_ms`.
    StartTicker {
        /// Milliseconds between ticks.
        period_ms: u64,
    },
    /// Stop delivering ticks.
    StopTicker,
    /// Deliver a single `advance` once `after_ms` have passed.
    ScheduleAdvance {
        /// Milliseconds to wait.
        after_ms: u64,
    },
}
