//! Tick-driven countdowns.
//!
//! The engine owns no timers and never reads wall-clock time. A host driver
//! delivers ticks (nominally once per second) and the clock counts them
//! down. Everything here is deterministic: the same tick sequence always
//! produces the same state.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Where a countdown applies for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerScope {
    /// A fresh countdown for every item; expiry resolves the current item
    /// as timed out.
    PerItem {
        /// Seconds granted per item.
        seconds: u32,
    },
    /// One countdown spanning the whole session; expiry ends the session.
    PerSession {
        /// Seconds granted for the session.
        seconds: u32,
    },
    /// No countdown at all.
    Untimed,
}

/// Error raised when a clock is given an unusable duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum ClockError {
    /// Countdown durations must be at least one second.
    #[display("Invalid clock duration: {seconds} s")]
    InvalidDuration {
        /// The rejected duration.
        seconds: u32,
    },
}

/// Countdown state. `Running` always holds at least one second; reaching
/// zero transitions to `Expired` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ClockState {
    Idle,
    Running { remaining: u32 },
    Paused { remaining: u32 },
    Expired,
}

/// A countdown advanced one second per [`SessionClock::tick`].
///
/// Expiry latches: once `Expired`, further ticks are no-ops and only
/// [`SessionClock::reset`] restores a running countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClock {
    state: ClockState,
}

impl SessionClock {
    /// A clock that has not been started.
    pub fn new() -> Self {
        Self {
            state: ClockState::Idle,
        }
    }

    /// Starts the countdown at `seconds`.
    pub fn start(&mut self, seconds: u32) -> Result<(), ClockError> {
        self.reset(seconds)
    }

    /// Reinitializes the countdown at `seconds`, clearing any expiry.
    pub fn reset(&mut self, seconds: u32) -> Result<(), ClockError> {
        if seconds == 0 {
            return Err(ClockError::InvalidDuration { seconds });
        }
        self.state = ClockState::Running { remaining: seconds };
        debug!(seconds, "Clock running");
        Ok(())
    }

    /// Consumes one second and returns the time left.
    ///
    /// Only a running clock is affected; idle, paused, and expired clocks
    /// ignore ticks.
    pub fn tick(&mut self) -> u32 {
        if let ClockState::Running { remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            if remaining == 0 {
                self.state = ClockState::Expired;
                debug!("Clock expired");
            } else {
                self.state = ClockState::Running { remaining };
            }
        }
        self.remaining()
    }

    /// Suspends a running countdown; no-op otherwise.
    pub fn pause(&mut self) {
        if let ClockState::Running { remaining } = self.state {
            self.state = ClockState::Paused { remaining };
        }
    }

    /// Resumes a paused countdown; no-op otherwise.
    pub fn resume(&mut self) {
        if let ClockState::Paused { remaining } = self.state {
            self.state = ClockState::Running { remaining };
        }
    }

    /// Seconds left; zero for idle and expired clocks.
    pub fn remaining(&self) -> u32 {
        match self.state {
            ClockState::Running { remaining } | ClockState::Paused { remaining } => remaining,
            ClockState::Idle | ClockState::Expired => 0,
        }
    }

    /// Whether the countdown has run out.
    pub fn is_expired(&self) -> bool {
        matches!(self.state, ClockState::Expired)
    }

    /// Whether the countdown is actively consuming ticks.
    pub fn is_running(&self) -> bool {
        matches!(self.state, ClockState::Running { .. })
    }
}

impl Default for SessionClock {
    fn default() -> Self {
        Self::new()
    }
}
