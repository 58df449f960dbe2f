//! Session phases, resolution records, and the results summary.

use crate::content::{ItemId, Outcome};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// How one item left play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum ItemOutcome {
    /// The resolver accepted a submission.
    Correct,
    /// The resolver rejected the final submission.
    Incorrect,
    /// The item clock ran out before a correct submission.
    TimedOut,
}

impl ItemOutcome {
    /// Whether this outcome counts toward accuracy.
    pub fn is_correct(self) -> bool {
        matches!(self, ItemOutcome::Correct)
    }
}

impl From<Outcome> for ItemOutcome {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Correct => ItemOutcome::Correct,
            Outcome::Incorrect => ItemOutcome::Incorrect,
        }
    }
}

/// One resolved item in the session ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct ResolutionRecord {
    /// Which item resolved.
    pub item_id: ItemId,
    /// How it resolved.
    pub outcome: ItemOutcome,
    /// Point delta granted by the policy for this resolution.
    pub delta: i64,
    /// Submissions made against the item.
    pub attempts: u32,
    /// Hints taken on the item.
    pub hints: u32,
    /// Seconds left on the clock when the item resolved.
    pub remaining: u32,
}

/// Phase of a session.
///
/// `ItemResolved` carries the record of the resolution being displayed, so
/// presentation layers need no side channel to show "correct, +300".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Built but not started; no items drawn yet.
    NotStarted,
    /// Accepting submissions for the item at the cursor.
    InProgress,
    /// The current item just resolved; waiting for advance.
    ItemResolved(ResolutionRecord),
    /// Every item resolved. Terminal.
    Completed,
    /// The session clock ran out first. Terminal.
    Expired,
}

impl SessionPhase {
    /// The data-free label for this phase.
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::NotStarted => PhaseKind::NotStarted,
            SessionPhase::InProgress => PhaseKind::InProgress,
            SessionPhase::ItemResolved(_) => PhaseKind::ItemResolved,
            SessionPhase::Completed => PhaseKind::Completed,
            SessionPhase::Expired => PhaseKind::Expired,
        }
    }

    /// Whether the session accepts no further commands.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionPhase::Completed | SessionPhase::Expired)
    }
}

/// Phase labels without associated data, for rejections and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum PhaseKind {
    /// See [`SessionPhase::NotStarted`].
    NotStarted,
    /// See [`SessionPhase::InProgress`].
    InProgress,
    /// See [`SessionPhase::ItemResolved`].
    ItemResolved,
    /// See [`SessionPhase::Completed`].
    Completed,
    /// See [`SessionPhase::Expired`].
    Expired,
}

/// Results-screen numbers for a session.
///
/// Available in any phase; before the end it reflects progress so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Final cumulative score.
    pub score: i64,
    /// Items drawn for the session.
    pub items_total: usize,
    /// Items that reached a resolution.
    pub items_resolved: usize,
    /// Resolutions judged correct.
    pub correct: usize,
    /// Resolutions forced by a per-item timeout.
    pub timed_out: usize,
    /// Correct resolutions over items drawn, as a rounded percentage.
    pub accuracy_pct: u32,
    /// Whether the session ended by clock expiry.
    pub expired: bool,
}
