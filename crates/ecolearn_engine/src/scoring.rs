//! Scoring: pure point-delta computation.
//!
//! A [`ScoringPolicy`] is plain data. The delta functions are total and
//! deterministic, use saturating arithmetic throughout, and never inspect
//! session state beyond the arguments handed to them, so any game's rules
//! reduce to picking weights.

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

/// Weights and penalties defining one game's scoring rules.
///
/// The time bonus is the integer quotient `time_bonus_weight * remaining /
/// time_bonus_divisor`, which covers both "points per second" (divisor 1)
/// and "a point per ten seconds" (weight 1, divisor 10) shapes. A divisor
/// of zero is treated as one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Setters)]
#[setters(prefix = "with_")]
pub struct ScoringPolicy {
    /// Numerator of the time bonus, in points.
    pub time_bonus_weight: u32,
    /// Denominator of the time bonus, in seconds.
    pub time_bonus_divisor: u32,
    /// Points per consecutive correct resolution held entering the item.
    pub streak_bonus_weight: u32,
    /// Deduction per paid hint taken on the item.
    pub hint_penalty: u32,
    /// Hints per item that carry no deduction.
    pub free_hints: u32,
    /// Deduction per failed attempt before the resolving one.
    pub attempt_penalty: u32,
    /// Deduction applied by an incorrect or timed-out resolution.
    pub incorrect_penalty: u32,
    /// Lowest value the cumulative score may reach.
    pub score_floor: i64,
    /// Lowest delta a correct resolution may yield.
    pub min_award_on_correct: i64,
    /// One-time award for resolving every item; not granted on expiry.
    pub completion_bonus: u32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            time_bonus_weight: 0,
            time_bonus_divisor: 1,
            streak_bonus_weight: 0,
            hint_penalty: 0,
            free_hints: 0,
            attempt_penalty: 0,
            incorrect_penalty: 0,
            score_floor: 0,
            min_award_on_correct: 0,
            completion_bonus: 0,
        }
    }
}

impl ScoringPolicy {
    /// Delta for a correct resolution.
    ///
    /// `streak_before` is the streak entering the item, `hints_used` and
    /// `attempts_used` the item's own counters (the resolving attempt
    /// included). The result never falls below `min_award_on_correct` and
    /// is never negative.
    pub fn score_correct(
        &self,
        points_base: u32,
        remaining: u32,
        streak_before: u32,
        hints_used: u32,
        attempts_used: u32,
    ) -> i64 {
        let divisor = i64::from(self.time_bonus_divisor.max(1));
        let time_bonus =
            i64::from(self.time_bonus_weight).saturating_mul(i64::from(remaining)) / divisor;
        let streak_bonus =
            i64::from(self.streak_bonus_weight).saturating_mul(i64::from(streak_before));
        let paid_hints = i64::from(hints_used.saturating_sub(self.free_hints));
        let retries = i64::from(attempts_used.saturating_sub(1));
        let raw = i64::from(points_base)
            .saturating_add(time_bonus)
            .saturating_add(streak_bonus)
            .saturating_sub(i64::from(self.hint_penalty).saturating_mul(paid_hints))
            .saturating_sub(i64::from(self.attempt_penalty).saturating_mul(retries));
        raw.max(self.min_award_on_correct.max(0))
    }

    /// Delta for an incorrect submission or a per-item timeout. Never
    /// positive.
    pub fn score_incorrect(&self) -> i64 {
        -i64::from(self.incorrect_penalty)
    }

    /// Delta granted once when the final item resolves.
    pub fn score_completion(&self) -> i64 {
        i64::from(self.completion_bonus)
    }

    /// Applies a delta to a cumulative score, clamping at the floor.
    pub fn apply(&self, score: i64, delta: i64) -> i64 {
        score.saturating_add(delta).max(self.score_floor)
    }
}
