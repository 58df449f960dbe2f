//! Streak consistency invariant: the streak reflects recorded resolutions.

use super::Invariant;
use crate::session::Session;

/// Invariant: The streak never exceeds the trailing run of correct
/// resolutions in the ledger.
///
/// A correct resolution appends a correct record and increments the streak
/// together, so equality is the usual case. Retry mode can hold the streak
/// below the run: a failed attempt resets it without resolving anything.
pub struct StreakConsistentInvariant;

impl<P, R> Invariant<Session<P, R>> for StreakConsistentInvariant {
    fn holds(session: &Session<P, R>) -> bool {
        let trailing_correct = session
            .ledger
            .iter()
            .rev()
            .take_while(|record| record.outcome.is_correct())
            .count();
        session.streak as usize <= trailing_correct
    }

    fn description() -> &'static str {
        "Streak never exceeds the trailing run of correct resolutions"
    }
}
