//! Score floor invariant: penalties never sink the score below the floor.

use super::Invariant;
use crate::session::Session;

/// Invariant: The cumulative score never falls below the configured floor.
///
/// Every delta lands through `ScoringPolicy::apply`, which clamps at the
/// floor. A configuration may start the session below its own floor; the
/// score then never drops further than that starting point.
pub struct ScoreFloorInvariant;

impl<P, R> Invariant<Session<P, R>> for ScoreFloorInvariant {
    fn holds(session: &Session<P, R>) -> bool {
        let lowest = session.config.policy.score_floor.min(session.config.initial_score);
        session.score >= lowest
    }

    fn description() -> &'static str {
        "Score never falls below the configured floor"
    }
}
