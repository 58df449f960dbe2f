//! First-class invariants for scored sessions.
//!
//! Invariants are logical properties that must hold between commands. They
//! are testable independently and serve as documentation of what the state
//! machine guarantees; the command methods check the full set after every
//! successful mutation in debug builds.

use crate::session::Session;
use tracing::instrument;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// This trait enables composition of multiple invariants into a single
/// verification step. Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

// Implement InvariantSet for 2-tuples
impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

// Implement InvariantSet for 4-tuples
impl<S, I1, I2, I3, I4> InvariantSet<S> for (I1, I2, I3, I4)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
    I4: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if !I4::holds(state) {
            violations.push(InvariantViolation::new(I4::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod cursor_in_bounds;
pub mod ledger_consistent;
pub mod score_floor;
pub mod streak_consistent;

pub use cursor_in_bounds::CursorInBoundsInvariant;
pub use ledger_consistent::LedgerConsistentInvariant;
pub use score_floor::ScoreFloorInvariant;
pub use streak_consistent::StreakConsistentInvariant;

/// All session invariants as a composable set.
pub type SessionInvariants = (
    CursorInBoundsInvariant,
    ScoreFloorInvariant,
    LedgerConsistentInvariant,
    StreakConsistentInvariant,
);

/// Asserts that all session invariants hold (panic on violation in debug
/// builds).
#[instrument(skip(session))]
pub fn assert_invariants<P, R>(session: &Session<P, R>) {
    if cfg!(debug_assertions) {
        if let Err(violations) = SessionInvariants::check_all(session) {
            let descriptions = violations
                .iter()
                .map(|violation| violation.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            panic!("Session invariant violated: {descriptions}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::TimerScope;
    use crate::config::SessionConfig;
    use crate::content::{Catalog, ChallengeItem, Difficulty, Outcome};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn catalog() -> Catalog<String, bool> {
        let items = (0..6)
            .map(|n| {
                ChallengeItem::new(
                    format!("item-{n}"),
                    format!("prompt {n}"),
                    "general",
                    Difficulty::Easy,
                    100,
                    |response: &bool| {
                        if *response {
                            Outcome::Correct
                        } else {
                            Outcome::Incorrect
                        }
                    },
                )
            })
            .collect();
        Catalog::new(items).unwrap()
    }

    fn started_session() -> Session<String, bool> {
        let config = SessionConfig::default()
            .with_item_count(3)
            .with_timer_scope(TimerScope::PerItem { seconds: 30 });
        let mut session = Session::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        session.start(&catalog(), &mut rng).unwrap();
        session
    }

    #[test]
    fn test_invariant_set_holds_for_fresh_session() {
        let session = Session::<String, bool>::new(SessionConfig::default()).unwrap();
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_through_a_full_run() {
        let mut session = started_session();
        assert!(SessionInvariants::check_all(&session).is_ok());
        for _ in 0..3 {
            session.submit(&true).unwrap();
            assert!(SessionInvariants::check_all(&session).is_ok());
            session.advance().unwrap();
            assert!(SessionInvariants::check_all(&session).is_ok());
        }
        assert!(session.is_terminal());
    }

    #[test]
    fn test_invariant_set_detects_corruption() {
        let mut session = started_session();
        session.submit(&true).unwrap();

        // Corrupt the cursor past the drawn items.
        session.cursor = 7;

        let result = SessionInvariants::check_all(&session);
        assert!(result.is_err());
        let violations = result.unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_two_invariants_as_set() {
        let session = started_session();

        type TwoInvariants = (CursorInBoundsInvariant, ScoreFloorInvariant);
        assert!(TwoInvariants::check_all(&session).is_ok());
    }
}
