//! Ledger consistency invariant: resolutions are recorded exactly once.

use super::Invariant;
use crate::phase::SessionPhase;
use crate::session::Session;

/// Invariant: The ledger length matches session progress.
///
/// Every item behind the cursor resolved exactly once; retried attempts in
/// retry mode resolve nothing and so add nothing. In `ItemResolved` the
/// phase carries the same record the ledger just gained.
pub struct LedgerConsistentInvariant;

impl<P, R> Invariant<Session<P, R>> for LedgerConsistentInvariant {
    fn holds(session: &Session<P, R>) -> bool {
        match &session.phase {
            SessionPhase::NotStarted => session.ledger.is_empty(),
            SessionPhase::InProgress => session.ledger.len() == session.cursor,
            SessionPhase::ItemResolved(record) => {
                session.ledger.len() == session.cursor + 1
                    && session.ledger.last() == Some(record)
            }
            SessionPhase::Completed => session.ledger.len() == session.items.len(),
            // Expiry can interrupt play or a resolution display.
            SessionPhase::Expired => {
                session.ledger.len() == session.cursor
                    || session.ledger.len() == session.cursor + 1
            }
        }
    }

    fn description() -> &'static str {
        "Ledger records every resolution exactly once"
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
        let items = (0..4)
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

    #[test]
    fn test_retried_attempts_add_no_records() {
        let config = SessionConfig::default()
            .with_item_count(2)
            .with_allow_retry(true);
        let mut session = Session::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        session.start(&catalog(), &mut rng).unwrap();

        session.submit(&false).unwrap();
        session.submit(&false).unwrap();
        assert!(session.ledger.is_empty());
        assert!(LedgerConsistentInvariant::holds(&session));

        session.submit(&true).unwrap();
        assert_eq!(session.ledger.len(), 1);
        assert!(LedgerConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_expiry_mid_display_keeps_the_record() {
        let config = SessionConfig::default()
            .with_item_count(2)
            .with_timer_scope(TimerScope::PerSession { seconds: 2 });
        let mut session = Session::new(config).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        session.start(&catalog(), &mut rng).unwrap();

        session.submit(&true).unwrap();
        session.tick().unwrap();
        session.tick().unwrap();
        assert!(matches!(session.phase, SessionPhase::Expired));
        assert_eq!(session.ledger.len(), 1);
        assert!(LedgerConsistentInvariant::holds(&session));
    }

    #[test]
    fn test_dropped_record_violates() {
        let mut session =
            Session::new(SessionConfig::default().with_item_count(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        session.start(&catalog(), &mut rng).unwrap();
        session.submit(&true).unwrap();

        session.ledger.clear();
        assert!(!LedgerConsistentInvariant::holds(&session));
    }
}
