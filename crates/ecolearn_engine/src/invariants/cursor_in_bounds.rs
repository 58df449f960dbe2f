//! Cursor bounds invariant: the cursor always points at drawn content.

use super::Invariant;
use crate::phase::SessionPhase;
use crate::session::Session;

/// Invariant: The cursor stays within the drawn items.
///
/// While an item is in play the cursor indexes into `items`; completion
/// parks it one past the end. The cursor only ever moves forward, so a
/// snapshot sequence can never show progress going backwards.
pub struct CursorInBoundsInvariant;

impl<P, R> Invariant<Session<P, R>> for CursorInBoundsInvariant {
    fn holds(session: &Session<P, R>) -> bool {
        match &session.phase {
            SessionPhase::NotStarted => session.cursor == 0 && session.items.is_empty(),
            SessionPhase::InProgress | SessionPhase::ItemResolved(_) => {
                session.cursor < session.items.len()
            }
            SessionPhase::Completed => session.cursor == session.items.len(),
            SessionPhase::Expired => session.cursor <= session.items.len(),
        }
    }

    fn description() -> &'static str {
        "Cursor stays within the drawn items for the current phase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn test_fresh_session_holds() {
        let session = Session::<String, bool>::new(SessionConfig::default()).unwrap();
        assert!(CursorInBoundsInvariant::holds(&session));
    }

    #[test]
    fn test_holds_across_resolutions_and_completion() {
        let mut session =
            Session::new(SessionConfig::default().with_item_count(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        session.start(&catalog(), &mut rng).unwrap();
        assert!(CursorInBoundsInvariant::holds(&session));

        session.submit(&true).unwrap();
        assert!(CursorInBoundsInvariant::holds(&session));
        session.advance().unwrap();
        session.submit(&false).unwrap();
        session.advance().unwrap();
        assert!(CursorInBoundsInvariant::holds(&session));
        assert!(session.is_terminal());
    }

    #[test]
    fn test_oversized_cursor_violates() {
        let mut session =
            Session::new(SessionConfig::default().with_item_count(2)).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        session.start(&catalog(), &mut rng).unwrap();

        session.cursor = 2;
        assert!(!CursorInBoundsInvariant::holds(&session));
    }
}
