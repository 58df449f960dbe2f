//! Read-only session views for presentation layers.

use crate::content::{Difficulty, ItemId};
use crate::phase::SessionPhase;
use serde::Serialize;

/// The item at the cursor, as the presentation layer sees it.
///
/// The resolver stays behind in the session; a view can never judge
/// responses on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentItem<P> {
    /// Item id.
    pub id: ItemId,
    /// Opaque prompt payload.
    pub prompt: P,
    /// Category tag.
    pub category: String,
    /// Difficulty tag.
    pub difficulty: Difficulty,
    /// Baseline reward.
    pub points_base: u32,
}

/// Point-in-time view of a session.
///
/// Snapshots are plain data, detached from the session that produced them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot<P> {
    /// Phase, with the just-resolved record attached when applicable.
    pub phase: SessionPhase,
    /// Index of the current item.
    pub cursor: usize,
    /// Items drawn for the session.
    pub items_total: usize,
    /// Cumulative score.
    pub score: i64,
    /// Consecutive correct resolutions.
    pub streak: u32,
    /// Submissions against the current item so far.
    pub attempts_on_current: u32,
    /// Hints taken on the current item so far.
    pub hints_on_current: u32,
    /// Seconds left on the clock, when one exists.
    pub remaining: Option<u32>,
    /// The item in play, present in `InProgress` and `ItemResolved`.
    pub current: Option<CurrentItem<P>>,
}
