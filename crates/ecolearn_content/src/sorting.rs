//! Recycle sorting: drop each waste item into the right bin.
//!
//! Untimed and forgiving. Wrong bins cost nothing and leave the item in
//! hand, and clearing the whole pile pays a five-hundred-point bonus.
//! Each item's catalog category is its correct bin's name, so a filtered
//! session can practice a single waste stream.

use ecolearn_engine::{
    Catalog, ChallengeItem, Difficulty, Outcome, ScoringPolicy, SessionConfig, TimerScope,
};
use serde::{Deserialize, Serialize};

/// Reward per correctly sorted item.
pub const SORT_POINTS: u32 = 100;

/// The four bins.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum WasteBin {
    /// Food scraps and garden waste.
    #[serde(rename = "organic")]
    #[strum(serialize = "organic")]
    Organic,
    /// Paper, glass, clean plastics.
    #[serde(rename = "recyclable")]
    #[strum(serialize = "recyclable")]
    Recyclable,
    /// Chemicals, batteries, medicines.
    #[serde(rename = "hazardous")]
    #[strum(serialize = "hazardous")]
    Hazardous,
    /// Electronics of any age.
    #[serde(rename = "e-waste")]
    #[strum(serialize = "e-waste")]
    EWaste,
}

/// One piece of waste to sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WastePrompt {
    /// What the player is holding.
    pub name: String,
}

/// The bin the player dropped the item into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinChoice(pub WasteBin);

const WASTE_ITEMS: [(&str, &str, WasteBin); 10] = [
    ("apple-core", "Apple Core", WasteBin::Organic),
    ("plastic-bottle", "Plastic Bottle", WasteBin::Recyclable),
    ("battery", "Battery", WasteBin::Hazardous),
    ("old-phone", "Old Phone", WasteBin::EWaste),
    ("banana-peel", "Banana Peel", WasteBin::Organic),
    ("newspaper", "Newspaper", WasteBin::Recyclable),
    ("paint-can", "Paint Can", WasteBin::Hazardous),
    ("laptop", "Laptop", WasteBin::EWaste),
    ("glass-jar", "Glass Jar", WasteBin::Recyclable),
    ("medicine", "Medicine", WasteBin::Hazardous),
];

/// The built-in waste pile.
pub fn waste_pile() -> Catalog<WastePrompt, BinChoice> {
    let items = WASTE_ITEMS
        .iter()
        .map(|(id, name, bin)| {
            let bin = *bin;
            ChallengeItem::new(
                *id,
                WastePrompt {
                    name: (*name).to_owned(),
                },
                bin.to_string(),
                Difficulty::Easy,
                SORT_POINTS,
                move |choice: &BinChoice| {
                    if choice.0 == bin {
                        Outcome::Correct
                    } else {
                        Outcome::Incorrect
                    }
                },
            )
        })
        .collect();
    Catalog::new(items).expect("built-in waste item ids are distinct")
}

/// Session shape for sorting: the whole pile, no clock, retries free,
/// bonus for finishing.
pub fn recycle_sorting() -> SessionConfig {
    SessionConfig::default()
        .with_item_count(10)
        .with_timer_scope(TimerScope::Untimed)
        .with_allow_retry(true)
        .with_max_hints_per_item(0)
        .with_policy(ScoringPolicy::default().with_completion_bonus(500))
        .with_resolve_display_ms(1_000)
}
