//! Pollution detective: evidence-driven whodunit cases.
//!
//! The player starts with a thousand points, burns them on wrong
//! accusations and paid evidence reveals, and names a suspect from the
//! case's lineup. Two clue reveals per case are free. Accusations are
//! matched against the culprit after trimming and without regard to case.

use ecolearn_engine::{
    Catalog, ChallengeItem, Difficulty, Outcome, ScoringPolicy, SessionConfig, TimerScope,
};
use serde::{Deserialize, Serialize};

/// One piece of evidence in a case file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueCard {
    /// Evidence name.
    pub title: String,
    /// The raw measurement or observation.
    pub data: String,
    /// Short reading of the data.
    pub value: String,
    /// What the evidence implies about the source.
    pub impact: String,
}

/// One case as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CasePrompt {
    /// Case name.
    pub title: String,
    /// What happened.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// Evidence available for reveal.
    pub clues: Vec<ClueCard>,
    /// The lineup to accuse from.
    pub suspects: Vec<String>,
    /// Full account of the crime; shown once the case closes.
    pub solution: String,
}

/// A named suspect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accusation(pub String);

/// Reward for closing a case.
pub const CASE_POINTS: u32 = 500;

struct Case {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    difficulty: Difficulty,
    clues: [(&'static str, &'static str, &'static str, &'static str); 3],
    suspects: [&'static str; 4],
    culprit: &'static str,
    solution: &'static str,
}

const CASES: [Case; 2] = [
    Case {
        id: "river-contamination",
        title: "Mystery of the Contaminated River",
        description: "Fish are dying in the Green Valley River. Citizens report \
                      strange smells and discolored water.",
        location: "Green Valley River",
        difficulty: Difficulty::Medium,
        clues: [
            (
                "Water pH Analysis",
                "pH Level: 3.2",
                "Highly Acidic",
                "Normal river pH is 6.5-8.5. This indicates chemical contamination.",
            ),
            (
                "Chemical Analysis",
                "Heavy metals detected: Lead 150mg/L, Mercury 45mg/L",
                "Toxic Levels",
                "Industrial waste contains these metals. Exceeds safe limits by 300%.",
            ),
            (
                "Pollution Source Location",
                "Contamination highest near Grid E4",
                "Point Source",
                "Pollution concentration decreases downstream, indicating nearby source.",
            ),
        ],
        suspects: [
            "Textile Factory",
            "Agricultural Farm",
            "Electronics Manufacturer",
            "Residential Area",
        ],
        culprit: "Electronics Manufacturer",
        solution: "The electronics manufacturer was illegally dumping heavy metals \
                   from circuit board production into the river. The highly acidic pH \
                   and toxic metal concentrations match their manufacturing waste.",
    },
    Case {
        id: "air-pollution",
        title: "The Smog Crisis Investigation",
        description: "A sudden spike in air pollution has residents experiencing \
                      breathing difficulties. Visibility is severely reduced.",
        location: "Metro City Industrial District",
        difficulty: Difficulty::Hard,
        clues: [
            (
                "Air Quality Index",
                "AQI: 450 (Hazardous), PM2.5: 250ug/m3",
                "Critical Levels",
                "Safe PM2.5 level is below 15ug/m3. Current levels cause immediate health risks.",
            ),
            (
                "Wind Direction Analysis",
                "Wind blowing from Northwest at 15km/h",
                "Northwest Origin",
                "Pollution source located northwest of affected area.",
            ),
            (
                "Pollutant Composition",
                "Sulfur dioxide: 85%, Coal particles: 12%, Other: 3%",
                "Coal Combustion",
                "High sulfur content indicates coal burning as primary source.",
            ),
        ],
        suspects: [
            "Coal Power Plant",
            "Car Traffic",
            "Construction Site",
            "Food Processing Plant",
        ],
        culprit: "Coal Power Plant",
        solution: "The coal power plant's emission control system malfunctioned, \
                   releasing excessive sulfur dioxide and coal particles. Wind patterns \
                   and chemical composition confirm the plant as the source.",
    },
];

/// The built-in case files.
pub fn case_files() -> Catalog<CasePrompt, Accusation> {
    let items = CASES
        .iter()
        .map(|case| {
            let culprit = case.culprit;
            ChallengeItem::new(
                case.id,
                CasePrompt {
                    title: case.title.to_owned(),
                    description: case.description.to_owned(),
                    location: case.location.to_owned(),
                    clues: case
                        .clues
                        .iter()
                        .map(|(title, data, value, impact)| ClueCard {
                            title: (*title).to_owned(),
                            data: (*data).to_owned(),
                            value: (*value).to_owned(),
                            impact: (*impact).to_owned(),
                        })
                        .collect(),
                    suspects: case.suspects.iter().map(|s| (*s).to_owned()).collect(),
                    solution: case.solution.to_owned(),
                },
                "detective",
                case.difficulty,
                CASE_POINTS,
                move |answer: &Accusation| {
                    if answer.0.trim().eq_ignore_ascii_case(culprit) {
                        Outcome::Correct
                    } else {
                        Outcome::Incorrect
                    }
                },
            )
        })
        .collect();
    Catalog::new(items).expect("built-in case ids are distinct")
}

/// Session shape for the detective: both cases against one five-minute
/// countdown, starting from a thousand points that wrong accusations and
/// paid clue reveals erode.
pub fn pollution_detective() -> SessionConfig {
    SessionConfig::default()
        .with_item_count(2)
        .with_timer_scope(TimerScope::PerSession { seconds: 300 })
        .with_allow_retry(true)
        .with_initial_score(1_000)
        .with_max_hints_per_item(3)
        .with_policy(
            ScoringPolicy::default()
                .with_incorrect_penalty(200)
                .with_hint_penalty(100)
                .with_free_hints(2),
        )
        .with_resolve_display_ms(2_000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_cases_carry_three_clues_and_four_suspects() {
        let catalog = case_files();
        assert_eq!(catalog.len(), 2);
        for item in catalog.items() {
            assert_eq!(item.prompt().clues.len(), 3);
            assert_eq!(item.prompt().suspects.len(), 4);
            assert_eq!(item.points_base(), CASE_POINTS);
        }
    }

    #[test]
    fn test_the_culprit_is_always_in_the_lineup() {
        let catalog = case_files();
        for item in catalog.items() {
            let solved = item
                .prompt()
                .suspects
                .iter()
                .any(|suspect| item.resolve(&Accusation(suspect.clone())) == Outcome::Correct);
            assert!(solved, "no suspect closes case {}", item.id());
        }
    }

    #[test]
    fn test_accusations_fold_case_and_whitespace() {
        let catalog = case_files();
        let river = catalog
            .items()
            .iter()
            .find(|item| item.id() == "river-contamination")
            .unwrap();
        assert_eq!(
            river.resolve(&Accusation("electronics manufacturer".into())),
            Outcome::Correct
        );
        assert_eq!(
            river.resolve(&Accusation("  Electronics Manufacturer ".into())),
            Outcome::Correct
        );
        assert_eq!(
            river.resolve(&Accusation("Textile Factory".into())),
            Outcome::Incorrect
        );
    }

    #[test]
    fn test_preset_starts_from_a_bank_of_points() {
        let config = pollution_detective();
        assert_eq!(config.item_count, 2);
        assert_eq!(config.initial_score, 1_000);
        assert_eq!(config.timer_scope, TimerScope::PerSession { seconds: 300 });
        assert!(config.allow_retry);
        assert_eq!(config.policy.incorrect_penalty, 200);
        assert_eq!(config.policy.free_hints, 2);
        assert_eq!(config.max_hints_per_item, 3);
    }
}
