//! Multiple-choice environmental quiz: question bank, preset, and rating.
//!
//! The quiz draws ten questions per session, thirty seconds each, and pays
//! a time bonus of ten points per remaining second plus fifty points per
//! streak step. Wrong answers cost nothing but reset the streak.

use ecolearn_engine::{
    Catalog, ChallengeItem, Difficulty, Outcome, ScoringPolicy, SessionConfig, SessionSummary,
    TimerScope,
};
use serde::{Deserialize, Serialize};

/// Baseline reward per question.
pub const QUESTION_POINTS: u32 = 100;

/// One multiple-choice question as shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizPrompt {
    /// Question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// Shown once the question resolves.
    pub explanation: String,
}

/// A selected option, by index into [`QuizPrompt::options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizAnswer(pub usize);

/// Question bank categories.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QuizCategory {
    /// Greenhouse gases, warming, acidification.
    Climate,
    /// Waste streams and material cycles.
    Recycling,
    /// Species, habitats, ecosystems.
    Biodiversity,
    /// Generation, efficiency, renewables.
    Energy,
    /// Fresh water and conservation.
    Water,
    /// Everything else.
    General,
}

/// Accuracy tiers shown on the quiz results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum QuizRating {
    /// 90% accuracy and up.
    #[strum(serialize = "Eco-Champion")]
    Champion,
    /// 80% to 89%.
    #[strum(serialize = "Eco-Expert")]
    Expert,
    /// 70% to 79%.
    #[strum(serialize = "Eco-Warrior")]
    Warrior,
    /// 60% to 69%.
    #[strum(serialize = "Eco-Learner")]
    Learner,
    /// Below 60%.
    #[strum(serialize = "Eco-Beginner")]
    Beginner,
}

impl QuizRating {
    /// Tier for a rounded accuracy percentage.
    pub fn for_accuracy(accuracy_pct: u32) -> Self {
        match accuracy_pct {
            90.. => QuizRating::Champion,
            80..=89 => QuizRating::Expert,
            70..=79 => QuizRating::Warrior,
            60..=69 => QuizRating::Learner,
            _ => QuizRating::Beginner,
        }
    }

    /// Tier for a finished session.
    pub fn for_summary(summary: &SessionSummary) -> Self {
        Self::for_accuracy(summary.accuracy_pct)
    }
}

type Question = (
    &'static str,
    QuizCategory,
    Difficulty,
    &'static str,
    [&'static str; 4],
    usize,
    &'static str,
);

#[rustfmt::skip]
const QUESTIONS: [Question; 30] = [
    (
        "q01", QuizCategory::Climate, Difficulty::Easy,
        "Which gas is primarily responsible for the greenhouse effect?",
        ["Oxygen", "Carbon Dioxide", "Nitrogen", "Hydrogen"], 1,
        "Carbon dioxide released by human activity is the main driver of the greenhouse effect.",
    ),
    (
        "q02", QuizCategory::Climate, Difficulty::Medium,
        "How much has the global average temperature risen since pre-industrial times?",
        ["0.5 degrees C", "1.1 degrees C", "2.5 degrees C", "3 degrees C"], 1,
        "Global average temperature has risen about 1.1 degrees C since pre-industrial times.",
    ),
    (
        "q03", QuizCategory::Energy, Difficulty::Medium,
        "Which country is the largest producer of renewable energy?",
        ["USA", "Germany", "China", "India"], 2,
        "China leads the world in renewable energy production, especially solar and wind.",
    ),
    (
        "q04", QuizCategory::Recycling, Difficulty::Easy,
        "How long does a plastic bottle take to decompose?",
        ["50 years", "100 years", "450 years", "1000 years"], 2,
        "Plastic bottles take roughly 450 years to decompose in a landfill.",
    ),
    (
        "q05", QuizCategory::Recycling, Difficulty::Hard,
        "What percentage of all plastic ever produced has been recycled?",
        ["25%", "50%", "9%", "75%"], 2,
        "Only about 9% of all plastic ever produced has been recycled.",
    ),
    (
        "q06", QuizCategory::Recycling, Difficulty::Medium,
        "Which material can be recycled indefinitely without losing quality?",
        ["Paper", "Plastic", "Glass", "Cardboard"], 2,
        "Glass can be recycled endlessly without any loss in quality or purity.",
    ),
    (
        "q07", QuizCategory::Biodiversity, Difficulty::Hard,
        "How many species are estimated to go extinct every day?",
        ["10-50", "100-200", "1-5", "500-1000"], 0,
        "Scientists estimate 10 to 50 species go extinct daily, largely from habitat loss.",
    ),
    (
        "q08", QuizCategory::Biodiversity, Difficulty::Medium,
        "What percentage of Earth's land is protected for wildlife?",
        ["5%", "15%", "30%", "50%"], 1,
        "About 15% of Earth's land currently has protected status.",
    ),
    (
        "q09", QuizCategory::Biodiversity, Difficulty::Hard,
        "Which ecosystem produces most of Earth's oxygen?",
        ["Rainforests", "Ocean phytoplankton", "Grasslands", "Boreal forests"], 1,
        "Ocean phytoplankton produces an estimated 50-80% of Earth's oxygen.",
    ),
    (
        "q10", QuizCategory::Water, Difficulty::Easy,
        "How much water should a person drink per day?",
        ["1 liter", "2 liters", "4 liters", "6 liters"], 1,
        "Health guidance suggests about 2 liters, roughly eight glasses, per day.",
    ),
    (
        "q11", QuizCategory::Water, Difficulty::Medium,
        "What percentage of Earth's water is fresh water?",
        ["2.5%", "10%", "25%", "50%"], 0,
        "Only 2.5% of Earth's water is fresh, and most of that is locked in glaciers.",
    ),
    (
        "q12", QuizCategory::Water, Difficulty::Easy,
        "Which household activity uses the most water?",
        ["Cooking", "Showering", "Toilet flushing", "Washing dishes"], 2,
        "Toilet flushing accounts for nearly 30% of household water use.",
    ),
    (
        "q13", QuizCategory::Energy, Difficulty::Medium,
        "Which renewable energy source is growing fastest worldwide?",
        ["Wind", "Solar", "Hydro", "Geothermal"], 1,
        "Solar is the fastest-growing renewable energy source worldwide.",
    ),
    (
        "q14", QuizCategory::Energy, Difficulty::Easy,
        "How much energy do LED bulbs save compared to incandescent bulbs?",
        ["25%", "50%", "75%", "90%"], 2,
        "LED bulbs use about 75% less energy than incandescent bulbs.",
    ),
    (
        "q15", QuizCategory::Energy, Difficulty::Medium,
        "What is the most energy-efficient way to heat a home?",
        ["Gas furnace", "Electric heater", "Heat pump", "Wood stove"], 2,
        "Heat pumps deliver three to four times more heat per unit of energy than direct heating.",
    ),
    (
        "q16", QuizCategory::General, Difficulty::Easy,
        "What does a carbon footprint measure?",
        ["Shoe size", "Greenhouse gases produced", "Walking distance", "Carbon in soil"], 1,
        "A carbon footprint measures the total greenhouse gas emissions caused by an activity.",
    ),
    (
        "q17", QuizCategory::General, Difficulty::Easy,
        "Which transportation method has the lowest carbon footprint?",
        ["Car", "Bus", "Train", "Bicycle"], 3,
        "Bicycles produce no direct emissions at all.",
    ),
    (
        "q18", QuizCategory::Biodiversity, Difficulty::Medium,
        "What is the main cause of Amazon deforestation?",
        ["Logging", "Agriculture", "Mining", "Urban development"], 1,
        "Agriculture, above all cattle ranching, drives about 80% of Amazon deforestation.",
    ),
    (
        "q19", QuizCategory::Energy, Difficulty::Hard,
        "What share of world electricity comes from renewable sources?",
        ["15%", "28%", "45%", "60%"], 1,
        "Renewables supply about 28% of global electricity generation.",
    ),
    (
        "q20", QuizCategory::Climate, Difficulty::Hard,
        "What causes ocean acidification?",
        ["Plastic pollution", "Absorbing carbon dioxide", "Oil spills", "Overfishing"], 1,
        "Oceans absorb CO2 from the atmosphere, which forms carbonic acid in seawater.",
    ),
    (
        "q21", QuizCategory::General, Difficulty::Easy,
        "Which Indian city is known as the Garden City?",
        ["Mumbai", "Bangalore", "Delhi", "Chennai"], 1,
        "Bangalore earned the name Garden City for its parks and green spaces.",
    ),
    (
        "q22", QuizCategory::Energy, Difficulty::Hard,
        "What is India's renewable energy capacity target for 2030?",
        ["100 GW", "250 GW", "450 GW", "600 GW"], 2,
        "India targets 450 GW of renewable capacity by 2030.",
    ),
    (
        "q23", QuizCategory::Energy, Difficulty::Hard,
        "Where is the world's largest solar park?",
        ["Gansu, China", "Bhadla, India", "Nevada, USA", "Bavaria, Germany"], 1,
        "Bhadla Solar Park in Rajasthan, India is the largest in the world.",
    ),
    (
        "q24", QuizCategory::Water, Difficulty::Medium,
        "Which practice saves the most water at home?",
        ["Shorter showers", "Fixing leaks", "Full dishwasher loads", "Collecting rainwater"], 3,
        "Rainwater harvesting can save thousands of liters per household per year.",
    ),
    (
        "q25", QuizCategory::Recycling, Difficulty::Easy,
        "How should you dispose of electronic waste?",
        ["Regular trash", "Certified recycling center", "Burning", "Burying"], 1,
        "E-waste carries toxic materials and belongs at a certified recycling center.",
    ),
    (
        "q26", QuizCategory::General, Difficulty::Medium,
        "How much of the food produced globally is wasted?",
        ["10%", "20%", "33%", "50%"], 2,
        "About one third of all food produced globally goes to waste.",
    ),
    (
        "q27", QuizCategory::Recycling, Difficulty::Medium,
        "Which gas do landfills primarily emit?",
        ["Carbon dioxide", "Methane", "Oxygen", "Nitrogen"], 1,
        "Decomposing landfill waste emits methane, far more potent than CO2.",
    ),
    (
        "q28", QuizCategory::Recycling, Difficulty::Easy,
        "What happens to plastic that ends up in the ocean?",
        ["It dissolves", "It breaks into microplastics", "It sinks harmlessly", "It evaporates"], 1,
        "Ocean plastic fragments into microplastics that persist for centuries.",
    ),
    (
        "q29", QuizCategory::Climate, Difficulty::Hard,
        "Which individual choice cuts the most emissions?",
        ["Recycling at home", "A vegetarian diet", "Avoiding air travel", "LED lighting"], 2,
        "Skipping long-haul flights is among the highest-impact individual choices.",
    ),
    (
        "q30", QuizCategory::Biodiversity, Difficulty::Medium,
        "Which tree absorbs the most carbon dioxide over its lifetime?",
        ["Oak", "Pine", "Palm", "Birch"], 0,
        "Mature oaks absorb large amounts of CO2 and support hundreds of species.",
    ),
];

/// The built-in environmental question bank.
pub fn question_bank() -> Catalog<QuizPrompt, QuizAnswer> {
    let items = QUESTIONS
        .iter()
        .map(|(id, category, difficulty, question, options, correct, explanation)| {
            let correct = *correct;
            ChallengeItem::new(
                *id,
                QuizPrompt {
                    question: (*question).to_owned(),
                    options: options.iter().map(|option| (*option).to_owned()).collect(),
                    explanation: (*explanation).to_owned(),
                },
                category.to_string(),
                *difficulty,
                QUESTION_POINTS,
                move |answer: &QuizAnswer| {
                    if answer.0 == correct {
                        Outcome::Correct
                    } else {
                        Outcome::Incorrect
                    }
                },
            )
        })
        .collect();
    Catalog::new(items).expect("built-in question ids are distinct")
}

/// Session shape for the timed quiz: ten questions, thirty seconds each,
/// no retry, time and streak bonuses, two-second answer reveal.
pub fn quiz_battle() -> SessionConfig {
    SessionConfig::default()
        .with_item_count(10)
        .with_timer_scope(TimerScope::PerItem { seconds: 30 })
        .with_allow_retry(false)
        .with_max_hints_per_item(0)
        .with_policy(
            ScoringPolicy::default()
                .with_time_bonus_weight(10)
                .with_streak_bonus_weight(50),
        )
        .with_resolve_display_ms(2_000)
}
