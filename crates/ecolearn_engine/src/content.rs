//! Challenge content: items, resolvers, catalogs, and sampling.
//!
//! Content is opaque to the session machinery. An item carries a prompt
//! payload the engine never inspects and a [`Resolve`] implementation that
//! judges responses. Catalogs are built once at startup and validated for
//! id uniqueness, so a sampled session can never contain duplicates.

use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Unique identifier of a challenge item within a catalog.
pub type ItemId = String;

/// Difficulty tag attached to every item, usable as a sampling filter.
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
pub enum Difficulty {
    /// Introductory material.
    Easy,
    /// Requires some familiarity with the topic.
    Medium,
    /// Specialist knowledge.
    Hard,
}

/// Verdict of a resolver over a single response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The response resolves the item.
    Correct,
    /// The response does not resolve the item.
    Incorrect,
}

/// Domain-supplied judgment of responses against one item.
///
/// Implementations must be pure: the same response always yields the same
/// outcome. Any `Fn(&R) -> Outcome` closure qualifies through the blanket
/// impl, which is how catalogs are typically built.
pub trait Resolve<R>: Send + Sync {
    /// Judges the response.
    fn resolve(&self, response: &R) -> Outcome;
}

impl<R, F> Resolve<R> for F
where
    F: Fn(&R) -> Outcome + Send + Sync,
{
    fn resolve(&self, response: &R) -> Outcome {
        self(response)
    }
}

/// One unit of content: a prompt to show, a resolver to judge responses,
/// and the scoring baseline.
///
/// Items are immutable once constructed. The resolver is shared behind an
/// [`Arc`], so cloning an item (as sampling does) is cheap.
pub struct ChallengeItem<P, R> {
    id: ItemId,
    prompt: P,
    category: String,
    difficulty: Difficulty,
    points_base: u32,
    resolver: Arc<dyn Resolve<R>>,
}

impl<P, R> ChallengeItem<P, R> {
    /// Creates an item from its parts, wrapping the resolver in an [`Arc`].
    pub fn new(
        id: impl Into<ItemId>,
        prompt: P,
        category: impl Into<String>,
        difficulty: Difficulty,
        points_base: u32,
        resolver: impl Resolve<R> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            prompt,
            category: category.into(),
            difficulty,
            points_base,
            resolver: Arc::new(resolver),
        }
    }

    /// Identifier, unique within its catalog.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Opaque prompt payload for the presentation layer.
    pub fn prompt(&self) -> &P {
        &self.prompt
    }

    /// Category tag.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Difficulty tag.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Baseline reward for resolving this item correctly.
    pub fn points_base(&self) -> u32 {
        self.points_base
    }

    /// Judges a response against this item.
    pub fn resolve(&self, response: &R) -> Outcome {
        self.resolver.resolve(response)
    }
}

impl<P: Clone, R> Clone for ChallengeItem<P, R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            prompt: self.prompt.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
            points_base: self.points_base,
            resolver: Arc::clone(&self.resolver),
        }
    }
}

impl<P: fmt::Debug, R> fmt::Debug for ChallengeItem<P, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChallengeItem")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("difficulty", &self.difficulty)
            .field("points_base", &self.points_base)
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

/// Optional restriction applied when sampling from a catalog.
///
/// Empty filters match everything; both fields set means both must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFilter {
    /// Keep only items carrying this category tag.
    pub category: Option<String>,
    /// Keep only items of this difficulty.
    pub difficulty: Option<Difficulty>,
}

impl ItemFilter {
    /// Filter matching a single category.
    pub fn category(name: impl Into<String>) -> Self {
        Self {
            category: Some(name.into()),
            difficulty: None,
        }
    }

    /// Filter matching a single difficulty.
    pub fn difficulty(difficulty: Difficulty) -> Self {
        Self {
            category: None,
            difficulty: Some(difficulty),
        }
    }

    /// Whether the item passes this filter.
    pub fn matches<P, R>(&self, item: &ChallengeItem<P, R>) -> bool {
        self.category
            .as_deref()
            .map_or(true, |category| category == item.category())
            && self
                .difficulty
                .map_or(true, |difficulty| difficulty == item.difficulty())
    }
}

/// Error raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum CatalogError {
    /// Two items share an id.
    #[display("Duplicate item id in catalog: {id}")]
    DuplicateId {
        /// The offending id.
        id: ItemId,
    },
}

/// Error raised while sampling from a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum SampleError {
    /// The catalog (after filtering) holds fewer items than requested.
    #[display("Insufficient content: requested {requested}, only {available} available")]
    InsufficientContent {
        /// Items asked for.
        requested: usize,
        /// Items eligible.
        available: usize,
    },
}

/// Read-only collection of challenge items.
///
/// Construction rejects duplicate ids, which is what lets [`Catalog::sample`]
/// guarantee duplicate-free sessions without re-checking.
#[derive(Debug, Clone)]
pub struct Catalog<P, R> {
    items: Vec<ChallengeItem<P, R>>,
}

impl<P: Clone, R> Catalog<P, R> {
    /// Builds a catalog, verifying id uniqueness.
    #[instrument(skip(items))]
    pub fn new(items: Vec<ChallengeItem<P, R>>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id().to_owned()) {
                return Err(CatalogError::DuplicateId {
                    id: item.id().to_owned(),
                });
            }
        }
        debug!(count = items.len(), "Catalog built");
        Ok(Self { items })
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All items, in insertion order.
    pub fn items(&self) -> &[ChallengeItem<P, R>] {
        &self.items
    }

    /// Number of items passing the filter.
    pub fn eligible(&self, filter: Option<&ItemFilter>) -> usize {
        self.items
            .iter()
            .filter(|item| filter.map_or(true, |f| f.matches(item)))
            .count()
    }

    /// Draws `count` distinct items passing the filter, in randomized order.
    ///
    /// Fails without drawing anything when the eligible pool is too small.
    /// Distinctness holds by construction because catalog ids are unique.
    #[instrument(skip(self, filter, rng), fields(requested = count))]
    pub fn sample(
        &self,
        count: usize,
        filter: Option<&ItemFilter>,
        rng: &mut impl Rng,
    ) -> Result<Vec<ChallengeItem<P, R>>, SampleError> {
        let pool: Vec<&ChallengeItem<P, R>> = self
            .items
            .iter()
            .filter(|item| filter.map_or(true, |f| f.matches(item)))
            .collect();
        if pool.len() < count {
            return Err(SampleError::InsufficientContent {
                requested: count,
                available: pool.len(),
            });
        }
        let mut drawn: Vec<ChallengeItem<P, R>> = pool
            .choose_multiple(rng, count)
            .map(|item| (*item).clone())
            .collect();
        drawn.shuffle(rng);
        debug_assert!(
            {
                let mut ids = HashSet::new();
                drawn.iter().all(|item| ids.insert(item.id()))
            },
            "sampled items must carry distinct ids"
        );
        debug!(drawn = drawn.len(), pool = pool.len(), "Sampled items");
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn item(id: &str, category: &str, difficulty: Difficulty) -> ChallengeItem<String, bool> {
        ChallengeItem::new(
            id,
            format!("prompt for {id}"),
            category,
            difficulty,
            100,
            |response: &bool| {
                if *response {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            },
        )
    }

    #[test]
    fn test_resolver_closure_judges_responses() {
        let item = item("a", "general", Difficulty::Easy);
        assert_eq!(item.resolve(&true), Outcome::Correct);
        assert_eq!(item.resolve(&false), Outcome::Incorrect);
    }

    #[test]
    fn test_catalog_rejects_duplicate_ids() {
        let result = Catalog::new(vec![
            item("a", "general", Difficulty::Easy),
            item("b", "general", Difficulty::Easy),
            item("a", "water", Difficulty::Hard),
        ]);
        assert_eq!(
            result.err(),
            Some(CatalogError::DuplicateId { id: "a".into() })
        );
    }

    #[test]
    fn test_filter_narrows_by_category_and_difficulty() {
        let climate = item("a", "climate", Difficulty::Easy);
        let water = item("b", "water", Difficulty::Hard);

        let by_category = ItemFilter::category("climate");
        assert!(by_category.matches(&climate));
        assert!(!by_category.matches(&water));

        let by_difficulty = ItemFilter::difficulty(Difficulty::Hard);
        assert!(!by_difficulty.matches(&climate));
        assert!(by_difficulty.matches(&water));

        let both = ItemFilter {
            category: Some("water".into()),
            difficulty: Some(Difficulty::Hard),
        };
        assert!(both.matches(&water));
        assert!(!both.matches(&climate));

        assert!(ItemFilter::default().matches(&climate));
        assert!(ItemFilter::default().matches(&water));
    }

    #[test]
    fn test_sample_rejects_oversized_requests_without_drawing() {
        let catalog = Catalog::new(vec![
            item("a", "general", Difficulty::Easy),
            item("b", "general", Difficulty::Easy),
        ])
        .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let result = catalog.sample(3, None, &mut rng);
        assert_eq!(
            result.err(),
            Some(SampleError::InsufficientContent {
                requested: 3,
                available: 2,
            })
        );
    }

    #[test]
    fn test_sample_respects_filters_when_counting_availability() {
        let catalog = Catalog::new(vec![
            item("a", "climate", Difficulty::Easy),
            item("b", "water", Difficulty::Easy),
            item("c", "water", Difficulty::Medium),
        ])
        .unwrap();
        assert_eq!(catalog.eligible(Some(&ItemFilter::category("water"))), 2);

        let mut rng = StdRng::seed_from_u64(2);
        let filter = ItemFilter::category("water");
        let drawn = catalog.sample(2, Some(&filter), &mut rng).unwrap();
        assert!(drawn.iter().all(|item| item.category() == "water"));

        let result = catalog.sample(2, Some(&ItemFilter::category("climate")), &mut rng);
        assert_eq!(
            result.err(),
            Some(SampleError::InsufficientContent {
                requested: 2,
                available: 1,
            })
        );
    }

    #[test]
    fn test_sample_is_deterministic_for_a_seed() {
        let items: Vec<_> = (0..12)
            .map(|n| item(&format!("q{n}"), "general", Difficulty::Easy))
            .collect();
        let catalog = Catalog::new(items).unwrap();

        let ids = |seed: u64| -> Vec<String> {
            let mut rng = StdRng::seed_from_u64(seed);
            catalog
                .sample(6, None, &mut rng)
                .unwrap()
                .iter()
                .map(|item| item.id().to_owned())
                .collect()
        };

        assert_eq!(ids(42), ids(42));
        let drawn = ids(42);
        let unique: HashSet<_> = drawn.iter().collect();
        assert_eq!(unique.len(), drawn.len());
    }
}
