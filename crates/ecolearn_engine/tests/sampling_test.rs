//! Catalog sampling behavior as sessions see it.

use ecolearn_engine::{
    Catalog, ChallengeItem, Difficulty, ItemFilter, Outcome, SampleError, Session, SessionConfig,
    StartError,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn catalog(count: usize) -> Catalog<String, bool> {
    let items = (0..count)
        .map(|n| {
            let category = if n % 2 == 0 { "climate" } else { "water" };
            let difficulty = match n % 3 {
                0 => Difficulty::Easy,
                1 => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            ChallengeItem::new(
                format!("q{n}"),
                format!("question {n}"),
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
        })
        .collect();
    Catalog::new(items).expect("distinct ids")
}

#[test]
fn test_sampling_the_whole_catalog_draws_every_item_once() {
    let catalog = catalog(5);
    let mut rng = StdRng::seed_from_u64(99);
    let drawn = catalog.sample(5, None, &mut rng).unwrap();

    assert_eq!(drawn.len(), 5);
    let ids: HashSet<_> = drawn.iter().map(|item| item.id().to_owned()).collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn test_oversized_request_fails_with_counts() {
    let catalog = catalog(8);
    let mut rng = StdRng::seed_from_u64(99);
    let result = catalog.sample(10, None, &mut rng);
    assert_eq!(
        result.err(),
        Some(SampleError::InsufficientContent {
            requested: 10,
            available: 8,
        })
    );
}

#[test]
fn test_start_surfaces_sampling_failure_and_stays_startable() {
    let mut session =
        Session::new(SessionConfig::default().with_item_count(10)).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let err = session.start(&catalog(8), &mut rng).unwrap_err();
    assert_eq!(
        err,
        StartError::Sampling(SampleError::InsufficientContent {
            requested: 10,
            available: 8,
        })
    );

    // The failed start changed nothing; a bigger catalog works.
    let started = session.start(&catalog(12), &mut rng).unwrap();
    assert_eq!(started.snapshot.items_total, 10);
}

#[test]
fn test_filtered_draws_only_contain_matching_items() {
    let catalog = catalog(12);
    let mut rng = StdRng::seed_from_u64(7);

    let filter = ItemFilter::category("climate");
    let drawn = catalog.sample(4, Some(&filter), &mut rng).unwrap();
    assert!(drawn.iter().all(|item| item.category() == "climate"));

    let filter = ItemFilter::difficulty(Difficulty::Medium);
    let drawn = catalog.sample(3, Some(&filter), &mut rng).unwrap();
    assert!(
        drawn
            .iter()
            .all(|item| item.difficulty() == Difficulty::Medium)
    );
}

#[test]
fn test_filtered_session_start_counts_only_eligible_items() {
    let config = SessionConfig::default()
        .with_item_count(6)
        .with_filter(Some(ItemFilter::category("climate")));
    let mut session = Session::new(config).unwrap();
    let mut rng = StdRng::seed_from_u64(7);

    // 12 items, 6 of them climate: exactly enough.
    let started = session.start(&catalog(12), &mut rng).unwrap();
    assert_eq!(started.snapshot.items_total, 6);

    let config = SessionConfig::default()
        .with_item_count(6)
        .with_filter(Some(ItemFilter::category("climate")));
    let mut session = Session::new(config).unwrap();
    let err = session.start(&catalog(10), &mut rng).unwrap_err();
    assert_eq!(
        err,
        StartError::Sampling(SampleError::InsufficientContent {
            requested: 6,
            available: 5,
        })
    );
}

#[test]
fn test_seeded_sessions_replay_the_same_draw() {
    let catalog = catalog(20);

    let play_order = |seed: u64| -> Vec<String> {
        let mut session =
            Session::new(SessionConfig::default().with_item_count(8)).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order = Vec::new();
        let started = session.start(&catalog, &mut rng).unwrap();
        order.push(started.snapshot.current.unwrap().id);
        loop {
            session.submit(&true).unwrap();
            let advanced = session.advance().unwrap();
            match advanced.snapshot.current {
                Some(current) => order.push(current.id),
                None => break,
            }
        }
        order
    };

    assert_eq!(play_order(31), play_order(31));
    assert_eq!(play_order(31).len(), 8);
}
