//! autoease benchmark suite.
//!
//! The tuner runs once per answered review, often on the host's UI thread,
//! so resolution + adjustment must stay comfortably in the microsecond
//! range even for long histories and deep deck trees.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use autoease_core::config::{ConfigFragment, EaseConfig, RawConfig};
use autoease_core::engine::{calculate_ease, moving_average};
use autoease_core::resolve::resolve_by_ancestry;
use autoease_host::{DeckId, ItemId, ReviewEntry, ReviewHost, ReviewKind, suggested_factor};

fn bench_config() -> EaseConfig {
    EaseConfig {
        starting_ease_factor: Some(2500),
        ..EaseConfig::default()
    }
}

/// A review history alternating passes and occasional lapses.
fn history(len: usize) -> (Vec<u32>, Vec<u32>) {
    let ratings = (0..len)
        .map(|i| if i % 5 == 0 { 1 } else { 3 })
        .collect();
    let factors = (0..len)
        .map(|i| 2400 + (i as u32 % 5) * 50)
        .collect();
    (ratings, factors)
}

/// Benchmark: moving average over a long history.
fn bench_moving_average(c: &mut Criterion) {
    let values: Vec<f64> = (0..1000).map(|i| f64::from(i % 2)).collect();
    c.bench_function("moving_average_1000", |b| {
        b.iter(|| moving_average(black_box(&values), 0.2, Some(0.85)));
    });
}

/// Benchmark: full adjustment for a typical and a long history.
fn bench_calculate_ease(c: &mut Criterion) {
    let config = bench_config();

    let (ratings, factors) = history(20);
    c.bench_function("calculate_ease_20_reviews", |b| {
        b.iter(|| calculate_ease(&config, black_box(&ratings), black_box(&factors), true));
    });

    let (ratings, factors) = history(1000);
    c.bench_function("calculate_ease_1000_reviews", |b| {
        b.iter(|| calculate_ease(&config, black_box(&ratings), black_box(&factors), true));
    });
}

/// Benchmark: ancestry resolution against a deep, wide override tree.
fn bench_resolution(c: &mut Criterion) {
    let mut raw = RawConfig::default();
    for major in 0..50 {
        let mut path = format!("Deck{major}");
        for depth in 0..5 {
            raw.deck_settings.insert(
                path.clone(),
                ConfigFragment {
                    leash: Some(100 + depth),
                    ..ConfigFragment::default()
                },
            );
            path = format!("{path}::Sub{depth}");
        }
    }
    let deck = "Deck25::Sub0::Sub1::Sub2::Sub3";

    c.bench_function("resolve_by_ancestry_deep_tree", |b| {
        b.iter(|| resolve_by_ancestry(black_box(&raw), black_box(deck)));
    });
}

/// In-memory host with one deep-pathed deck and a long review log.
struct BenchHost {
    log: Vec<ReviewEntry>,
}

impl BenchHost {
    fn new(reviews: usize) -> Self {
        let log = (0..reviews)
            .map(|i| {
                let rating = if i % 5 == 0 { 1 } else { 3 };
                ReviewEntry::new(ReviewKind::Review, rating, 2400 + (i as u32 % 5) * 50)
            })
            .collect();
        Self { log }
    }
}

impl ReviewHost for BenchHost {
    fn deck_name(&self, _deck: DeckId) -> Option<String> {
        Some("Language::French::Verbs".to_string())
    }

    fn review_log(&self, _item: ItemId) -> Vec<ReviewEntry> {
        self.log.clone()
    }

    fn starting_ease(&self, _deck: DeckId) -> Option<u32> {
        Some(2500)
    }

    fn deck_items(&self, _deck: DeckId) -> Vec<ItemId> {
        vec![1]
    }

    fn all_decks(&self) -> Vec<DeckId> {
        vec![1]
    }
}

/// Benchmark: the full per-answer host flow — resolution, history shaping,
/// what-if adjustment — as it runs on the UI thread after each review.
fn bench_host_flow(c: &mut Criterion) {
    let raw = RawConfig::from_json(
        r#"{
            "deck_settings": {
                "Language": { "target_ratio": 0.9 },
                "Language::French": { "leash": 50 }
            }
        }"#,
    )
    .expect("document");
    let host = BenchHost::new(100);

    c.bench_function("suggested_factor_100_reviews", |b| {
        b.iter(|| suggested_factor(&host, black_box(&raw), 1, 1, Some(3), true));
    });
}

criterion_group!(
    benches,
    bench_moving_average,
    bench_calculate_ease,
    bench_resolution,
    bench_host_flow
);
criterion_main!(benches);
