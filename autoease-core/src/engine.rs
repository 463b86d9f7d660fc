//! Ease-adjustment algorithm.
//!
//! The engine compares a smoothed trailing success rate against the
//! configured target rate and scales the smoothed factor baseline by
//!
//!   ln(target_ratio) / ln(success_rate)
//!
//! so an item recalled exactly on target keeps its factor, an item recalled
//! below target loses factor (the scheduler shows it sooner), and an item
//! recalled above target gains factor. The "leash" clamps each step to a
//! window around the baseline so a single review never swings the factor
//! far, and the result is always clamped to `[min_ease, max_ease]`.
//!
//! Everything here is a pure function of its inputs: no I/O, no state,
//! identical inputs always produce identical output.

use crate::config::{DEFAULT_STARTING_EASE, EaseConfig};

/// Lowest rating on the 4-valued outcome scale. Anything above it counts as
/// a successful recall.
pub const FAILING_RATING: u32 = 1;

/// Exponential moving average of `values` with smoothing `weight`.
///
/// When `init` is given the average is seeded with it and every element
/// participates; otherwise the first element seeds the average and the
/// remainder participates. Returns `None` only for an empty slice with no
/// seed.
#[must_use]
pub fn moving_average(values: &[f64], weight: f64, init: Option<f64>) -> Option<f64> {
    let (mut avg, rest) = match (init, values.split_first()) {
        (Some(seed), _) => (seed, values),
        (None, Some((&first, rest))) => (first, rest),
        (None, None) => return None,
    };
    for &value in rest {
        avg = weight * value + (1.0 - weight) * avg;
    }
    Some(avg)
}

/// Smoothed trailing success rate of a rating history, seeded with the
/// configured target so an item with no evidence is assumed on-target.
#[must_use]
pub fn success_rate(config: &EaseConfig, ratings: &[u32]) -> f64 {
    let successes: Vec<f64> = ratings
        .iter()
        .map(|&rating| if rating > FAILING_RATING { 1.0 } else { 0.0 })
        .collect();
    moving_average(
        &successes,
        config.moving_average_weight,
        Some(config.target_ratio),
    )
    .unwrap_or(config.target_ratio)
}

/// Smoothed factor baseline: the trailing average of recorded factors, or
/// the configured starting factor when the item has none.
#[must_use]
pub fn factor_baseline(config: &EaseConfig, factors: &[u32]) -> f64 {
    let values: Vec<f64> = factors.iter().map(|&f| f64::from(f)).collect();
    moving_average(&values, config.moving_average_weight, None).unwrap_or_else(|| {
        f64::from(
            config
                .starting_ease_factor
                .or(config.starting_ease)
                .unwrap_or(DEFAULT_STARTING_EASE),
        )
    })
}

/// Suggested new ease factor for an item.
///
/// `ratings` is the outcome history oldest-first — optionally with a pending
/// what-if answer appended by the caller — and `factors` the positive
/// recorded factors oldest-first. With `leashed` the step is clamped to
/// `baseline ± leash` before the `[min_ease, max_ease]` clamp; callers that
/// want to surface both suggestions call once with each value.
#[must_use]
pub fn calculate_ease(config: &EaseConfig, ratings: &[u32], factors: &[u32], leashed: bool) -> u32 {
    let baseline = factor_baseline(config, factors);

    // ln(0) and ln(1) degenerate the ratio; pin both rates to (0, 1).
    let rate = success_rate(config, ratings).clamp(0.01, 0.99);
    let target = config.target_ratio.clamp(0.01, 0.99);

    let mut suggested = baseline * target.ln() / rate.ln();
    if leashed {
        let leash = f64::from(config.leash);
        suggested = suggested.clamp(baseline - leash, baseline + leash);
    }
    suggested = suggested.clamp(f64::from(config.min_ease), f64::from(config.max_ease));
    suggested.round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> EaseConfig {
        EaseConfig {
            starting_ease_factor: Some(2500),
            ..EaseConfig::default()
        }
    }

    #[test]
    fn moving_average_single_element_is_identity() {
        for weight in [0.1, 0.2, 0.5, 1.0] {
            assert_eq!(moving_average(&[42.0], weight, None), Some(42.0));
        }
    }

    #[test]
    fn moving_average_empty_returns_seed() {
        assert_eq!(moving_average(&[], 0.2, Some(0.85)), Some(0.85));
        assert_eq!(moving_average(&[], 0.2, None), None);
    }

    #[test]
    fn moving_average_seed_blends_with_single_element() {
        // weight * x + (1 - weight) * seed
        let avg = moving_average(&[1.0], 0.2, Some(0.5)).expect("seeded");
        assert!((avg - 0.6).abs() < 1e-12);
    }

    #[test]
    fn moving_average_constant_sequence_is_fixed_point() {
        let avg = moving_average(&[3.0; 20], 0.2, Some(3.0)).expect("seeded");
        assert!((avg - 3.0).abs() < 1e-9);
    }

    #[test]
    fn moving_average_weights_recent_values_more() {
        let old_heavy = moving_average(&[1.0, 0.0], 0.2, None).expect("avg");
        let new_heavy = moving_average(&[0.0, 1.0], 0.2, None).expect("avg");
        assert!(new_heavy > old_heavy);
    }

    #[test]
    fn no_history_keeps_starting_factor() {
        let factor = calculate_ease(&config(), &[], &[], true);
        assert_eq!(factor, 2500);
        let factor = calculate_ease(&config(), &[], &[], false);
        assert_eq!(factor, 2500);
    }

    #[test]
    fn on_target_history_does_not_move_factor() {
        // success rate exactly at target when there is no rating evidence
        let factor = calculate_ease(&config(), &[], &[2600, 2600, 2600], false);
        assert_eq!(factor, 2600);
    }

    #[test]
    fn three_failures_pull_factor_down_to_leash() {
        let factor = calculate_ease(&config(), &[1, 1, 1], &[2500, 2500, 2500], true);
        assert!(factor < 2500);
        assert!(factor >= 2400);
        assert_eq!(factor, 2400); // the unleashed pull is far larger than the leash
    }

    #[test]
    fn unleashed_suggestion_can_exceed_leash_window() {
        let leashed = calculate_ease(&config(), &[1, 1, 1], &[2500, 2500, 2500], true);
        let unleashed = calculate_ease(&config(), &[1, 1, 1], &[2500, 2500, 2500], false);
        assert!(unleashed < leashed);
        assert!(unleashed >= 1000); // min_ease clamp still applies
    }

    #[test]
    fn successes_above_target_raise_factor() {
        let factor = calculate_ease(&config(), &[3, 3, 3, 3, 3], &[2500], true);
        assert!(factor > 2500);
        assert!(factor <= 2600);
    }

    #[test]
    fn result_respects_min_and_max_ease() {
        let tight = EaseConfig {
            min_ease: 2450,
            max_ease: 2550,
            leash: 10_000,
            starting_ease_factor: Some(2500),
            ..EaseConfig::default()
        };
        let low = calculate_ease(&tight, &[1; 10], &[2500], true);
        assert_eq!(low, 2450);
        let high = calculate_ease(&tight, &[4; 10], &[2500], true);
        assert_eq!(high, 2550);
    }

    #[test]
    fn calculate_ease_is_idempotent() {
        let ratings = [1, 3, 3, 2, 1, 4];
        let factors = [2500, 2400, 2450, 2500];
        let first = calculate_ease(&config(), &ratings, &factors, true);
        let second = calculate_ease(&config(), &ratings, &factors, true);
        assert_eq!(first, second);
    }

    #[test]
    fn baseline_falls_back_through_config() {
        let explicit = EaseConfig {
            starting_ease: Some(2300),
            ..EaseConfig::default()
        };
        assert!((factor_baseline(&explicit, &[]) - 2300.0).abs() < f64::EPSILON);

        let bare = EaseConfig::default();
        assert!(
            (factor_baseline(&bare, &[]) - f64::from(DEFAULT_STARTING_EASE)).abs()
                < f64::EPSILON
        );
    }
}
