//! Diagnostic report rendering.
//!
//! Pure formatting of the engine's view of a single item — no I/O, no side
//! effects. The host decides where the text goes (tooltip, log line, CLI).

use crate::config::EaseConfig;
use crate::engine::{calculate_ease, factor_baseline, success_rate};

/// Number of trailing ratings shown in the report.
const RATING_TAIL: usize = 10;

/// Everything the report needs to know about one item.
#[derive(Debug, Clone)]
pub struct ItemSnapshot<'a> {
    /// Host-side item identifier.
    pub item_id: i64,
    /// Human-readable item state, e.g. `"review"` or `"new (learn)"`.
    pub state: &'a str,
    /// Whether the item currently sits in the review queue.
    pub in_review_queue: bool,
    /// Ordered outcome ratings, oldest first.
    pub ratings: &'a [u32],
    /// Ordered positive recorded factors, oldest first.
    pub factors: &'a [u32],
}

/// Render the diagnostic report for one item.
///
/// The full variant lists the item's identity and state, the matched
/// settings name (when `matched_settings` is given), the smoothed success
/// rate and factor baseline, the bounded suggestion — with the unbounded
/// one in parentheses when the leash bit — and the trailing ratings. When
/// `stats_brief` is set or the tuner is disabled for this deck, a shortened
/// variant is emitted instead.
#[must_use]
pub fn describe(
    config: &EaseConfig,
    item: &ItemSnapshot<'_>,
    matched_settings: Option<&str>,
) -> String {
    let last_factor = item
        .factors
        .last()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    let new_factor_line = new_factor_line(config, item);

    let mut lines = Vec::new();
    if config.stats_brief || !config.enabled {
        if !config.enabled {
            if let Some(name) = matched_settings {
                lines.push(format!("using settings from {name}"));
            }
            lines.push("ease adjustment disabled for this deck".to_string());
        }
        lines.push(format!("last factor: {last_factor}"));
        lines.push(new_factor_line);
    } else {
        lines.push(format!("item {}: {}", item.item_id, item.state));
        if let Some(name) = matched_settings {
            lines.push(format!("using settings from {name}"));
        }
        lines.push(format!(
            "smoothed success rate: {:.4}",
            success_rate(config, item.ratings)
        ));
        lines.push(format!("last factor: {last_factor}"));
        lines.push(format!(
            "smoothed factor: {:.2}",
            factor_baseline(config, item.factors)
        ));
        lines.push(new_factor_line);
        lines.push(format!("ratings: {}", rating_tail(item.ratings)));
    }
    lines.join("\n")
}

fn new_factor_line(config: &EaseConfig, item: &ItemSnapshot<'_>) -> String {
    if !config.enabled {
        // manual adjustment deltas the scheduler applies when the tuner is off
        return "new factor: manual (Easy +150, Good +0, Hard -150, Again -200)".to_string();
    }
    if config.reviews_only && !item.in_review_queue {
        return "new factor: non-review, no change".to_string();
    }
    let leashed = calculate_ease(config, item.ratings, item.factors, true);
    let unleashed = calculate_ease(config, item.ratings, item.factors, false);
    if leashed == unleashed {
        format!("new factor: {leashed}")
    } else {
        format!("new factor: {leashed} (unleashed: {unleashed})")
    }
}

/// The last [`RATING_TAIL`] ratings as a comma-separated list, prefixed with
/// an ellipsis marker when older entries were cut.
fn rating_tail(ratings: &[u32]) -> String {
    if ratings.is_empty() {
        return String::new();
    }
    let start = ratings.len().saturating_sub(RATING_TAIL);
    let tail: Vec<String> = ratings[start..].iter().map(ToString::to_string).collect();
    let mut rendered = String::new();
    if start > 0 {
        rendered.push_str("..., ");
    }
    rendered.push_str(&tail.join(", "));
    rendered
}
