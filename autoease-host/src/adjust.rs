//! Adjustment orchestration over the host seam.
//!
//! The host implements [`ReviewHost`]; this module wires resolution,
//! history shaping, and the engine together: per-answer adjustment with an
//! optional what-if rating, whole-deck recalculation, and the diagnostic
//! report. No coordination logic lives in the core — everything here is a
//! straight pipeline over the trait.

use tracing::{debug, info};

use autoease_core::Result;
use autoease_core::config::{EaseConfig, RawConfig};
use autoease_core::engine::calculate_ease;
use autoease_core::report::{ItemSnapshot, describe};
use autoease_core::resolve::{best_match, resolve_by_ancestry};

use crate::history::{ReviewEntry, factors_for, ratings_for};

/// Host-side deck identifier.
pub type DeckId = i64;
/// Host-side item identifier.
pub type ItemId = i64;

/// What the adapter needs from the host application.
///
/// Implementations are expected to be cheap lookups into the host's own
/// storage; the adapter never caches across calls.
pub trait ReviewHost {
    /// Full `"::"`-separated name of a deck, if it exists.
    fn deck_name(&self, deck: DeckId) -> Option<String>;

    /// Ordered review log for an item, oldest first.
    fn review_log(&self, item: ItemId) -> Vec<ReviewEntry>;

    /// The deck's scheduler-configured starting ease factor, if any.
    fn starting_ease(&self, deck: DeckId) -> Option<u32>;

    /// All items of a deck, for bulk recalculation.
    fn deck_items(&self, deck: DeckId) -> Vec<ItemId>;

    /// Every deck the host knows, for collection-wide recalculation.
    fn all_decks(&self) -> Vec<DeckId>;
}

/// Resolve the effective configuration for a deck, filling
/// `starting_ease_factor` from the host's deck defaults when the document
/// does not set a starting ease itself.
///
/// # Errors
/// Returns a validation error when the merged configuration is degenerate.
pub fn resolve_for<H: ReviewHost>(host: &H, raw: &RawConfig, deck: DeckId) -> Result<EaseConfig> {
    let name = host.deck_name(deck).unwrap_or_default();
    let mut config = resolve_by_ancestry(raw, &name)?;
    if config.starting_ease_factor.is_none() {
        config.starting_ease_factor = config.starting_ease.or_else(|| host.starting_ease(deck));
    }
    Ok(config)
}

/// Suggested new factor for an item.
///
/// `pending_answer` is the rating the user is about to give — appended to
/// the history for what-if computation before the answer is committed. When
/// recalculating *without* a pending answer, the latest recorded factor is
/// dropped so the factor a previous adjustment just wrote does not feed its
/// own baseline.
///
/// # Errors
/// Propagates configuration-validation failures from resolution.
pub fn suggested_factor<H: ReviewHost>(
    host: &H,
    raw: &RawConfig,
    deck: DeckId,
    item: ItemId,
    pending_answer: Option<u32>,
    leashed: bool,
) -> Result<u32> {
    let config = resolve_for(host, raw, deck)?;
    let log = host.review_log(item);
    let mut ratings = ratings_for(&log, config.reviews_only);
    let mut factors = factors_for(&log, config.reviews_only);

    if let Some(answer) = pending_answer {
        ratings.push(answer);
    } else if factors.len() > 1 {
        factors.pop();
    }

    let factor = calculate_ease(&config, &ratings, &factors, leashed);
    debug!(item, factor, leashed, "suggested factor");
    Ok(factor)
}

/// Per-answer adjustment: the factor the host should store for the item, or
/// `None` when the configuration says to leave it untouched (tuner disabled
/// for this deck, or a non-review answer under `reviews_only`).
///
/// # Errors
/// Propagates configuration-validation failures from resolution.
pub fn adjust_item<H: ReviewHost>(
    host: &H,
    raw: &RawConfig,
    deck: DeckId,
    item: ItemId,
    answer: u32,
    in_review_queue: bool,
) -> Result<Option<u32>> {
    let config = resolve_for(host, raw, deck)?;
    if !config.enabled || (config.reviews_only && !in_review_queue) {
        debug!(item, enabled = config.enabled, "leaving factor unchanged");
        return Ok(None);
    }
    let factor = suggested_factor(host, raw, deck, item, Some(answer), true)?;
    info!(item, factor, "adjusted ease factor");
    Ok(Some(factor))
}

/// Recalculate every item of a deck, returning `(item, factor)` pairs for
/// the host to persist. Decks where the tuner is disabled yield an empty
/// list.
///
/// # Errors
/// Propagates configuration-validation failures from resolution.
pub fn adjust_deck<H: ReviewHost>(
    host: &H,
    raw: &RawConfig,
    deck: DeckId,
) -> Result<Vec<(ItemId, u32)>> {
    let config = resolve_for(host, raw, deck)?;
    if !config.enabled {
        return Ok(Vec::new());
    }
    let items = host.deck_items(deck);
    info!(deck, count = items.len(), "bulk ease recalculation");

    let mut adjusted = Vec::with_capacity(items.len());
    for item in items {
        let factor = suggested_factor(host, raw, deck, item, None, true)?;
        adjusted.push((item, factor));
    }
    Ok(adjusted)
}

/// Recalculate every deck in the collection, returning `(item, factor)`
/// pairs for the host to persist. Each deck resolves its own configuration,
/// so decks where the tuner is disabled are skipped.
///
/// # Errors
/// Propagates configuration-validation failures from resolution.
pub fn adjust_all_decks<H: ReviewHost>(host: &H, raw: &RawConfig) -> Result<Vec<(ItemId, u32)>> {
    let decks = host.all_decks();
    info!(count = decks.len(), "collection-wide ease recalculation");

    let mut adjusted = Vec::new();
    for deck in decks {
        adjusted.extend(adjust_deck(host, raw, deck)?);
    }
    Ok(adjusted)
}

/// Diagnostic report for one item, labeled with the nearest configured
/// settings name.
///
/// # Errors
/// Propagates configuration-validation failures from resolution.
pub fn item_report<H: ReviewHost>(
    host: &H,
    raw: &RawConfig,
    deck: DeckId,
    item: ItemId,
    state: &str,
    in_review_queue: bool,
    pending_answer: Option<u32>,
) -> Result<String> {
    let config = resolve_for(host, raw, deck)?;
    let deck_name = host.deck_name(deck).unwrap_or_default();
    let matched = best_match(&deck_name, raw.deck_settings.keys().map(String::as_str));

    let log = host.review_log(item);
    let mut ratings = ratings_for(&log, config.reviews_only);
    if let Some(answer) = pending_answer {
        ratings.push(answer);
    }
    let factors = factors_for(&log, config.reviews_only);

    let snapshot = ItemSnapshot {
        item_id: item,
        state,
        in_review_queue,
        ratings: &ratings,
        factors: &factors,
    };
    Ok(describe(&config, &snapshot, matched))
}
