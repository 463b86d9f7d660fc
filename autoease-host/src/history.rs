//! Review-history shaping.
//!
//! The host application owns review-log storage. This module turns its raw
//! log for one item into the rating and factor sequences the engine
//! consumes, honoring the `reviews_only` option.

use serde::{Deserialize, Serialize};

/// Kind of review event, mirroring the scheduler's four log types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReviewKind {
    /// First presentation of a new item.
    New,
    /// Learning step before graduation.
    Learning,
    /// A scheduled review.
    Review,
    /// Relearning step after a lapse.
    Relearning,
}

/// One recorded review event for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// Event kind.
    pub kind: ReviewKind,
    /// 4-valued outcome rating; anything above the lowest rating counts as
    /// a successful recall.
    pub rating: u32,
    /// Ease factor recorded with the event, or 0 when the event produced
    /// none (e.g. the first-ever presentation).
    pub factor: u32,
}

impl ReviewEntry {
    /// Convenience constructor.
    #[must_use]
    pub fn new(kind: ReviewKind, rating: u32, factor: u32) -> Self {
        Self {
            kind,
            rating,
            factor,
        }
    }
}

/// Outcome ratings for the engine, oldest first.
///
/// With `reviews_only` set, only [`ReviewKind::Review`] events contribute.
#[must_use]
pub fn ratings_for(log: &[ReviewEntry], reviews_only: bool) -> Vec<u32> {
    log.iter()
        .filter(|entry| !reviews_only || entry.kind == ReviewKind::Review)
        .map(|entry| entry.rating)
        .collect()
}

/// Positive recorded factors for the engine, oldest first. Zero factors are
/// dropped, and with `reviews_only` set non-review events are excluded the
/// same way as their ratings.
#[must_use]
pub fn factors_for(log: &[ReviewEntry], reviews_only: bool) -> Vec<u32> {
    log.iter()
        .filter(|entry| !reviews_only || entry.kind == ReviewKind::Review)
        .filter(|entry| entry.factor > 0)
        .map(|entry| entry.factor)
        .collect()
}
