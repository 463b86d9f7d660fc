//! # autoease Host Adapter
//!
//! Thin adapter between a host application (the program that owns review
//! storage, deck metadata, and UI) and the `autoease-core` engine. The host
//! implements [`ReviewHost`]; this crate shapes its review log into engine
//! inputs and runs the adjustment flows the host triggers:
//!
//! - per-answer adjustment (with what-if computation before the answer is
//!   committed),
//! - whole-deck and collection-wide bulk recalculation,
//! - the diagnostic report shown after a review.
//!
//! Nothing here performs I/O — every flow is a pure pipeline over the
//! trait, so hosts can call it from whatever thread answers reviews.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod adjust;
pub mod history;

pub use adjust::{
    DeckId, ItemId, ReviewHost, adjust_all_decks, adjust_deck, adjust_item, item_report,
    resolve_for, suggested_factor,
};
pub use history::{ReviewEntry, ReviewKind, factors_for, ratings_for};
