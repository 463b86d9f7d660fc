//! # autoease Core Library
//!
//! Adaptive ease-factor tuning for spaced-repetition schedulers.
//!
//! A scheduler's per-item "ease factor" controls how fast review intervals
//! grow. This crate adjusts that factor from evidence: a moving average of
//! the item's recent recall success is compared against a configured target
//! rate, and the factor is nudged toward the value that would put the item
//! on target — bounded by a "leash" around its smoothed history so no
//! single review causes a large swing.
//!
//! Two independent components, composed only by the caller:
//!
//! - [`resolve`] — merges a global default configuration with a tree of
//!   per-deck overrides (`"Language::French::Verbs"` inherits from
//!   `"Language::French"` and `"Language"`), with fuzzy longest-prefix
//!   fallback when no exact name is configured.
//! - [`engine`] — computes the smoothed success rate, the smoothed factor
//!   baseline, and the new bounded factor; [`report`] renders the matching
//!   diagnostic summary.
//!
//! Everything is a pure, allocation-light computation over its inputs —
//! safe to call concurrently and repeatedly. The host application owns
//! review-history storage and UI; see the `autoease-host` crate for the
//! adapter seam.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod resolve;

pub use config::{ConfigFragment, DEFAULT_STARTING_EASE, EaseConfig, RawConfig};
pub use engine::{calculate_ease, factor_baseline, moving_average, success_rate};
pub use error::{EaseError, Result};
pub use report::{ItemSnapshot, describe};
pub use resolve::{best_match, resolve_by_ancestry, resolve_by_best_match};
