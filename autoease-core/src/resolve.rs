//! Deck-tree configuration resolution.
//!
//! Decks are named with a path convention: `"::"` separates a child from its
//! ancestor chain, so `"Language::French::Verbs"` sits below
//! `"Language::French"` which sits below `"Language"`. The override tree in
//! [`RawConfig::deck_settings`] keys fragments by such names — not
//! necessarily names of decks that exist — and resolution walks the chain
//! from the root outward, letting more specific ancestors override more
//! general ones. Siblings and unrelated decks never contribute.
//!
//! Two resolution modes are provided. [`resolve_by_ancestry`] (the cascade)
//! is the authoritative one for factor computation; [`resolve_by_best_match`]
//! applies only the single nearest configured name and exists as the simpler
//! mode, with [`best_match`] also supplying the "using settings from …"
//! label in diagnostic reports.

use tracing::debug;

use crate::config::{EaseConfig, RawConfig};
use crate::error::Result;

/// Path separator between a deck and its ancestors.
pub const PATH_SEPARATOR: &str = "::";

/// All ancestor-chain prefixes of `path`, root-first, including `path`
/// itself.
///
/// `"A::B::C"` yields `["A", "A::B", "A::B::C"]`.
#[must_use]
pub fn ancestor_chain(path: &str) -> Vec<String> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    (1..=segments.len())
        .map(|depth| segments[..depth].join(PATH_SEPARATOR))
        .collect()
}

/// The longest configured key that is exactly `candidate` or one of its
/// ancestor-path prefixes, or `None` when no key is related to `candidate`.
pub fn best_match<'a, I>(candidate: &str, keys: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let chain = ancestor_chain(candidate);
    keys.into_iter()
        .filter(|&key| chain.iter().any(|prefix| prefix.as_str() == key))
        .max_by_key(|key| key.len())
}

/// Resolve the effective configuration for a deck via the ancestor cascade.
///
/// Starting from defaults merged with the document's top-level scalars, the
/// ancestor chain is walked root-first and every fragment keyed by an exact
/// chain name is shallow-merged over the accumulated configuration. Decks
/// with no configured ancestors resolve to the base configuration — an
/// unknown name is never an error.
///
/// # Errors
/// Returns [`crate::EaseError::Config`] when the merged result fails
/// numeric validation.
pub fn resolve_by_ancestry(raw: &RawConfig, deck: &str) -> Result<EaseConfig> {
    let mut config = EaseConfig::default();
    config.apply(&raw.global);
    for name in ancestor_chain(deck) {
        if let Some(fragment) = raw.deck_settings.get(&name) {
            debug!(deck = %name, "applying deck override");
            config.apply(fragment);
        }
    }
    config.validate()?;
    Ok(config)
}

/// Resolve the effective configuration for a deck via single best-name
/// match: only the fragment of the nearest configured ancestor (or exact
/// name) is applied over the base configuration.
///
/// # Errors
/// Returns [`crate::EaseError::Config`] when the merged result fails
/// numeric validation.
pub fn resolve_by_best_match(raw: &RawConfig, deck: &str) -> Result<EaseConfig> {
    let mut config = EaseConfig::default();
    config.apply(&raw.global);
    if let Some(name) = best_match(deck, raw.deck_settings.keys().map(String::as_str)) {
        debug!(deck = %name, "applying best-match override");
        if let Some(fragment) = raw.deck_settings.get(name) {
            config.apply(fragment);
        }
    }
    config.validate()?;
    Ok(config)
}
