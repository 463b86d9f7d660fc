//! Configuration model for the ease tuner.
//!
//! The persisted document is a single JSON object: scalar options at the top
//! level, plus a `deck_settings` map from deck name to a partial override
//! fragment. Deck names use the `"::"` path convention described in
//! [`crate::resolve`], so a fragment attached to an ancestor cascades to
//! every deck below it.
//!
//! Shape problems in the document are recovered locally by defaulting — a
//! fragment that fails to deserialize is treated as empty. Only degenerate
//! *numeric* configuration (e.g. `min_ease > max_ease`) is rejected, and
//! only at resolution time via [`EaseConfig::validate`].

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EaseError, Result};

/// Final fallback baseline when neither history nor configuration provides a
/// starting factor. Permille, so 2500 = 250%.
pub const DEFAULT_STARTING_EASE: u32 = 2500;

/// Fully resolved configuration. Every recognized option is populated, so
/// the engine never has to fall back to a default mid-computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EaseConfig {
    /// Master switch; when false the host must leave factors untouched.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Desired long-run success rate.
    #[serde(default = "default_target_ratio")]
    pub target_ratio: f64,
    /// Smoothing weight for the exponential moving average; higher values
    /// make the tuner more reactive to recent reviews.
    #[serde(default = "default_weight")]
    pub moving_average_weight: f64,
    /// Lower clamp on any suggested factor.
    #[serde(default = "default_min_ease")]
    pub min_ease: u32,
    /// Upper clamp on any suggested factor.
    #[serde(default = "default_max_ease")]
    pub max_ease: u32,
    /// Max absolute deviation of a suggested factor from the smoothed
    /// factor baseline, per adjustment.
    #[serde(default = "default_leash")]
    pub leash: u32,
    /// When true, only review-type events feed the computation.
    #[serde(default)]
    pub reviews_only: bool,
    /// Explicit override for the no-history baseline.
    #[serde(default)]
    pub starting_ease: Option<u32>,
    /// Baseline actually used when an item has no factor history. Filled by
    /// the caller from the deck's scheduler defaults when `starting_ease`
    /// is absent.
    #[serde(default)]
    pub starting_ease_factor: Option<u32>,
    /// Whether the host should surface the diagnostic report after answers.
    #[serde(default)]
    pub stats_enabled: bool,
    /// How long the host should display the report, in milliseconds.
    #[serde(default = "default_stats_duration")]
    pub stats_duration: u32,
    /// Emit the shortened report variant.
    #[serde(default)]
    pub stats_brief: bool,
    /// Two-button answer layout. Recognized and cascaded for the host's UI
    /// layer; the core attaches no behavior to it.
    #[serde(default = "default_true")]
    pub two_button_mode: bool,
}

impl Default for EaseConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_ratio: 0.85,
            moving_average_weight: 0.2,
            min_ease: 1000,
            max_ease: 5000,
            leash: 100,
            reviews_only: false,
            starting_ease: None,
            starting_ease_factor: None,
            stats_enabled: false,
            stats_duration: 5000,
            stats_brief: false,
            two_button_mode: true,
        }
    }
}

impl EaseConfig {
    /// Shallow-merge an override fragment: every option the fragment states
    /// replaces the accumulated value, unset options are untouched.
    pub fn apply(&mut self, fragment: &ConfigFragment) {
        if let Some(v) = fragment.enabled {
            self.enabled = v;
        }
        if let Some(v) = fragment.target_ratio {
            self.target_ratio = v;
        }
        if let Some(v) = fragment.moving_average_weight {
            self.moving_average_weight = v;
        }
        if let Some(v) = fragment.min_ease {
            self.min_ease = v;
        }
        if let Some(v) = fragment.max_ease {
            self.max_ease = v;
        }
        if let Some(v) = fragment.leash {
            self.leash = v;
        }
        if let Some(v) = fragment.reviews_only {
            self.reviews_only = v;
        }
        if let Some(v) = fragment.starting_ease {
            self.starting_ease = Some(v);
        }
        if let Some(v) = fragment.starting_ease_factor {
            self.starting_ease_factor = Some(v);
        }
        if let Some(v) = fragment.stats_enabled {
            self.stats_enabled = v;
        }
        if let Some(v) = fragment.stats_duration {
            self.stats_duration = v;
        }
        if let Some(v) = fragment.stats_brief {
            self.stats_brief = v;
        }
        if let Some(v) = fragment.two_button_mode {
            self.two_button_mode = v;
        }
    }

    /// Reject degenerate numeric configuration.
    ///
    /// The bounds: `min_ease <= max_ease`, `moving_average_weight` in
    /// `(0, 1]`, `target_ratio` strictly between 0 and 1 (the adjustment
    /// step divides by `ln(success_rate)` relative to `ln(target_ratio)`,
    /// which degenerates at the endpoints).
    ///
    /// # Errors
    /// Returns [`EaseError::Config`] describing the first violated bound.
    pub fn validate(&self) -> Result<()> {
        if self.min_ease > self.max_ease {
            return Err(EaseError::Config(format!(
                "min_ease ({}) exceeds max_ease ({})",
                self.min_ease, self.max_ease
            )));
        }
        if !(self.moving_average_weight > 0.0 && self.moving_average_weight <= 1.0) {
            return Err(EaseError::Config(format!(
                "moving_average_weight ({}) must be in (0, 1]",
                self.moving_average_weight
            )));
        }
        if !(self.target_ratio > 0.0 && self.target_ratio < 1.0) {
            return Err(EaseError::Config(format!(
                "target_ratio ({}) must be strictly between 0 and 1",
                self.target_ratio
            )));
        }
        Ok(())
    }
}

/// A partial configuration: one override fragment from the raw document.
///
/// Every field is optional; unset fields leave the accumulated value alone
/// when the fragment is applied. Unknown keys in the document are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFragment {
    /// Override for [`EaseConfig::enabled`].
    pub enabled: Option<bool>,
    /// Override for [`EaseConfig::target_ratio`].
    pub target_ratio: Option<f64>,
    /// Override for [`EaseConfig::moving_average_weight`].
    pub moving_average_weight: Option<f64>,
    /// Override for [`EaseConfig::min_ease`].
    pub min_ease: Option<u32>,
    /// Override for [`EaseConfig::max_ease`].
    pub max_ease: Option<u32>,
    /// Override for [`EaseConfig::leash`].
    pub leash: Option<u32>,
    /// Override for [`EaseConfig::reviews_only`].
    pub reviews_only: Option<bool>,
    /// Override for [`EaseConfig::starting_ease`].
    pub starting_ease: Option<u32>,
    /// Override for [`EaseConfig::starting_ease_factor`].
    pub starting_ease_factor: Option<u32>,
    /// Override for [`EaseConfig::stats_enabled`].
    pub stats_enabled: Option<bool>,
    /// Override for [`EaseConfig::stats_duration`].
    pub stats_duration: Option<u32>,
    /// Override for [`EaseConfig::stats_brief`].
    pub stats_brief: Option<bool>,
    /// Override for [`EaseConfig::two_button_mode`].
    pub two_button_mode: Option<bool>,
}

/// The raw configuration document before resolution: global scalar options
/// plus the per-deck override tree.
#[derive(Debug, Clone, Default)]
pub struct RawConfig {
    /// Top-level scalar overrides, applied before any deck fragment.
    pub global: ConfigFragment,
    /// Per-deck override fragments, keyed by deck name.
    pub deck_settings: HashMap<String, ConfigFragment>,
}

impl RawConfig {
    /// Build from an already-parsed JSON document.
    ///
    /// Shape problems are recovered locally: a `deck_settings` entry (or
    /// the top level) that fails to deserialize becomes the empty fragment.
    #[must_use]
    pub fn from_value(doc: &Value) -> Self {
        let global = fragment_of(doc);
        let mut deck_settings = HashMap::new();
        if let Some(map) = doc.get("deck_settings").and_then(Value::as_object) {
            for (name, fragment) in map {
                deck_settings.insert(name.clone(), fragment_of(fragment));
            }
        }
        Self {
            global,
            deck_settings,
        }
    }

    /// Parse a raw configuration document from a JSON string.
    ///
    /// # Errors
    /// Returns [`EaseError::Parse`] if the string is not valid JSON at all;
    /// shape problems inside a valid document never fail.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Value =
            serde_json::from_str(json).map_err(|e| EaseError::Parse(e.to_string()))?;
        Ok(Self::from_value(&doc))
    }

    /// Load a raw configuration document from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

fn fragment_of(value: &Value) -> ConfigFragment {
    serde_json::from_value(value.clone()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}
fn default_target_ratio() -> f64 {
    0.85
}
fn default_weight() -> f64 {
    0.2
}
fn default_min_ease() -> u32 {
    1000
}
fn default_max_ease() -> u32 {
    5000
}
fn default_leash() -> u32 {
    100
}
fn default_stats_duration() -> u32 {
    5000
}
