//! Pipeline tuning configuration (spec SPEC_FULL.md §10.4).
//!
//! Follows the teacher's schema/validation split: this module defines the
//! struct tree with serde defaults; `validation.rs` is the pure function run
//! once at load time that rejects a bad value rather than silently
//! correcting it.

use serde::{Deserialize, Serialize};
use spendsense_core::PersonaType;

fn default_amount_cv_cutoff() -> f64 {
    0.15
}

fn default_subscription_lookback_days() -> u32 {
    90
}

fn default_utilization_tiers() -> [f64; 3] {
    [0.30, 0.50, 0.80]
}

fn default_persona_priority() -> Vec<PersonaType> {
    PersonaType::priority_order().to_vec()
}

fn default_min_education_items() -> usize {
    3
}

fn default_max_education_items() -> usize {
    5
}

fn default_min_offer_items() -> usize {
    1
}

fn default_max_offer_items() -> usize {
    3
}

fn default_llm_enabled() -> bool {
    false
}

fn default_llm_timeout_ms() -> u64 {
    2_000
}

/// Detector threshold knobs (spec §4.2). Defaults match the constants
/// already baked into `spendsense-signals`; this struct exists so an
/// operator can retune without a recompile, not so detectors read it
/// directly today (see DESIGN.md for the wiring status).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorThresholds {
    #[serde(default = "default_amount_cv_cutoff")]
    pub subscription_amount_cv_cutoff: f64,
    #[serde(default = "default_subscription_lookback_days")]
    pub subscription_lookback_days: u32,
    #[serde(default = "default_utilization_tiers")]
    pub utilization_tiers: [f64; 3],
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            subscription_amount_cv_cutoff: default_amount_cv_cutoff(),
            subscription_lookback_days: default_subscription_lookback_days(),
            utilization_tiers: default_utilization_tiers(),
        }
    }
}

/// Selection caps applied by the guardrail stack's final cap layer (spec
/// §4.6): 3-5 education items, 1-3 offers, per persona assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionCaps {
    #[serde(default = "default_min_education_items")]
    pub min_education_items: usize,
    #[serde(default = "default_max_education_items")]
    pub max_education_items: usize,
    #[serde(default = "default_min_offer_items")]
    pub min_offer_items: usize,
    #[serde(default = "default_max_offer_items")]
    pub max_offer_items: usize,
}

impl Default for SelectionCaps {
    fn default() -> Self {
        Self {
            min_education_items: default_min_education_items(),
            max_education_items: default_max_education_items(),
            min_offer_items: default_min_offer_items(),
            max_offer_items: default_max_offer_items(),
        }
    }
}

/// The optional LLM collaborator (spec §4.5) used to vary rationale prose;
/// always falls back to the deterministic template on timeout or error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_enabled")]
    pub enabled: bool,
    #[serde(default = "default_llm_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_llm_enabled(),
            timeout_ms: default_llm_timeout_ms(),
        }
    }
}

/// Where to load the content/offer catalog and (if separately maintained)
/// an external harm blacklist from. `None` means use the in-process
/// built-in default catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSource {
    pub catalog_path: Option<String>,
}

/// The full pipeline configuration (SPEC_FULL.md §10.4). Loaded once at
/// startup, validated, then held immutably for the life of the process
/// alongside the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendSenseConfig {
    #[serde(default)]
    pub detector_thresholds: DetectorThresholds,
    /// Defaults to spec §4.3's fixed order but is data: ops can reorder
    /// conflict resolution without a recompile. Must remain a permutation
    /// of all five `PersonaType` variants; `validate` rejects anything
    /// else.
    #[serde(default = "default_persona_priority")]
    pub persona_priority: Vec<PersonaType>,
    #[serde(default)]
    pub selection_caps: SelectionCaps,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub catalog_source: CatalogSource,
}

impl Default for SpendSenseConfig {
    fn default() -> Self {
        Self {
            detector_thresholds: DetectorThresholds::default(),
            persona_priority: default_persona_priority(),
            selection_caps: SelectionCaps::default(),
            llm: LlmConfig::default(),
            catalog_source: CatalogSource::default(),
        }
    }
}
