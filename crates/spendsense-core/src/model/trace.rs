//! `DecisionTrace` — the immutable audit record (spec §3, §4.8).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::catalog_item::ItemRef;
use crate::model::consent::Consent;
use crate::model::persona::PersonaAssignment;
use crate::model::signal_bundle::SignalBundle;

/// A structural citation into a `SignalBundle`: the concrete data value a
/// rationale sentence is grounded on (spec §4.5, §8 invariant 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub field_path: String,
    pub value: String,
}

/// The rendered rationale for one recommended item plus its citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rationale {
    pub text: String,
    pub citations: Vec<Citation>,
    /// True if the deterministic template was used because the LLM
    /// collaborator was unavailable, timed out, or failed validation
    /// (spec §4.5, §7).
    pub used_fallback_template: bool,
}

/// Why a candidate item was rejected by the guardrail stack (spec §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredItem {
    pub item: ItemRef,
    pub rule: String,
    pub reason: String,
}

/// A closed-form "what-if" scenario (spec §4.7), referenced here by its
/// rendered fields; the generator that produces these lives in
/// `spendsense-counterfactual`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Counterfactual {
    pub scenario_id: String,
    pub headline: String,
    pub impact_metric: String,
    pub time_horizon: String,
    pub assumption_set: Vec<String>,
    pub confidence: ConfidenceLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

/// Snapshot of consent state at the moment C1 ran, recorded verbatim in
/// the trace so a consent change mid-run never retroactively changes what
/// the trace says happened (spec §8 scenario 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentSnapshot {
    pub status: crate::model::consent::ConsentStatus,
    pub scope: crate::model::consent::ConsentScope,
}

impl From<&Consent> for ConsentSnapshot {
    fn from(consent: &Consent) -> Self {
        Self {
            status: consent.status,
            scope: consent.scope,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideAction {
    Approve,
    Reject,
    Flag,
    Replace,
}

/// An operator override of a prior trace; logged as a new record that
/// references the original `trace_id` (spec §4.8, §9).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorAction {
    pub override_id: String,
    pub trace_id: String,
    pub operator_id: String,
    pub action: OverrideAction,
    pub reason: String,
    pub replacement: Option<ItemRef>,
    pub at: DateTime<Utc>,
}

/// Both canonical windows' worth of signal bundles and persona
/// assignments, keyed the way spec §3 describes (`{30d, 180d}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowedSignalBundles {
    #[serde(rename = "30d")]
    pub d30: SignalBundle,
    #[serde(rename = "180d")]
    pub d180: SignalBundle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowedPersonaAssignments {
    #[serde(rename = "30d")]
    pub d30: PersonaAssignment,
    #[serde(rename = "180d")]
    pub d180: PersonaAssignment,
}

/// The immutable, append-only decision trace (spec §3, §4.8, §6).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTrace {
    pub trace_id: String,
    pub customer_id: String,
    pub timestamp: DateTime<Utc>,
    pub windows_analyzed: Vec<u32>,
    pub signal_bundles: WindowedSignalBundles,
    pub persona_assignments: WindowedPersonaAssignments,
    pub candidate_items: Vec<ItemRef>,
    pub filtered_items: Vec<FilteredItem>,
    pub final_education: Vec<ItemRef>,
    pub final_offers: Vec<ItemRef>,
    pub rationales: HashMap<String, Rationale>,
    pub counterfactuals: Vec<Counterfactual>,
    pub consent_snapshot: ConsentSnapshot,
    pub operator_action: Option<OperatorAction>,
    pub disclaimer_text: String,
    /// Set when the run aborted after C8 had already flushed a partial
    /// trace (spec §5 cancellation, §6).
    #[serde(default)]
    pub incomplete: bool,
}
