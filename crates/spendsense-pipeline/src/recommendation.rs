//! The operator-facing result of one `generate_recommendations` call
//! (spec §6 "pipeline output").

use spendsense_core::{Counterfactual, ItemRef, PersonaAssignment, Rationale};
use std::collections::HashMap;

/// Everything a caller needs to render or audit one customer's run,
/// without going back to the trace store.
#[derive(Debug, Clone)]
pub struct RecommendationResult {
    pub customer_id: String,
    pub persona_30d: PersonaAssignment,
    pub persona_180d: PersonaAssignment,
    pub education: Vec<ItemRef>,
    pub offers: Vec<ItemRef>,
    pub rationales: HashMap<String, Rationale>,
    pub counterfactuals: Vec<Counterfactual>,
    pub trace_id: String,
    pub disclaimer: String,
    /// Set when the run was cancelled mid-flight and the trace reflects a
    /// partial, best-effort snapshot rather than a full C1-C8 pass.
    pub incomplete: bool,
}
