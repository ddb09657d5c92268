//! # spendsense-guardrails
//!
//! The five-layer guardrail stack (C6, spec §4.6): consent gate,
//! eligibility filter, harm filter, tone validator, disclaimer affixer.
//! Layers 2-4 run per candidate and either pass it through or reject it
//! with a reason recorded for the trace; layer 5 always runs on survivors.
//! The consent gate (layer 1) is exposed separately in `consent` because it
//! decides whether the rest of the pipeline runs at all, not just whether
//! one candidate survives.

mod candidate;
mod consent;
mod disclaimer;
mod eligibility;
mod harm;
mod selection;
mod tone;

pub use candidate::Candidate;
pub use consent::{consent_allows_recommendations, CONSENT_MISSING_REASON};
pub use disclaimer::DISCLAIMER_TEXT;

use spendsense_catalog::{CustomerContext, SelectionCaps};
use spendsense_core::{FilteredItem, Rationale};
use std::collections::HashMap;

/// The result of running layers 2-5 over a candidate set.
pub struct GuardrailOutcome {
    pub final_education: Vec<spendsense_core::ItemRef>,
    pub final_offers: Vec<spendsense_core::ItemRef>,
    pub rationales: HashMap<String, Rationale>,
    pub filtered_items: Vec<FilteredItem>,
}

/// Run eligibility, harm, and tone filters over every candidate, affix the
/// disclaimer to survivors, then apply the final selection cap and
/// ordering (spec §4.6). Assumes the caller has already checked
/// `consent_allows_recommendations`; this never re-checks consent.
pub fn apply_guardrails(candidates: Vec<Candidate>, ctx: &CustomerContext, caps: &SelectionCaps) -> GuardrailOutcome {
    let mut filtered_items = Vec::new();
    let mut survivors = Vec::new();

    for mut candidate in candidates {
        if let Err(reason) = eligibility::check(&candidate, ctx) {
            filtered_items.push(FilteredItem {
                item: candidate.item_ref.clone(),
                rule: "eligibility".to_string(),
                reason,
            });
            continue;
        }
        if let Err(reason) = harm::check(&candidate) {
            filtered_items.push(FilteredItem {
                item: candidate.item_ref.clone(),
                rule: "harm".to_string(),
                reason,
            });
            continue;
        }
        if let Err(reason) = tone::check(&candidate) {
            filtered_items.push(FilteredItem {
                item: candidate.item_ref.clone(),
                rule: "tone".to_string(),
                reason,
            });
            continue;
        }
        candidate.rationale.text = disclaimer::affix(&candidate.rationale.text);
        survivors.push(candidate);
    }

    let (education, offers) = selection::select(survivors, caps.max_education_items, caps.max_offer_items);

    let mut rationales = HashMap::new();
    let mut final_education = Vec::new();
    for candidate in education {
        final_education.push(candidate.item_ref.clone());
        rationales.insert(candidate.item_ref.id.clone(), candidate.rationale);
    }
    let mut final_offers = Vec::new();
    for candidate in offers {
        final_offers.push(candidate.item_ref.clone());
        rationales.insert(candidate.item_ref.id.clone(), candidate.rationale);
    }

    GuardrailOutcome {
        final_education,
        final_offers,
        rationales,
        filtered_items,
    }
}
