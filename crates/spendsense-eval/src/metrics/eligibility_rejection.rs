//! Eligibility-rejection rate (spec §4.9, §4.6 layer 2): share of
//! candidate items rejected by the guardrail stack's eligibility filter
//! specifically (`rule == "eligibility"`), out of all candidates offered.

use serde::{Deserialize, Serialize};
use spendsense_core::DecisionTrace;

const ELIGIBILITY_RULE: &str = "eligibility";

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EligibilityRejectionRate {
    pub candidates_evaluated: usize,
    pub eligibility_rejections: usize,
    pub rejection_rate: f64,
}

pub fn compute(traces: &[DecisionTrace]) -> EligibilityRejectionRate {
    let candidates_evaluated: usize = traces.iter().map(|t| t.candidate_items.len()).sum();
    let eligibility_rejections: usize = traces
        .iter()
        .flat_map(|t| t.filtered_items.iter())
        .filter(|f| f.rule == ELIGIBILITY_RULE)
        .count();

    let rejection_rate = if candidates_evaluated == 0 {
        0.0
    } else {
        eligibility_rejections as f64 / candidates_evaluated as f64
    };

    EligibilityRejectionRate {
        candidates_evaluated,
        eligibility_rejections,
        rejection_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spendsense_core::{
        ConsentScope, ConsentSnapshot, ConsentStatus, FilteredItem, ItemKind, ItemRef,
        PersonaAssignment, PersonaCandidate, PersonaType, SignalBundle,
        WindowedPersonaAssignments, WindowedSignalBundles,
    };
    use std::collections::HashMap;

    fn assignment() -> PersonaAssignment {
        PersonaAssignment {
            customer_id: "cust".into(),
            window_days: 180,
            primary: PersonaCandidate {
                persona_type: PersonaType::SavingsBuilder,
                confidence: 1.0,
                triggering_signals: vec![],
            },
            secondary: None,
            candidates: vec![],
            assigned_at: Utc::now(),
            default_assignment: true,
        }
    }

    fn trace(candidate_count: usize, filtered: Vec<FilteredItem>) -> DecisionTrace {
        let candidate_items = (0..candidate_count)
            .map(|i| ItemRef {
                id: format!("item_{i}"),
                persona: PersonaType::SavingsBuilder,
                kind: ItemKind::Offer,
            })
            .collect();
        DecisionTrace {
            trace_id: "trc".into(),
            customer_id: "cust".into(),
            timestamp: Utc::now(),
            windows_analyzed: vec![30, 180],
            signal_bundles: WindowedSignalBundles {
                d30: SignalBundle::empty(30),
                d180: SignalBundle::empty(180),
            },
            persona_assignments: WindowedPersonaAssignments {
                d30: assignment(),
                d180: assignment(),
            },
            candidate_items,
            filtered_items: filtered,
            final_education: vec![],
            final_offers: vec![],
            rationales: HashMap::new(),
            counterfactuals: vec![],
            consent_snapshot: ConsentSnapshot {
                status: ConsentStatus::Active,
                scope: ConsentScope::Recommendations,
            },
            operator_action: None,
            disclaimer_text: String::new(),
            incomplete: false,
        }
    }

    #[test]
    fn no_rejections_gives_zero_rate() {
        let traces = vec![trace(3, vec![])];
        let rate = compute(&traces);
        assert_eq!(rate.rejection_rate, 0.0);
    }

    #[test]
    fn counts_only_eligibility_rule_rejections() {
        let filtered = vec![
            FilteredItem {
                item: ItemRef {
                    id: "item_0".into(),
                    persona: PersonaType::SavingsBuilder,
                    kind: ItemKind::Offer,
                },
                rule: "eligibility".into(),
                reason: "ineligible:income".into(),
            },
            FilteredItem {
                item: ItemRef {
                    id: "item_1".into(),
                    persona: PersonaType::SavingsBuilder,
                    kind: ItemKind::Offer,
                },
                rule: "harm".into(),
                reason: "harm_blacklist".into(),
            },
        ];
        let traces = vec![trace(4, filtered)];
        let rate = compute(&traces);
        assert_eq!(rate.candidates_evaluated, 4);
        assert_eq!(rate.eligibility_rejections, 1);
        assert_eq!(rate.rejection_rate, 0.25);
    }
}
