//! Persona coverage: share of customers whose primary persona assignment
//! on the given window is not the default Savings Builder fallback
//! (spec §4.9, §4.3 `default_assignment`).

use serde::{Deserialize, Serialize};
use spendsense_core::DecisionTrace;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PersonaCoverage {
    pub customers_evaluated: usize,
    pub non_default_count: usize,
    pub coverage_ratio: f64,
}

/// `window_days` selects which of the two windowed assignments to read
/// (30 or 180); traces that don't carry that window are skipped.
pub fn compute(traces: &[DecisionTrace], window_days: u32) -> PersonaCoverage {
    let assignments: Vec<_> = traces
        .iter()
        .filter_map(|t| match window_days {
            30 => Some(&t.persona_assignments.d30),
            180 => Some(&t.persona_assignments.d180),
            _ => None,
        })
        .collect();

    let customers_evaluated = assignments.len();
    let non_default_count = assignments
        .iter()
        .filter(|a| !a.default_assignment)
        .count();
    let coverage_ratio = if customers_evaluated == 0 {
        0.0
    } else {
        non_default_count as f64 / customers_evaluated as f64
    };

    PersonaCoverage {
        customers_evaluated,
        non_default_count,
        coverage_ratio,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsense_core::{PersonaAssignment, PersonaCandidate, PersonaType, WindowedPersonaAssignments, WindowedSignalBundles, SignalBundle, ConsentSnapshot, ConsentStatus, ConsentScope};
    use std::collections::HashMap;
    use chrono::Utc;

    fn trace_with_default(default_assignment: bool) -> DecisionTrace {
        let now = Utc::now();
        let assignment = PersonaAssignment {
            customer_id: "cust_1".into(),
            window_days: 180,
            primary: PersonaCandidate {
                persona_type: PersonaType::SavingsBuilder,
                confidence: 1.0,
                triggering_signals: vec![],
            },
            secondary: None,
            candidates: vec![],
            assigned_at: now,
            default_assignment,
        };
        DecisionTrace {
            trace_id: "trc_1".into(),
            customer_id: "cust_1".into(),
            timestamp: now,
            windows_analyzed: vec![30, 180],
            signal_bundles: WindowedSignalBundles {
                d30: SignalBundle::empty(30),
                d180: SignalBundle::empty(180),
            },
            persona_assignments: WindowedPersonaAssignments {
                d30: assignment.clone(),
                d180: assignment,
            },
            candidate_items: vec![],
            filtered_items: vec![],
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
    fn all_default_gives_zero_coverage() {
        let traces = vec![trace_with_default(true), trace_with_default(true)];
        let coverage = compute(&traces, 180);
        assert_eq!(coverage.coverage_ratio, 0.0);
    }

    #[test]
    fn mixed_assignments_compute_ratio() {
        let traces = vec![trace_with_default(true), trace_with_default(false)];
        let coverage = compute(&traces, 180);
        assert_eq!(coverage.customers_evaluated, 2);
        assert_eq!(coverage.non_default_count, 1);
        assert_eq!(coverage.coverage_ratio, 0.5);
    }

    #[test]
    fn empty_input_gives_zero_ratio_not_nan() {
        let coverage = compute(&[], 180);
        assert_eq!(coverage.coverage_ratio, 0.0);
    }
}
