//! Rationale coverage (spec §4.9): every emitted education/offer item must
//! carry a rationale. Must be 100% or something upstream of C9 is broken.

use serde::{Deserialize, Serialize};
use spendsense_core::DecisionTrace;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RationaleCoverage {
    pub items_evaluated: usize,
    pub items_with_rationale: usize,
    pub coverage_ratio: f64,
}

impl RationaleCoverage {
    pub fn is_complete(&self) -> bool {
        self.items_evaluated == 0 || self.items_with_rationale == self.items_evaluated
    }
}

pub fn compute(traces: &[DecisionTrace]) -> RationaleCoverage {
    let mut items_evaluated = 0;
    let mut items_with_rationale = 0;

    for trace in traces {
        for item in trace.final_education.iter().chain(trace.final_offers.iter()) {
            items_evaluated += 1;
            if trace.rationales.contains_key(&item.id) {
                items_with_rationale += 1;
            }
        }
    }

    let coverage_ratio = if items_evaluated == 0 {
        1.0
    } else {
        items_with_rationale as f64 / items_evaluated as f64
    };

    RationaleCoverage {
        items_evaluated,
        items_with_rationale,
        coverage_ratio,
    }
}
