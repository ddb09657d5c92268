//! Evaluation report: machine-readable key/value pairs plus a short human
//! summary (spec §4.9 "Emits both machine-readable ... and a short human
//! summary").

mod human;
mod json;

pub use human::HumanSummaryGenerator;
pub use json::JsonReportGenerator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spendsense_core::SpendSenseResult;

use crate::metrics::{
    BehaviorsDetected, EligibilityRejectionRate, LatencyDistribution, OfferParity,
    PersonaCoverage, RationaleCoverage, TraceCoverage,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub traces_evaluated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub persona_coverage_30d: PersonaCoverage,
    pub persona_coverage_180d: PersonaCoverage,
    pub behaviors_detected: BehaviorsDetected,
    pub rationale_coverage: RationaleCoverage,
    pub trace_coverage: TraceCoverage,
    pub latency: LatencyDistribution,
    pub offer_parity: OfferParity,
    pub eligibility_rejection: EligibilityRejectionRate,
}

impl EvaluationReport {
    /// Spec §4.9: rationale and trace coverage must both be 100%; this is
    /// the harness's single pass/fail signal, everything else is
    /// informational.
    pub fn passes_required_coverage(&self) -> bool {
        self.rationale_coverage.is_complete() && self.trace_coverage.is_complete()
    }
}

pub trait ReportGenerator {
    fn generate(&self, report: &EvaluationReport) -> SpendSenseResult<String>;
}
