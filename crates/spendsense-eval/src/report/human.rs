//! Human-readable summary generator (spec §4.9 "short human summary").

use spendsense_core::SpendSenseResult;

use super::{EvaluationReport, ReportGenerator};

pub struct HumanSummaryGenerator;

impl ReportGenerator for HumanSummaryGenerator {
    fn generate(&self, report: &EvaluationReport) -> SpendSenseResult<String> {
        let r = report;
        Ok(format!(
            "Evaluation summary ({} traces, generated {})\n\
             - persona coverage (30d/180d): {:.1}% / {:.1}%\n\
             - mean behaviors detected per customer: {:.2}\n\
             - rationale coverage: {:.1}%{}\n\
             - decision-trace coverage: {:.1}%{}\n\
             - latency p50/p90/p99: {:.0}ms / {:.0}ms / {:.0}ms ({})\n\
             - offer-distribution parity: chi-square={:.2}, df={}{}\n\
             - eligibility-rejection rate: {:.1}%",
            r.metadata.traces_evaluated,
            r.metadata.generated_at.to_rfc3339(),
            r.persona_coverage_30d.coverage_ratio * 100.0,
            r.persona_coverage_180d.coverage_ratio * 100.0,
            r.behaviors_detected.mean_behaviors,
            r.rationale_coverage.coverage_ratio * 100.0,
            if r.rationale_coverage.is_complete() { "" } else { " [BELOW REQUIRED 100%]" },
            r.trace_coverage.coverage_ratio * 100.0,
            if r.trace_coverage.is_complete() { "" } else { " [BELOW REQUIRED 100%]" },
            r.latency.p50_ms,
            r.latency.p90_ms,
            r.latency.p99_ms,
            if r.latency.within_budget { "within budget" } else { "OVER BUDGET" },
            r.offer_parity.chi_square_stat,
            r.offer_parity.degrees_of_freedom,
            r.offer_parity
                .p_value
                .map(|p| format!(", p={p:.3}"))
                .unwrap_or_default(),
            r.eligibility_rejection.rejection_rate * 100.0,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{
        BehaviorsDetected, EligibilityRejectionRate, LatencyDistribution, OfferParity,
        PersonaCoverage, RationaleCoverage, TraceCoverage,
    };
    use crate::report::ReportMetadata;
    use chrono::Utc;

    #[test]
    fn flags_incomplete_required_coverage_in_text() {
        let report = EvaluationReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                traces_evaluated: 5,
            },
            persona_coverage_30d: PersonaCoverage {
                customers_evaluated: 5,
                non_default_count: 3,
                coverage_ratio: 0.6,
            },
            persona_coverage_180d: PersonaCoverage {
                customers_evaluated: 5,
                non_default_count: 4,
                coverage_ratio: 0.8,
            },
            behaviors_detected: BehaviorsDetected {
                customers_evaluated: 5,
                mean_behaviors: 1.4,
            },
            rationale_coverage: RationaleCoverage {
                items_evaluated: 10,
                items_with_rationale: 9,
                coverage_ratio: 0.9,
            },
            trace_coverage: TraceCoverage {
                customers_requested: 5,
                customers_with_trace: 5,
                coverage_ratio: 1.0,
                missing_customer_ids: vec![],
            },
            latency: LatencyDistribution {
                sample_size: 5,
                mean_ms: 100.0,
                p50_ms: 90.0,
                p90_ms: 150.0,
                p99_ms: 200.0,
                max_ms: 210.0,
                within_budget: true,
            },
            offer_parity: OfferParity {
                chi_square_stat: 1.2,
                degrees_of_freedom: 1,
                p_value: Some(0.27),
                personas_observed: 2,
                offers_observed: 2,
            },
            eligibility_rejection: EligibilityRejectionRate {
                candidates_evaluated: 20,
                eligibility_rejections: 2,
                rejection_rate: 0.1,
            },
        };

        let summary = HumanSummaryGenerator.generate(&report).unwrap();
        assert!(summary.contains("BELOW REQUIRED 100%"));
        assert!(summary.contains("within budget"));
    }
}
