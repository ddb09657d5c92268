//! The evaluation harness (C9, spec §4.9): reads the trace store for a
//! cohort of customers and composes every metric into one report.

use chrono::Utc;
use spendsense_core::DecisionTrace;
use spendsense_trace::TraceStore;

use crate::metrics::{
    behaviors_detected, eligibility_rejection, latency, offer_parity, persona_coverage,
    rationale_coverage, trace_coverage,
};
use crate::report::{EvaluationReport, ReportMetadata};

/// Per-customer latency samples are measured by the caller (pipeline
/// orchestrator) and handed in, since C9 has no visibility into a run's
/// wall-clock time once the trace is flushed.
pub struct EvaluationHarness<'a> {
    store: &'a dyn TraceStore,
}

impl<'a> EvaluationHarness<'a> {
    pub fn new(store: &'a dyn TraceStore) -> Self {
        Self { store }
    }

    /// Evaluate the most recent trace per requested customer.
    pub fn evaluate(
        &self,
        customer_ids: &[String],
        latencies_ms: &[f64],
    ) -> spendsense_core::SpendSenseResult<EvaluationReport> {
        let mut latest_traces: Vec<DecisionTrace> = Vec::with_capacity(customer_ids.len());
        for customer_id in customer_ids {
            if let Some(trace) = self.store.list_by_customer(customer_id)?.into_iter().next() {
                latest_traces.push(trace);
            }
        }

        let report = EvaluationReport {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                traces_evaluated: latest_traces.len(),
            },
            persona_coverage_30d: persona_coverage::compute(&latest_traces, 30),
            persona_coverage_180d: persona_coverage::compute(&latest_traces, 180),
            behaviors_detected: behaviors_detected::compute(&latest_traces, 180),
            rationale_coverage: rationale_coverage::compute(&latest_traces),
            trace_coverage: trace_coverage::compute(customer_ids, &latest_traces),
            latency: latency::compute(latencies_ms),
            offer_parity: offer_parity::compute(&latest_traces),
            eligibility_rejection: eligibility_rejection::compute(&latest_traces),
        };

        Ok(report)
    }
}
