//! Decision-trace coverage (spec §4.9): every customer in the requested
//! cohort must have at least one trace in the store. Must be 100%.

use serde::{Deserialize, Serialize};
use spendsense_core::DecisionTrace;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceCoverage {
    pub customers_requested: usize,
    pub customers_with_trace: usize,
    pub coverage_ratio: f64,
    pub missing_customer_ids: Vec<String>,
}

impl TraceCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing_customer_ids.is_empty()
    }
}

pub fn compute(requested_customer_ids: &[String], traces: &[DecisionTrace]) -> TraceCoverage {
    let present: std::collections::HashSet<&str> =
        traces.iter().map(|t| t.customer_id.as_str()).collect();

    let missing_customer_ids: Vec<String> = requested_customer_ids
        .iter()
        .filter(|id| !present.contains(id.as_str()))
        .cloned()
        .collect();

    let customers_requested = requested_customer_ids.len();
    let customers_with_trace = customers_requested - missing_customer_ids.len();
    let coverage_ratio = if customers_requested == 0 {
        1.0
    } else {
        customers_with_trace as f64 / customers_requested as f64
    };

    TraceCoverage {
        customers_requested,
        customers_with_trace,
        coverage_ratio,
        missing_customer_ids,
    }
}
