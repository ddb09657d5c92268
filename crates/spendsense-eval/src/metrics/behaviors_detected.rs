//! Mean behaviors-detected per customer (spec §4.9): how many of the four
//! detector categories in a `SignalBundle` surfaced a non-trivial signal.

use serde::{Deserialize, Serialize};
use spendsense_core::{DecisionTrace, SignalBundle};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BehaviorsDetected {
    pub customers_evaluated: usize,
    pub mean_behaviors: f64,
}

/// A behavior category counts as "detected" when the detector produced
/// something beyond its empty default, mirroring the "partial data" rule
/// in spec §7 (null fields are not an error, just absence of a behavior).
fn behaviors_in(bundle: &SignalBundle) -> u32 {
    let mut count = 0;
    if !bundle.subscriptions.recurring.is_empty() {
        count += 1;
    }
    if !bundle.credit.per_card.is_empty() {
        count += 1;
    }
    if bundle.savings.has_automated_transfers || bundle.savings.net_inflow != Default::default() {
        count += 1;
    }
    if !bundle.income.pay_events.is_empty() {
        count += 1;
    }
    count
}

pub fn compute(traces: &[DecisionTrace], window_days: u32) -> BehaviorsDetected {
    let bundles: Vec<&SignalBundle> = traces
        .iter()
        .filter_map(|t| match window_days {
            30 => Some(&t.signal_bundles.d30),
            180 => Some(&t.signal_bundles.d180),
            _ => None,
        })
        .collect();

    let customers_evaluated = bundles.len();
    let total: u32 = bundles.iter().map(|b| behaviors_in(b)).sum();
    let mean_behaviors = if customers_evaluated == 0 {
        0.0
    } else {
        total as f64 / customers_evaluated as f64
    };

    BehaviorsDetected {
        customers_evaluated,
        mean_behaviors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bundle_has_zero_behaviors() {
        assert_eq!(behaviors_in(&SignalBundle::empty(180)), 0);
    }

    #[test]
    fn recurring_charge_counts_as_one_behavior() {
        use rust_decimal_macros::dec;
        use spendsense_core::{Cadence, RecurringCharge};

        let mut bundle = SignalBundle::empty(180);
        bundle.subscriptions.recurring.push(RecurringCharge {
            merchant: "gym".into(),
            cadence: Cadence::Monthly,
            median_amount: dec!(40),
            median_gap_days: 30.0,
            normalized_monthly_cost: dec!(40),
            occurrence_count: 3,
        });
        assert_eq!(behaviors_in(&bundle), 1);
    }

    #[test]
    fn compute_handles_no_traces() {
        let result = compute(&[], 180);
        assert_eq!(result.mean_behaviors, 0.0);
        assert_eq!(result.customers_evaluated, 0);
    }
}
