//! # spendsense-counterfactual
//!
//! Five closed-form "what-if" scenario generators (C7, spec §4.7). Every
//! computation is closed-form; none iterates or searches. At most one
//! scenario per generator, so the customer never sees more than 5 total.

mod confidence;
mod debt_payoff;
mod emergency_fund;
mod income_buffer;
mod inputs;
mod subscription_cancellation;
mod utilization_reduction;

pub use inputs::{CardContext, CounterfactualInputs};

use spendsense_core::Counterfactual;

/// Run all five generators and collect whichever are applicable (spec §4.7
/// "up to 5 scenarios per customer").
pub fn generate_all(inputs: &CounterfactualInputs) -> Vec<Counterfactual> {
    [
        utilization_reduction::generate(inputs),
        debt_payoff::generate(inputs),
        emergency_fund::generate(inputs),
        subscription_cancellation::generate(inputs),
        income_buffer::generate(inputs),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_inputs_produce_no_scenarios() {
        let inputs = CounterfactualInputs {
            window_days: 30,
            ..Default::default()
        };
        assert!(generate_all(&inputs).is_empty());
    }

    #[test]
    fn never_exceeds_five_scenarios() {
        use rust_decimal_macros::dec;
        use spendsense_core::{Cadence, RecurringCharge};

        let inputs = CounterfactualInputs {
            cards: vec![CardContext {
                account_id: "card_1".into(),
                current: dec!(4000),
                limit: dec!(5000),
                purchase_apr_pct: Some(dec!(24)),
                minimum_payment: dec!(100),
            }],
            cash_flow_buffer_months: Some(dec!(2)),
            median_monthly_expense: Some(dec!(2000)),
            net_savings_rate: Some(dec!(300)),
            savings_balance: Some(dec!(500)),
            liquid_balance: Some(dec!(500)),
            recurring_charges: vec![RecurringCharge {
                merchant: "gym".into(),
                cadence: Cadence::Monthly,
                median_amount: dec!(40),
                median_gap_days: 30.0,
                normalized_monthly_cost: dec!(40),
                occurrence_count: 3,
            }],
            extra_payment: Some(dec!(50)),
            window_days: 180,
        };
        let scenarios = generate_all(&inputs);
        assert!(scenarios.len() <= 5);
        assert!(!scenarios.is_empty());
    }
}
