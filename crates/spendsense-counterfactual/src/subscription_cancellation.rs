//! Subscription-cancellation scenario (spec §4.7): annualized savings of
//! the top-k recurring merchants by normalized monthly cost.

use rust_decimal::Decimal;
use spendsense_core::Counterfactual;

use crate::confidence::assess;
use crate::inputs::CounterfactualInputs;

const TOP_K: usize = 3;
const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

pub fn generate(inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    if inputs.recurring_charges.is_empty() {
        return None;
    }

    let mut charges = inputs.recurring_charges.clone();
    charges.sort_by(|a, b| {
        b.normalized_monthly_cost
            .cmp(&a.normalized_monthly_cost)
            .then_with(|| a.merchant.cmp(&b.merchant))
    });
    let top: Vec<_> = charges.into_iter().take(TOP_K).collect();

    let monthly_total: Decimal = top.iter().map(|c| c.normalized_monthly_cost).sum();
    let annualized_savings = monthly_total * MONTHS_PER_YEAR;

    let merchants: Vec<String> = top.iter().map(|c| c.merchant.clone()).collect();
    let confidence = assess(inputs.window_days, false);

    Some(Counterfactual {
        scenario_id: "subscription_cancellation".to_string(),
        headline: format!(
            "Canceling {} ({}) could save about {annualized_savings} per year",
            merchants.join(", "),
            top.len()
        ),
        impact_metric: format!("annualized_savings={annualized_savings}"),
        time_horizon: "12 months".to_string(),
        assumption_set: vec![format!("top {} recurring charges by monthly cost", top.len()), "no new subscriptions added".to_string()],
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use spendsense_core::{Cadence, RecurringCharge};

    fn charge(merchant: &str, monthly_cost: Decimal) -> RecurringCharge {
        RecurringCharge {
            merchant: merchant.to_string(),
            cadence: Cadence::Monthly,
            median_amount: monthly_cost,
            median_gap_days: 30.0,
            normalized_monthly_cost: monthly_cost,
            occurrence_count: 3,
        }
    }

    #[test]
    fn no_charges_produces_no_scenario() {
        let inputs = CounterfactualInputs {
            window_days: 30,
            ..Default::default()
        };
        assert!(generate(&inputs).is_none());
    }

    #[test]
    fn picks_top_three_by_cost() {
        let inputs = CounterfactualInputs {
            recurring_charges: vec![
                charge("gym", dec!(40)),
                charge("streaming_a", dec!(15)),
                charge("streaming_b", dec!(12)),
                charge("news", dec!(8)),
            ],
            window_days: 180,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert!(scenario.headline.contains("gym"));
        assert!(!scenario.headline.contains("news"));
        assert_eq!(scenario.impact_metric, "annualized_savings=804");
    }
}
