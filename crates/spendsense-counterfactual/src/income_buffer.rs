//! Income-buffer scenario (spec §4.7): months required to reach a 1-month
//! expense buffer at the current net savings rate.

use rust_decimal::Decimal;
use spendsense_core::Counterfactual;

use crate::confidence::assess;
use crate::inputs::CounterfactualInputs;

pub fn generate(inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    let expense = inputs.median_monthly_expense?;
    let balance = inputs.liquid_balance?;
    let rate = inputs.net_savings_rate?;

    if balance >= expense {
        return None;
    }
    if rate <= Decimal::ZERO {
        return Some(Counterfactual {
            scenario_id: "income_buffer".to_string(),
            headline: "At the current savings rate, reaching a 1-month income buffer is not projected".to_string(),
            impact_metric: "not currently saving".to_string(),
            time_horizon: "unbounded".to_string(),
            assumption_set: vec![format!("target {expense}"), format!("current liquid balance {balance}")],
            confidence: spendsense_core::ConfidenceLevel::Low,
        });
    }

    let months = (expense - balance) / rate;
    let confidence = assess(inputs.window_days, false);

    Some(Counterfactual {
        scenario_id: "income_buffer".to_string(),
        headline: format!("At {rate}/month in savings, you'd reach a 1-month income buffer in about {months:.1} months"),
        impact_metric: format!("months_to_target={months:.1}"),
        time_horizon: format!("{months:.1} months"),
        assumption_set: vec![
            format!("target {expense} (1x median monthly expense)"),
            format!("net savings rate {rate} per month"),
        ],
        confidence,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn already_buffered_produces_no_scenario() {
        let inputs = CounterfactualInputs {
            median_monthly_expense: Some(dec!(2000)),
            liquid_balance: Some(dec!(2500)),
            net_savings_rate: Some(dec!(100)),
            window_days: 30,
            ..Default::default()
        };
        assert!(generate(&inputs).is_none());
    }

    #[test]
    fn projects_months_to_buffer() {
        let inputs = CounterfactualInputs {
            median_monthly_expense: Some(dec!(2000)),
            liquid_balance: Some(dec!(500)),
            net_savings_rate: Some(dec!(300)),
            window_days: 30,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert_eq!(scenario.impact_metric, "months_to_target=5.0");
    }
}
