//! Emergency-fund buildup scenario (spec §4.7): months to reach 3x median
//! monthly expense at the detected net savings rate.

use rust_decimal::Decimal;
use spendsense_core::Counterfactual;

use crate::confidence::assess;
use crate::inputs::CounterfactualInputs;

const TARGET_MONTHS_OF_EXPENSE: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

pub fn generate(inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    let expense = inputs.median_monthly_expense?;
    let balance = inputs.savings_balance?;
    let rate = inputs.net_savings_rate?;

    let target = expense * TARGET_MONTHS_OF_EXPENSE;
    if balance >= target {
        return None;
    }
    if rate <= Decimal::ZERO {
        return Some(Counterfactual {
            scenario_id: "emergency_fund_buildup".to_string(),
            headline: "At the current savings rate, reaching a 3-month emergency fund is not projected".to_string(),
            impact_metric: "not currently saving".to_string(),
            time_horizon: "unbounded".to_string(),
            assumption_set: vec![format!("target {target}"), format!("current balance {balance}")],
            confidence: spendsense_core::ConfidenceLevel::Low,
        });
    }

    let months = (target - balance) / rate;
    let confidence = assess(inputs.window_days, false);

    Some(Counterfactual {
        scenario_id: "emergency_fund_buildup".to_string(),
        headline: format!("At {rate}/month in savings, you'd reach a 3-month emergency fund in about {months:.1} months"),
        impact_metric: format!("months_to_target={months:.1}"),
        time_horizon: format!("{months:.1} months"),
        assumption_set: vec![
            format!("target {target} (3x median monthly expense)"),
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
    fn already_above_target_produces_no_scenario() {
        let inputs = CounterfactualInputs {
            median_monthly_expense: Some(dec!(2000)),
            savings_balance: Some(dec!(10000)),
            net_savings_rate: Some(dec!(200)),
            window_days: 30,
            ..Default::default()
        };
        assert!(generate(&inputs).is_none());
    }

    #[test]
    fn zero_savings_rate_reports_not_saving() {
        let inputs = CounterfactualInputs {
            median_monthly_expense: Some(dec!(2000)),
            savings_balance: Some(dec!(500)),
            net_savings_rate: Some(dec!(0)),
            window_days: 30,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert_eq!(scenario.impact_metric, "not currently saving");
    }

    #[test]
    fn positive_rate_projects_months() {
        let inputs = CounterfactualInputs {
            median_monthly_expense: Some(dec!(2000)),
            savings_balance: Some(dec!(1000)),
            net_savings_rate: Some(dec!(500)),
            window_days: 180,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert_eq!(scenario.impact_metric, "months_to_target=10.0");
    }
}
