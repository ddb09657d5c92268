//! Utilization-reduction scenario (spec §4.7).

use rust_decimal::Decimal;
use spendsense_core::Counterfactual;

use crate::confidence::assess;
use crate::inputs::{CardContext, CounterfactualInputs};

const TARGET_UTILIZATION: Decimal = Decimal::from_parts(30, 0, 0, false, 2);
const HORIZONS_MONTHS: [u32; 3] = [6, 12, 24];
const AFFORDABILITY_SHARE: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

fn generate_for_card(card: &CardContext, inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    if card.limit <= Decimal::ZERO || card.current <= Decimal::ZERO {
        return None;
    }
    let apr_pct = card.purchase_apr_pct?;

    let target_balance = card.limit * TARGET_UTILIZATION;
    if card.current <= target_balance {
        return None;
    }
    let paydown_amount = card.current - target_balance;
    let monthly_rate = apr_pct / Decimal::from(100) / Decimal::from(12);

    let affordable_budget = match (inputs.cash_flow_buffer_months, inputs.median_monthly_expense) {
        (Some(buffer), Some(expense)) => Some(buffer * expense * AFFORDABILITY_SHARE),
        _ => None,
    };

    let horizon_months = match affordable_budget {
        Some(budget) => HORIZONS_MONTHS
            .into_iter()
            .find(|&months| paydown_amount / Decimal::from(months) <= budget)
            .unwrap_or(*HORIZONS_MONTHS.last().unwrap()),
        None => *HORIZONS_MONTHS.last().unwrap(),
    };

    let interest_saved = (paydown_amount / Decimal::from(2)) * monthly_rate * Decimal::from(horizon_months);

    let confidence = assess(inputs.window_days, affordable_budget.is_none());

    Some(Counterfactual {
        scenario_id: format!("utilization_reduction:{}", card.account_id),
        headline: format!(
            "Paying down {} on card {} to 30% utilization over {} months could save about {} in interest",
            paydown_amount, card.account_id, horizon_months, interest_saved
        ),
        impact_metric: format!("interest_saved={interest_saved}"),
        time_horizon: format!("{horizon_months} months"),
        assumption_set: vec![
            "linear paydown to 30% utilization".to_string(),
            format!("purchase APR {apr_pct}%"),
        ],
        confidence,
    })
}

pub fn generate(inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    inputs.cards.iter().find_map(|card| generate_for_card(card, inputs))
}
