//! Debt-payoff-with-extra-payment scenario (spec §4.7): standard
//! amortization, `n = -ln(1 - r*B/(m+delta)) / ln(1+r)`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendsense_core::Counterfactual;

use crate::confidence::assess;
use crate::inputs::{CardContext, CounterfactualInputs};

const DEFAULT_EXTRA_PAYMENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

fn months_to_payoff(balance: f64, monthly_payment: f64, monthly_rate: f64) -> Option<f64> {
    if monthly_rate <= 0.0 {
        if monthly_payment <= 0.0 {
            return None;
        }
        return Some(balance / monthly_payment);
    }
    let inner = 1.0 - monthly_rate * balance / monthly_payment;
    if inner <= 0.0 {
        return None;
    }
    Some(-inner.ln() / (1.0 + monthly_rate).ln())
}

fn generate_for_card(card: &CardContext, inputs: &CounterfactualInputs, extra_payment_defaulted: bool) -> Option<Counterfactual> {
    if card.current <= Decimal::ZERO || card.minimum_payment <= Decimal::ZERO {
        return None;
    }
    let apr_pct = card.purchase_apr_pct?;

    let extra = inputs.extra_payment.unwrap_or(DEFAULT_EXTRA_PAYMENT);
    let monthly_payment = (card.minimum_payment + extra).to_f64()?;
    let balance = card.current.to_f64()?;
    let monthly_rate = (apr_pct / Decimal::from(100) / Decimal::from(12)).to_f64()?;

    let confidence = assess(inputs.window_days, extra_payment_defaulted);

    match months_to_payoff(balance, monthly_payment, monthly_rate) {
        Some(months) => Some(Counterfactual {
            scenario_id: format!("debt_payoff:{}", card.account_id),
            headline: format!(
                "Adding {extra} per month on card {} pays it off in about {months:.1} months",
                card.account_id
            ),
            impact_metric: format!("months_to_payoff={months:.1}"),
            time_horizon: format!("{months:.1} months"),
            assumption_set: vec![
                format!("extra monthly payment {extra}"),
                format!("purchase APR {apr_pct}%"),
                "no new charges on the card".to_string(),
            ],
            confidence,
        }),
        None => Some(Counterfactual {
            scenario_id: format!("debt_payoff:{}", card.account_id),
            headline: format!("On card {}, the extra payment is insufficient to reduce the balance", card.account_id),
            impact_metric: "extra payment insufficient".to_string(),
            time_horizon: "unbounded".to_string(),
            assumption_set: vec![format!("extra monthly payment {extra}"), format!("purchase APR {apr_pct}%")],
            confidence: spendsense_core::ConfidenceLevel::Low,
        }),
    }
}

pub fn generate(inputs: &CounterfactualInputs) -> Option<Counterfactual> {
    let extra_payment_defaulted = inputs.extra_payment.is_none();
    inputs.cards.iter().find_map(|card| generate_for_card(card, inputs, extra_payment_defaulted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn card() -> CardContext {
        CardContext {
            account_id: "card_1".into(),
            current: dec!(3000),
            limit: dec!(5000),
            purchase_apr_pct: Some(dec!(18)),
            minimum_payment: dec!(75),
        }
    }

    #[test]
    fn extra_payment_shortens_payoff() {
        let inputs = CounterfactualInputs {
            cards: vec![card()],
            extra_payment: Some(dec!(100)),
            window_days: 30,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert!(scenario.impact_metric.starts_with("months_to_payoff="));
    }

    #[test]
    fn insufficient_payment_reports_unbounded() {
        let inputs = CounterfactualInputs {
            cards: vec![CardContext {
                purchase_apr_pct: Some(dec!(29.99)),
                minimum_payment: dec!(10),
                current: dec!(10000),
                ..card()
            }],
            extra_payment: Some(dec!(0)),
            window_days: 30,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert_eq!(scenario.impact_metric, "extra payment insufficient");
    }

    #[test]
    fn missing_extra_payment_defaults_and_lowers_confidence() {
        let inputs = CounterfactualInputs {
            cards: vec![card()],
            window_days: 180,
            ..Default::default()
        };
        let scenario = generate(&inputs).unwrap();
        assert_eq!(scenario.confidence, spendsense_core::ConfidenceLevel::Low);
    }
}
