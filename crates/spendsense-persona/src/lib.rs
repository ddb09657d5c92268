//! # spendsense-persona
//!
//! Rule-based persona classifier (C3, spec §4.3). Every rule is a pure
//! boolean predicate over a `SignalBundle`; there is no learned model and
//! no randomness, so the same bundle always yields the same assignment.

mod fragility;
mod rules;

pub use fragility::{derive_fragility_signals, FragilitySignals};

use chrono::{DateTime, Utc};
use spendsense_core::{PersonaAssignment, PersonaCandidate, PersonaType, SignalBundle};

/// Classify one customer-window into a `PersonaAssignment` (spec §4.3).
/// Never returns "no persona": absent a match, falls back to Savings
/// Builder with confidence 0.0 and `default_assignment = true`.
pub fn classify_window(
    customer_id: &str,
    bundle: &SignalBundle,
    fragility: &FragilitySignals,
    assigned_at: DateTime<Utc>,
) -> PersonaAssignment {
    let matches = rules::run_all(bundle, fragility);

    let candidates: Vec<PersonaCandidate> = matches
        .iter()
        .map(|(persona, outcome)| PersonaCandidate {
            persona_type: *persona,
            confidence: outcome.confidence,
            triggering_signals: outcome.triggering_signals.clone(),
        })
        .collect();

    let (primary, secondary, default_assignment) = if candidates.is_empty() {
        (
            PersonaCandidate {
                persona_type: PersonaType::SavingsBuilder,
                confidence: 0.0,
                triggering_signals: Vec::new(),
            },
            None,
            true,
        )
    } else {
        let primary = candidates[0].clone();
        let secondary = candidates.get(1).cloned();
        (primary, secondary, false)
    };

    PersonaAssignment {
        customer_id: customer_id.to_string(),
        window_days: bundle.window_days,
        primary,
        secondary,
        candidates,
        assigned_at,
        default_assignment,
    }
}

/// Temporal-consistency rule (spec §4.3): when the 30d and 180d primaries
/// disagree and the 30d classification relied on a single triggering
/// signal, the 180d primary governs the overall summary. Both assignments
/// are still emitted unchanged to callers; this only picks which one a
/// caller should treat as authoritative for e.g. catalog selection.
pub fn effective_primary<'a>(d30: &'a PersonaAssignment, d180: &'a PersonaAssignment) -> &'a PersonaCandidate {
    if d30.primary.persona_type != d180.primary.persona_type && d30.primary.triggering_signals.len() <= 1 {
        &d180.primary
    } else {
        &d30.primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use spendsense_core::{CardSignals, CreditSignals, SubscriptionSignals, SavingsSignals, IncomeSignals};

    fn bundle_with(per_card: Vec<CardSignals>) -> SignalBundle {
        SignalBundle {
            window_days: 30,
            subscriptions: SubscriptionSignals::default(),
            credit: CreditSignals {
                per_card,
                aggregate_utilization: None,
                total_monthly_interest: None,
            },
            savings: SavingsSignals::default(),
            income: IncomeSignals::default(),
        }
    }

    #[test]
    fn high_utilization_card_drives_primary() {
        let bundle = bundle_with(vec![CardSignals {
            account_id: "card_1".into(),
            utilization: Some(dec!(0.68)),
            over_30: true,
            over_50: true,
            over_80: false,
            min_only: false,
            has_interest: false,
            is_overdue: false,
            monthly_interest_estimate: None,
        }]);
        let fragility = FragilitySignals::default();
        let assignment = classify_window("cust_1", &bundle, &fragility, Utc::now());
        assert_eq!(assignment.primary.persona_type, PersonaType::HighUtilization);
        assert!(!assignment.default_assignment);
    }

    #[test]
    fn no_match_falls_back_to_savings_builder() {
        let bundle = bundle_with(vec![]);
        let fragility = FragilitySignals::default();
        let assignment = classify_window("cust_1", &bundle, &fragility, Utc::now());
        assert_eq!(assignment.primary.persona_type, PersonaType::SavingsBuilder);
        assert_eq!(assignment.primary.confidence, 0.0);
        assert!(assignment.default_assignment);
    }

    #[test]
    fn high_utilization_outranks_financial_fragility() {
        let bundle = bundle_with(vec![CardSignals {
            account_id: "card_1".into(),
            utilization: Some(dec!(0.9)),
            over_30: true,
            over_50: true,
            over_80: true,
            min_only: false,
            has_interest: false,
            is_overdue: false,
            monthly_interest_estimate: None,
        }]);
        let fragility = FragilitySignals {
            overdraft_event: true,
            sustained_low_balance: false,
            late_fee_present: false,
        };
        let assignment = classify_window("cust_1", &bundle, &fragility, Utc::now());
        assert_eq!(assignment.primary.persona_type, PersonaType::HighUtilization);
        assert_eq!(assignment.secondary.as_ref().unwrap().persona_type, PersonaType::FinancialFragility);
    }
}
