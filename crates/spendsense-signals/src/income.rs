//! Income stability detector (spec §4.2).

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use spendsense_core::{Account, AccountType, IncomeSignals, PayEvent, PaymentChannel, PfcPrimary, Transaction, Window};

use crate::savings::median_monthly_expense;
use crate::stats::{coefficient_of_variation, median};

/// A merchant-repeating inflow qualifies as a pay event without an `INCOME`
/// tag if it recurs at least this many times (spec §4.2).
const MERCHANT_REPEAT_MIN_OCCURRENCES: usize = 2;
/// Candidate inter-arrival gaps are compared against these two canonical
/// pay cadences (spec §4.2 "near 14 or 30 days").
const MERCHANT_CADENCE_TARGETS_DAYS: [f64; 2] = [14.0, 30.0];
const MERCHANT_CADENCE_TOLERANCE_DAYS: f64 = 4.0;
const MERCHANT_CV_MAX: f64 = 0.10;

/// Detect income stability signals. `reference_180d_transactions` feeds the
/// same always-180-day median monthly expense used by the buffer
/// calculation, mirroring the savings detector (spec §4.2).
pub fn detect_income(
    accounts: &[Account],
    window_transactions: &[Transaction],
    _window: Window,
    reference_180d_transactions: &[Transaction],
) -> IncomeSignals {
    let depository_ids: Vec<&str> = accounts
        .iter()
        .filter(|a| a.account_type == AccountType::Depository)
        .map(|a| a.account_id.as_str())
        .collect();

    let tagged_pay_events = window_transactions.iter().filter(|t| {
        t.is_inflow()
            && depository_ids.contains(&t.account_id.as_str())
            && t.personal_finance_category.primary == PfcPrimary::Income
    });
    let mut pay_events: Vec<PayEvent> = tagged_pay_events
        .map(|t| PayEvent {
            date: t.date,
            amount: t.abs_amount(),
        })
        .collect();
    pay_events.extend(merchant_repetition_pay_events(window_transactions, &depository_ids));
    pay_events.sort_by_key(|e| e.date);

    let median_gap_days = if pay_events.len() >= 2 {
        let gaps: Vec<f64> = pay_events
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days() as f64)
            .collect();
        median(&gaps)
    } else {
        None
    };

    let variability_cv = if pay_events.len() >= 2 {
        let amounts: Vec<f64> = pay_events
            .iter()
            .map(|e| e.amount.to_f64().unwrap_or(0.0))
            .collect();
        coefficient_of_variation(&amounts)
    } else {
        None
    };

    let total_balance: Decimal = accounts
        .iter()
        .filter(|a| depository_ids.contains(&a.account_id.as_str()))
        .map(|a| a.balances.current)
        .sum();
    let cash_flow_buffer_months = median_monthly_expense(accounts, reference_180d_transactions)
        .filter(|m| *m > Decimal::ZERO)
        .map(|monthly_expense| total_balance / monthly_expense);

    // "payment_channel = other AND regular cadence" (spec §4.2): an Other
    // inflow with nothing else behind it is not payroll, just one unlabeled
    // deposit. "Regular" is a biweekly-to-monthly gap, matching the pay
    // cadences the merchant-repetition pass recognizes above.
    let regular_cadence = pay_events.len() >= 2
        && median_gap_days.map(|gap| (7.0..=35.0).contains(&gap)).unwrap_or(false);
    let has_payroll_ach = regular_cadence
        && window_transactions.iter().any(|t| {
            t.is_inflow()
                && depository_ids.contains(&t.account_id.as_str())
                && t.personal_finance_category.primary == PfcPrimary::Income
                && t.payment_channel == PaymentChannel::Other
        });

    IncomeSignals {
        pay_events,
        median_gap_days,
        variability_cv,
        cash_flow_buffer_months,
        has_payroll_ach,
    }
}

/// The merchant-repetition alternative to an `INCOME`-tagged inflow (spec
/// §4.2): any merchant whose inflows recur at least twice with inter-arrival
/// near 14 or 30 days and amount CV at or below 0.10 counts as a pay event
/// even without the category tag. Mirrors `subscription.rs`'s
/// group-by-merchant-then-gap/CV shape.
fn merchant_repetition_pay_events(window_transactions: &[Transaction], depository_ids: &[&str]) -> Vec<PayEvent> {
    let mut grouped: BTreeMap<&str, Vec<&Transaction>> = BTreeMap::new();
    for txn in window_transactions {
        if txn.is_inflow()
            && depository_ids.contains(&txn.account_id.as_str())
            && txn.personal_finance_category.primary != PfcPrimary::Income
        {
            grouped.entry(txn.merchant.group_key()).or_default().push(txn);
        }
    }

    let mut events = Vec::new();
    for (_, mut txns) in grouped {
        if txns.len() < MERCHANT_REPEAT_MIN_OCCURRENCES {
            continue;
        }
        txns.sort_by_key(|t| t.date);

        let gaps: Vec<f64> = txns
            .windows(2)
            .map(|pair| (pair[1].date - pair[0].date).num_days() as f64)
            .collect();
        let Some(median_gap) = median(&gaps) else {
            continue;
        };
        let near_pay_cadence = MERCHANT_CADENCE_TARGETS_DAYS
            .iter()
            .any(|target| (median_gap - target).abs() <= MERCHANT_CADENCE_TOLERANCE_DAYS);
        if !near_pay_cadence {
            continue;
        }

        let amounts: Vec<f64> = txns.iter().map(|t| t.abs_amount().to_f64().unwrap_or(0.0)).collect();
        let cv_within_tolerance = coefficient_of_variation(&amounts).map(|cv| cv <= MERCHANT_CV_MAX).unwrap_or(false);
        if !cv_within_tolerance {
            continue;
        }

        events.extend(txns.iter().map(|t| PayEvent {
            date: t.date,
            amount: t.abs_amount(),
        }));
    }
    events
}
