//! Savings detector (spec §4.2).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use spendsense_core::{Account, HolderCategory, PfcPrimary, SavingsSignals, Transaction, Window};

use crate::stats::median;

/// Same amount, same day-of-month, observed at least this many times, is
/// treated as an automated transfer (spec §4.2, "best-effort, low
/// confidence" heuristic — the datastore contract exposes no explicit
/// transfer-rule field to key off of instead).
const MIN_TRANSFER_OCCURRENCES: usize = 2;
const TRANSFER_DAY_TOLERANCE: u32 = 2;

/// Detect savings signals for the active window. `reference_180d_transactions`
/// is always the 180-day transaction set, independent of `window`, because
/// `emergency_months_coverage` must be computed against a stable median
/// monthly expense regardless of which window the caller is analyzing
/// (spec §4.2).
pub fn detect_savings(
    accounts: &[Account],
    window_transactions: &[Transaction],
    window: Window,
    reference_180d_transactions: &[Transaction],
) -> SavingsSignals {
    let savings_account_ids: Vec<&str> = accounts
        .iter()
        .filter(|a| a.subtype.is_savings_class())
        .map(|a| a.account_id.as_str())
        .collect();

    let savings_txns: Vec<&Transaction> = window_transactions
        .iter()
        .filter(|t| savings_account_ids.contains(&t.account_id.as_str()))
        .collect();

    let net_inflow: Decimal = savings_txns.iter().map(|t| -t.amount).sum();

    let ending_balance: Decimal = accounts
        .iter()
        .filter(|a| a.subtype.is_savings_class())
        .map(|a| a.balances.current)
        .sum();
    let starting_balance = ending_balance - net_inflow;
    let growth_rate = if starting_balance > Decimal::ZERO {
        Some(net_inflow / starting_balance)
    } else {
        None
    };

    let monthly_expense = median_monthly_expense(accounts, reference_180d_transactions);
    let emergency_months_coverage = monthly_expense
        .filter(|m| *m > Decimal::ZERO)
        .map(|monthly_expense| ending_balance / monthly_expense);

    let has_automated_transfers = detect_automated_transfers(accounts, window_transactions);

    SavingsSignals {
        net_inflow,
        growth_rate,
        emergency_months_coverage,
        has_automated_transfers,
        median_monthly_expense: monthly_expense,
    }
}

/// Median of per-calendar-month outflow totals across non-savings consumer
/// accounts in the 180-day reference window.
pub(crate) fn median_monthly_expense(accounts: &[Account], reference_180d_transactions: &[Transaction]) -> Option<Decimal> {
    let expense_account_ids: Vec<&str> = accounts
        .iter()
        .filter(|a| a.is_consumer() && !a.subtype.is_savings_class() && a.holder_category == HolderCategory::Consumer)
        .map(|a| a.account_id.as_str())
        .collect();

    let mut by_month: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for txn in reference_180d_transactions {
        if txn.is_outflow() && expense_account_ids.contains(&txn.account_id.as_str()) {
            use chrono::Datelike;
            let key = (txn.date.year(), txn.date.month());
            *by_month.entry(key).or_insert(Decimal::ZERO) += txn.amount;
        }
    }
    if by_month.is_empty() {
        return None;
    }
    let mut values: Vec<f64> = by_month
        .values()
        .map(|d| rust_decimal::prelude::ToPrimitive::to_f64(d).unwrap_or(0.0))
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let median_f64 = median(&values)?;
    Decimal::try_from(median_f64).ok()
}

fn detect_automated_transfers(accounts: &[Account], window_transactions: &[Transaction]) -> bool {
    use chrono::Datelike;
    let checking_ids: Vec<&str> = accounts
        .iter()
        .filter(|a| !a.subtype.is_savings_class())
        .map(|a| a.account_id.as_str())
        .collect();

    let mut candidates: BTreeMap<(Decimal, &str), Vec<u32>> = BTreeMap::new();
    for txn in window_transactions {
        if !txn.is_outflow() || !checking_ids.contains(&txn.account_id.as_str()) {
            continue;
        }
        if txn.personal_finance_category.primary != PfcPrimary::TransferOut {
            continue;
        }
        candidates
            .entry((txn.amount, txn.merchant.group_key()))
            .or_default()
            .push(txn.date.day());
    }

    candidates.values().any(|days| {
        if days.len() < MIN_TRANSFER_OCCURRENCES {
            return false;
        }
        let mut sorted = days.clone();
        sorted.sort_unstable();
        let spread = sorted.last().unwrap() - sorted.first().unwrap();
        spread <= TRANSFER_DAY_TOLERANCE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use spendsense_core::{
        AccountSubtype, AccountType, Balances, MerchantRef, PaymentChannel, PersonalFinanceCategory,
    };

    fn savings_account(current: Decimal) -> Account {
        Account::new(
            "acc_savings",
            "cust_1",
            AccountType::Depository,
            AccountSubtype::Savings,
            Balances {
                available: Some(current),
                current,
                limit: None,
            },
            "USD",
            HolderCategory::Consumer,
        )
        .unwrap()
    }

    fn checking_account() -> Account {
        Account::new(
            "acc_checking",
            "cust_1",
            AccountType::Depository,
            AccountSubtype::Checking,
            Balances {
                available: Some(dec!(2000)),
                current: dec!(2000),
                limit: None,
            },
            "USD",
            HolderCategory::Consumer,
        )
        .unwrap()
    }

    fn transfer(account_id: &str, date: NaiveDate, amount: Decimal, primary: PfcPrimary) -> Transaction {
        Transaction {
            transaction_id: format!("{account_id}-{date}"),
            account_id: account_id.to_string(),
            date,
            amount,
            merchant: MerchantRef::Name("Internal Transfer".into()),
            payment_channel: PaymentChannel::Online,
            personal_finance_category: PersonalFinanceCategory {
                primary,
                detailed: "TRANSFER".into(),
            },
            pending: false,
            currency_code: "USD".into(),
        }
    }

    #[test]
    fn net_inflow_and_growth_rate_from_deposits() {
        let accounts = vec![savings_account(dec!(1100))];
        let window = Window::canonical_30d(NaiveDate::from_ymd_opt(2026, 7, 28).unwrap());
        let deposit = transfer(
            "acc_savings",
            NaiveDate::from_ymd_opt(2026, 7, 10).unwrap(),
            dec!(-100),
            PfcPrimary::TransferIn,
        );
        let signals = detect_savings(&accounts, &[deposit], window, &[]);
        assert_eq!(signals.net_inflow, dec!(100));
        assert_eq!(signals.growth_rate.unwrap().round_dp(4), dec!(0.1));
    }

    #[test]
    fn automated_transfer_detected_for_repeated_same_day_amount() {
        let accounts = vec![checking_account(), savings_account(dec!(0))];
        let window = Window::canonical_180d(NaiveDate::from_ymd_opt(2026, 7, 28).unwrap());
        let txns = vec![
            transfer(
                "acc_checking",
                NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
                dec!(200),
                PfcPrimary::TransferOut,
            ),
            transfer(
                "acc_checking",
                NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                dec!(200),
                PfcPrimary::TransferOut,
            ),
        ];
        let signals = detect_savings(&accounts, &txns, window, &[]);
        assert!(signals.has_automated_transfers);
    }

    #[test]
    fn emergency_coverage_none_when_no_expense_history() {
        let accounts = vec![savings_account(dec!(1000))];
        let window = Window::canonical_30d(NaiveDate::from_ymd_opt(2026, 7, 28).unwrap());
        let signals = detect_savings(&accounts, &[], window, &[]);
        assert_eq!(signals.emergency_months_coverage, None);
    }
}
