//! Inputs to the Financial Fragility rule that are not part of the
//! published `SignalBundle` schema (spec §3 does not list overdraft
//! events, sustained low-balance, or late fees as bundle fields). These
//! are derived directly from accounts/transactions at classification
//! time rather than invented as new `SignalBundle` fields, so the bundle
//! contract stays exactly as specified.
use spendsense_core::{Account, HolderCategory, Transaction, Window};
use rust_decimal::Decimal;

const LOW_BALANCE_THRESHOLD: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FragilitySignals {
    pub overdraft_event: bool,
    /// The datastore contract (spec §6) exposes only a current balance
    /// snapshot, not a daily balance history, so "current < 500 at >= 50%
    /// of window days" is approximated by the single current-balance
    /// snapshot rather than a true day-count. Best-effort, documented
    /// limitation.
    pub sustained_low_balance: bool,
    pub late_fee_present: bool,
}

pub fn derive_fragility_signals(accounts: &[Account], window_transactions: &[Transaction], _window: Window) -> FragilitySignals {
    let depository_consumer: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.holder_category == HolderCategory::Consumer)
        .collect();

    let overdraft_event = window_transactions.iter().any(|t| {
        t.personal_finance_category.detailed.to_ascii_uppercase().contains("OVERDRAFT")
    });

    let sustained_low_balance = depository_consumer
        .iter()
        .any(|a| a.balances.current < LOW_BALANCE_THRESHOLD);

    let late_fee_present = window_transactions
        .iter()
        .any(|t| t.personal_finance_category.is_late_fee());

    FragilitySignals {
        overdraft_event,
        sustained_low_balance,
        late_fee_present,
    }
}
