//! # spendsense-signals
//!
//! Behavioral signal detectors (C2, spec §4.2): subscriptions, credit
//! utilization, savings, and income stability. Every detector is a pure
//! function of its inputs — no RNG, no wall-clock reads, no I/O — so a
//! `SignalBundle` is fully reproducible from a given datastore snapshot and
//! `now`.

mod credit;
mod income;
mod savings;
mod stats;
mod subscription;

use spendsense_core::{Account, CreditCardLiability, SignalBundle, Transaction, Window};

/// Everything a detector might need, gathered once per customer-window by
/// the pipeline (C8 orchestrator) so each detector stays a free function
/// over plain data rather than reaching back into a datastore itself.
pub struct DetectorContext<'a> {
    pub accounts: &'a [Account],
    pub liabilities: &'a [CreditCardLiability],
    pub window: Window,
    pub window_transactions: &'a [Transaction],
    /// Always the 180-day transaction set, independent of `window`. The
    /// savings and income detectors use this for their expense-buffer
    /// calculations regardless of which window is active (spec §4.2).
    pub reference_180d_transactions: &'a [Transaction],
}

/// Run all four detectors and assemble the `SignalBundle` for one
/// customer-window (spec §3, §4.2).
pub fn detect_signals(ctx: &DetectorContext<'_>) -> SignalBundle {
    let subscriptions = subscription::detect_subscriptions(ctx.window_transactions, ctx.window);
    let credit = credit::detect_credit(ctx.accounts, ctx.liabilities, ctx.window_transactions);
    let savings = savings::detect_savings(
        ctx.accounts,
        ctx.window_transactions,
        ctx.window,
        ctx.reference_180d_transactions,
    );
    let income = income::detect_income(
        ctx.accounts,
        ctx.window_transactions,
        ctx.window,
        ctx.reference_180d_transactions,
    );

    SignalBundle {
        window_days: ctx.window.days,
        subscriptions,
        credit,
        savings,
        income,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_inputs_produce_empty_bundle() {
        let window = Window::canonical_30d(NaiveDate::from_ymd_opt(2026, 7, 28).unwrap());
        let ctx = DetectorContext {
            accounts: &[],
            liabilities: &[],
            window,
            window_transactions: &[],
            reference_180d_transactions: &[],
        };
        let bundle = detect_signals(&ctx);
        assert!(bundle.subscriptions.recurring.is_empty());
        assert!(bundle.credit.per_card.is_empty());
        assert_eq!(bundle.savings.net_inflow, rust_decimal::Decimal::ZERO);
        assert!(bundle.income.pay_events.is_empty());
    }
}
