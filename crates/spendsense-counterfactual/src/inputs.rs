//! The closed-form inputs each scenario generator needs (spec §4.7). These
//! are plain numeric values rather than a `SignalBundle` reference, since
//! the generators are pure math over already-derived aggregates, not
//! detectors over raw transactions.

use rust_decimal::Decimal;
use spendsense_core::RecurringCharge;

#[derive(Debug, Clone)]
pub struct CardContext {
    pub account_id: String,
    pub current: Decimal,
    pub limit: Decimal,
    /// Purchase APR as a percentage (0-100). Required for both the
    /// utilization-reduction and debt-payoff scenarios; a card missing this
    /// produces no scenario rather than a guessed one.
    pub purchase_apr_pct: Option<Decimal>,
    pub minimum_payment: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct CounterfactualInputs {
    pub cards: Vec<CardContext>,
    /// Soft input: affects horizon selection and confidence, not whether
    /// the utilization-reduction scenario runs at all.
    pub cash_flow_buffer_months: Option<Decimal>,
    pub median_monthly_expense: Option<Decimal>,
    /// Net monthly savings rate, in dollars, already normalized to a
    /// 30-day month by the caller.
    pub net_savings_rate: Option<Decimal>,
    pub savings_balance: Option<Decimal>,
    pub liquid_balance: Option<Decimal>,
    pub recurring_charges: Vec<RecurringCharge>,
    /// User- or operator-supplied extra monthly payment for the debt-payoff
    /// scenario (spec §4.7 "user-provided Delta"). Defaults to $50/month
    /// when absent (see DESIGN.md) so the scenario still runs.
    pub extra_payment: Option<Decimal>,
    pub window_days: u32,
}
