//! The `SignalBundle` derived data model (spec §3, populated by the
//! detectors in `spendsense-signals`).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A detected recurring-charge candidate (spec §4.2 subscription detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub merchant: String,
    pub cadence: Cadence,
    pub median_amount: Decimal,
    pub median_gap_days: f64,
    pub normalized_monthly_cost: Decimal,
    pub occurrence_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    Weekly,
    Biweekly,
    Monthly,
    Quarterly,
    Annual,
}

impl Cadence {
    /// Canonical gap in days for each cadence (spec §4.2).
    pub fn canonical_gap_days(self) -> f64 {
        match self {
            Self::Weekly => 7.0,
            Self::Biweekly => 14.0,
            Self::Monthly => 30.0,
            Self::Quarterly => 91.0,
            Self::Annual => 365.0,
        }
    }

    /// All cadences ordered shortest-first, used for the documented
    /// "prefer shorter cadence" tie-break (spec §4.2).
    pub fn all_shortest_first() -> [Cadence; 5] {
        [
            Self::Weekly,
            Self::Biweekly,
            Self::Monthly,
            Self::Quarterly,
            Self::Annual,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionSignals {
    pub recurring: Vec<RecurringCharge>,
    pub monthly_recurring_spend: Decimal,
    /// `None` when there were no outflows to normalize against.
    pub share_of_total: Option<Decimal>,
}

/// Per-card credit signals (spec §4.2 credit utilization detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSignals {
    pub account_id: String,
    /// `None` when the card has no positive limit.
    pub utilization: Option<Decimal>,
    pub over_30: bool,
    pub over_50: bool,
    pub over_80: bool,
    pub min_only: bool,
    pub has_interest: bool,
    pub is_overdue: bool,
    /// `None` when utilization or APR data is unavailable.
    pub monthly_interest_estimate: Option<Decimal>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreditSignals {
    pub per_card: Vec<CardSignals>,
    pub aggregate_utilization: Option<Decimal>,
    pub total_monthly_interest: Option<Decimal>,
}

/// Savings detector output (spec §4.2).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsSignals {
    pub net_inflow: Decimal,
    pub growth_rate: Option<Decimal>,
    pub emergency_months_coverage: Option<Decimal>,
    pub has_automated_transfers: bool,
    /// Median of per-calendar-month outflow totals over the 180-day
    /// reference window (spec §4.2), the same derivation
    /// `emergency_months_coverage` divides by. Exposed so downstream
    /// consumers (the counterfactual generators) never have to recompute it.
    pub median_monthly_expense: Option<Decimal>,
}

/// A detected payroll/income event (spec §4.2 income stability detector).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayEvent {
    pub date: chrono::NaiveDate,
    pub amount: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IncomeSignals {
    pub pay_events: Vec<PayEvent>,
    pub median_gap_days: Option<f64>,
    pub variability_cv: Option<f64>,
    pub cash_flow_buffer_months: Option<Decimal>,
    pub has_payroll_ach: bool,
}

/// The full derived signal set for one customer-window (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalBundle {
    pub window_days: u32,
    pub subscriptions: SubscriptionSignals,
    pub credit: CreditSignals,
    pub savings: SavingsSignals,
    pub income: IncomeSignals,
}

impl SignalBundle {
    pub fn empty(window_days: u32) -> Self {
        Self {
            window_days,
            subscriptions: SubscriptionSignals::default(),
            credit: CreditSignals::default(),
            savings: SavingsSignals::default(),
            income: IncomeSignals::default(),
        }
    }
}
