//! Transaction model (spec §3).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SpendSenseError, SpendSenseResult};

/// The channel a transaction was conducted through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentChannel {
    Online,
    InStore,
    Atm,
    Other,
}

/// Plaid-style personal finance category. `detailed` carries the
/// dotted/underscored sub-category (e.g. `INTEREST_CHARGE`, `LATE_FEE`);
/// it is left as free text because the enumeration is large and
/// externally maintained, but `primary` is a closed set we key off of
/// directly in the income detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalFinanceCategory {
    pub primary: PfcPrimary,
    pub detailed: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PfcPrimary {
    Income,
    TransferIn,
    TransferOut,
    LoanPayments,
    BankFees,
    Entertainment,
    FoodAndDrink,
    GeneralMerchandise,
    HomeImprovement,
    Medical,
    PersonalCare,
    GeneralServices,
    Government,
    Transportation,
    Travel,
    Rent,
    #[serde(other)]
    Other,
}

impl PersonalFinanceCategory {
    pub fn is_interest_charge(&self) -> bool {
        self.detailed.eq_ignore_ascii_case("INTEREST_CHARGE")
            || self.detailed.eq_ignore_ascii_case("BANK_FEES_INTEREST_CHARGE")
    }

    pub fn is_late_fee(&self) -> bool {
        self.detailed.eq_ignore_ascii_case("LATE_FEE")
            || self.detailed.eq_ignore_ascii_case("BANK_FEES_LATE_FEE")
    }
}

/// Exactly one of these identifies the counterparty merchant, never both
/// (spec §3 invariant); modeling this as a tagged variant makes the
/// "missing attribute" failure mode unrepresentable (spec §9).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MerchantRef {
    Name(String),
    EntityId(String),
}

impl MerchantRef {
    /// A stable grouping key for recurrence detection: prefer the entity
    /// id when present, otherwise the merchant name.
    pub fn group_key(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::EntityId(id) => id,
        }
    }
}

/// A single posted or pending transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub account_id: String,
    pub date: NaiveDate,
    /// Positive = debit/outflow, negative = credit/inflow.
    pub amount: Decimal,
    pub merchant: MerchantRef,
    pub payment_channel: PaymentChannel,
    pub personal_finance_category: PersonalFinanceCategory,
    pub pending: bool,
    pub currency_code: String,
}

impl Transaction {
    /// Validate the spec §3 invariants that the Query Layer enforces at
    /// ingestion boundary: `amount != 0` and `date` not in the future.
    pub fn validate(&self, today: NaiveDate) -> SpendSenseResult<()> {
        if self.amount == Decimal::ZERO {
            return Err(SpendSenseError::data_integrity(format!(
                "transaction {} has a zero amount",
                self.transaction_id
            )));
        }
        if self.date > today {
            return Err(SpendSenseError::data_integrity(format!(
                "transaction {} is dated in the future ({})",
                self.transaction_id, self.date
            )));
        }
        Ok(())
    }

    pub fn is_outflow(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_inflow(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Absolute amount, useful once direction has already been established.
    pub fn abs_amount(&self) -> Decimal {
        self.amount.abs()
    }

    /// Stable sort key used by every detector to keep output deterministic
    /// (spec §4.2 "no random tiebreaks"): `(merchant, date, transaction_id)`.
    pub fn stable_key(&self) -> (&str, NaiveDate, &str) {
        (self.merchant.group_key(), self.date, &self.transaction_id)
    }
}
