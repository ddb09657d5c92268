//! Account and credit-card-liability models (spec §3).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SpendSenseError, SpendSenseResult};

/// Top-level Plaid-style account type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Depository,
    Credit,
    Loan,
    Investment,
    Other,
}

/// Account subtype, used by detectors to select savings-class / credit-class
/// accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountSubtype {
    Checking,
    Savings,
    CreditCard,
    MoneyMarket,
    Hsa,
    CashManagement,
    Mortgage,
    Student,
    Auto,
    Other,
}

impl AccountSubtype {
    /// Savings-class subtypes feed the savings detector (spec §4.2).
    pub fn is_savings_class(self) -> bool {
        matches!(
            self,
            Self::Savings | Self::MoneyMarket | Self::Hsa | Self::CashManagement
        )
    }
}

/// Whether the account holder is a consumer or a business. Business
/// accounts are excluded from all core analysis (spec §3 invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolderCategory {
    Consumer,
    Business,
}

/// Account balances. `limit` is only meaningful for credit accounts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub available: Option<Decimal>,
    pub current: Decimal,
    pub limit: Option<Decimal>,
}

/// A single financial account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub account_id: String,
    pub customer_id: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub subtype: AccountSubtype,
    pub balances: Balances,
    pub currency_code: String,
    pub holder_category: HolderCategory,
}

impl Account {
    /// Construct an account, enforcing the invariants from spec §3:
    /// credit accounts require a limit, and `limit >= current` when present.
    pub fn new(
        account_id: impl Into<String>,
        customer_id: impl Into<String>,
        account_type: AccountType,
        subtype: AccountSubtype,
        balances: Balances,
        currency_code: impl Into<String>,
        holder_category: HolderCategory,
    ) -> SpendSenseResult<Self> {
        if account_type == AccountType::Credit && balances.limit.is_none() {
            return Err(SpendSenseError::data_integrity(
                "credit accounts require a balance limit",
            ));
        }
        if let Some(limit) = balances.limit {
            if limit < balances.current {
                return Err(SpendSenseError::data_integrity(format!(
                    "account balance limit {limit} is less than current balance {}",
                    balances.current
                )));
            }
        }
        Ok(Self {
            account_id: account_id.into(),
            customer_id: customer_id.into(),
            account_type,
            subtype,
            balances,
            currency_code: currency_code.into(),
            holder_category,
        })
    }

    pub fn is_consumer(&self) -> bool {
        self.holder_category == HolderCategory::Consumer
    }

    /// Utilization (current / limit) for credit accounts with a positive
    /// limit. Returns `None` rather than dividing by zero (spec §4.2).
    pub fn utilization(&self) -> Option<Decimal> {
        let limit = self.balances.limit?;
        if limit <= Decimal::ZERO {
            return None;
        }
        Some(self.balances.current / limit)
    }
}

/// APR type on a credit card liability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AprType {
    Purchase,
    BalanceTransfer,
    CashAdvance,
}

/// A single APR entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Apr {
    #[serde(rename = "type")]
    pub apr_type: AprType,
    /// Percentage in `[0, 100]`.
    pub percentage: Decimal,
}

/// Credit-card-specific liability data (spec §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCardLiability {
    pub account_id: String,
    pub aprs: Vec<Apr>,
    pub minimum_payment_amount: Decimal,
    pub last_payment_amount: Option<Decimal>,
    pub is_overdue: bool,
    pub next_payment_due_date: Option<chrono::NaiveDate>,
    pub last_statement_balance: Option<Decimal>,
}

impl CreditCardLiability {
    pub fn apr_for(&self, apr_type: AprType) -> Option<Decimal> {
        self.aprs
            .iter()
            .find(|a| a.apr_type == apr_type)
            .map(|a| a.percentage)
    }

    pub fn purchase_apr(&self) -> Option<Decimal> {
        self.apr_for(AprType::Purchase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn credit_account_requires_limit() {
        let result = Account::new(
            "acc_1",
            "cust_1",
            AccountType::Credit,
            AccountSubtype::CreditCard,
            Balances {
                available: None,
                current: dec!(100),
                limit: None,
            },
            "USD",
            HolderCategory::Consumer,
        );
        assert!(result.is_err());
    }

    #[test]
    fn limit_must_cover_current_balance() {
        let result = Account::new(
            "acc_1",
            "cust_1",
            AccountType::Credit,
            AccountSubtype::CreditCard,
            Balances {
                available: None,
                current: dec!(500),
                limit: Some(dec!(100)),
            },
            "USD",
            HolderCategory::Consumer,
        );
        assert!(result.is_err());
    }

    #[test]
    fn utilization_is_none_for_zero_limit() {
        let account = Account::new(
            "acc_1",
            "cust_1",
            AccountType::Credit,
            AccountSubtype::CreditCard,
            Balances {
                available: None,
                current: dec!(0),
                limit: Some(dec!(0)),
            },
            "USD",
            HolderCategory::Consumer,
        )
        .unwrap();
        assert_eq!(account.utilization(), None);
    }

    #[test]
    fn utilization_matches_scenario_1() {
        let account = Account::new(
            "acc_1",
            "cust_1",
            AccountType::Credit,
            AccountSubtype::CreditCard,
            Balances {
                available: None,
                current: dec!(3400),
                limit: Some(dec!(5000)),
            },
            "USD",
            HolderCategory::Consumer,
        )
        .unwrap();
        assert_eq!(account.utilization(), Some(dec!(0.68)));
    }
}
