//! A restartable, deterministic in-memory `Datastore`, used by tests, the
//! CLI fixture loader, and anyone embedding the pipeline without a real
//! database.

use std::collections::HashMap;

use spendsense_core::{Account, CreditCardLiability, SpendSenseResult, Transaction};

use crate::datastore::Datastore;

#[derive(Debug, Default, Clone)]
pub struct InMemoryDatastore {
    accounts: HashMap<String, Vec<Account>>,
    transactions: HashMap<String, Vec<Transaction>>,
    liabilities: HashMap<String, Vec<CreditCardLiability>>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, account: Account) -> Self {
        self.accounts
            .entry(account.customer_id.clone())
            .or_default()
            .push(account);
        self
    }

    pub fn with_transaction(mut self, customer_id: impl Into<String>, txn: Transaction) -> Self {
        self.transactions
            .entry(customer_id.into())
            .or_default()
            .push(txn);
        self
    }

    pub fn with_liability(mut self, customer_id: impl Into<String>, liability: CreditCardLiability) -> Self {
        self.liabilities
            .entry(customer_id.into())
            .or_default()
            .push(liability);
        self
    }
}

impl Datastore for InMemoryDatastore {
    fn accounts(&self, customer_id: &str) -> SpendSenseResult<Vec<Account>> {
        Ok(self.accounts.get(customer_id).cloned().unwrap_or_default())
    }

    fn transactions(&self, customer_id: &str) -> SpendSenseResult<Vec<Transaction>> {
        Ok(self
            .transactions
            .get(customer_id)
            .cloned()
            .unwrap_or_default())
    }

    fn liabilities(&self, customer_id: &str) -> SpendSenseResult<Vec<CreditCardLiability>> {
        Ok(self
            .liabilities
            .get(customer_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QueryLayer;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use spendsense_core::{
        AccountSubtype, AccountType, Balances, HolderCategory, MerchantRef, PaymentChannel,
        PersonalFinanceCategory, PfcPrimary, Window,
    };

    fn checking(customer_id: &str) -> Account {
        Account::new(
            "acc_checking",
            customer_id,
            AccountType::Depository,
            AccountSubtype::Checking,
            Balances {
                available: Some(dec!(1000)),
                current: dec!(1000),
                limit: None,
            },
            "USD",
            HolderCategory::Consumer,
        )
        .unwrap()
    }

    fn business_account(customer_id: &str) -> Account {
        Account::new(
            "acc_biz",
            customer_id,
            AccountType::Depository,
            AccountSubtype::Checking,
            Balances {
                available: Some(dec!(5000)),
                current: dec!(5000),
                limit: None,
            },
            "USD",
            HolderCategory::Business,
        )
        .unwrap()
    }

    fn txn(account_id: &str, date: NaiveDate, amount: rust_decimal::Decimal) -> Transaction {
        Transaction {
            transaction_id: format!("{account_id}-{date}"),
            account_id: account_id.to_string(),
            date,
            amount,
            merchant: MerchantRef::Name("Acme".into()),
            payment_channel: PaymentChannel::Online,
            personal_finance_category: PersonalFinanceCategory {
                primary: PfcPrimary::GeneralMerchandise,
                detailed: "GENERAL".into(),
            },
            pending: false,
            currency_code: "USD".into(),
        }
    }

    #[test]
    fn business_accounts_are_excluded() {
        let store = InMemoryDatastore::new()
            .with_account(checking("cust_1"))
            .with_account(business_account("cust_1"));
        let query = QueryLayer::new(&store);
        let accounts = query.accounts_for("cust_1").unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].account_id, "acc_checking");
    }

    #[test]
    fn transactions_are_windowed_and_ordered() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 28).unwrap();
        let store = InMemoryDatastore::new()
            .with_account(checking("cust_1"))
            .with_transaction("cust_1", txn("acc_checking", today - chrono::Duration::days(5), dec!(10)))
            .with_transaction("cust_1", txn("acc_checking", today - chrono::Duration::days(40), dec!(20)));
        let query = QueryLayer::new(&store);
        let window = spendsense_core::Window::canonical_30d(today);
        let transactions = query.transactions_for("cust_1", window, false).unwrap();
        assert_eq!(transactions.len(), 1);
    }

    #[test]
    fn mixed_currency_fails_closed() {
        let mut usd_txn = txn("acc_checking", NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), dec!(10));
        usd_txn.currency_code = "USD".into();
        let mut eur_txn = txn("acc_checking", NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(), dec!(10));
        eur_txn.currency_code = "EUR".into();
        let store = InMemoryDatastore::new()
            .with_account(checking("cust_1"))
            .with_transaction("cust_1", usd_txn)
            .with_transaction("cust_1", eur_txn);
        let query = QueryLayer::new(&store);
        let window = Window::ending_at(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(), 60);
        let result = query.transactions_for("cust_1", window, false);
        assert!(matches!(result, Err(spendsense_core::SpendSenseError::MixedCurrency { .. })));
    }
}
