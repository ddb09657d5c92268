//! # spendsense-query
//!
//! The Query Layer (C1, spec §4.1): window-bounded, filtered, deterministic
//! reads of accounts, transactions, and credit card liabilities. This
//! crate owns no data; it owns the read contract over whatever
//! `Datastore` the caller supplies (spec §6 "datastore contract").

mod datastore;
mod memory;

pub use datastore::Datastore;
pub use memory::InMemoryDatastore;

use std::collections::BTreeSet;

use chrono::NaiveDate;
use spendsense_core::{
    Account, CreditCardLiability, SpendSenseError, SpendSenseResult, Transaction, Window,
};
use tracing::instrument;

/// The window-bounded read layer (spec §4.1).
pub struct QueryLayer<'a> {
    store: &'a dyn Datastore,
}

impl<'a> QueryLayer<'a> {
    pub fn new(store: &'a dyn Datastore) -> Self {
        Self { store }
    }

    /// Consumer-held accounts for this customer, currency-checked.
    /// Business accounts are excluded unconditionally (spec §3 invariant).
    #[instrument(skip(self))]
    pub fn accounts_for(&self, customer_id: &str) -> SpendSenseResult<Vec<Account>> {
        let mut accounts: Vec<Account> = self
            .store
            .accounts(customer_id)?
            .into_iter()
            .filter(Account::is_consumer)
            .collect();

        accounts.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        check_single_currency(customer_id, accounts.iter().map(|a| a.currency_code.as_str()))?;
        Ok(accounts)
    }

    /// Transactions for this customer's consumer accounts within
    /// `[window.start, window.end)`, ordered `(account_id, date asc)`.
    /// Pending transactions are excluded unless `include_pending` is set.
    #[instrument(skip(self))]
    pub fn transactions_for(
        &self,
        customer_id: &str,
        window: Window,
        include_pending: bool,
    ) -> SpendSenseResult<Vec<Transaction>> {
        let consumer_account_ids: BTreeSet<String> = self
            .accounts_for(customer_id)?
            .into_iter()
            .map(|a| a.account_id)
            .collect();

        let today = window.end;
        let mut transactions: Vec<Transaction> = self
            .store
            .transactions(customer_id)?
            .into_iter()
            .filter(|t| consumer_account_ids.contains(&t.account_id))
            .filter(|t| include_pending || !t.pending)
            .filter(|t| window.contains(t.date))
            .collect();

        for txn in &transactions {
            txn.validate(today)?;
        }

        check_single_currency(customer_id, transactions.iter().map(|t| t.currency_code.as_str()))?;

        transactions.sort_by(|a, b| (a.account_id.as_str(), a.date).cmp(&(b.account_id.as_str(), b.date)));
        Ok(transactions)
    }

    /// Credit card liabilities for this customer's consumer credit
    /// accounts.
    #[instrument(skip(self))]
    pub fn liabilities_for(&self, customer_id: &str) -> SpendSenseResult<Vec<CreditCardLiability>> {
        let consumer_account_ids: BTreeSet<String> = self
            .accounts_for(customer_id)?
            .into_iter()
            .map(|a| a.account_id)
            .collect();

        let mut liabilities: Vec<CreditCardLiability> = self
            .store
            .liabilities(customer_id)?
            .into_iter()
            .filter(|l| consumer_account_ids.contains(&l.account_id))
            .collect();

        liabilities.sort_by(|a, b| a.account_id.cmp(&b.account_id));
        Ok(liabilities)
    }

    /// Convenience: today's date as seen by this query (used to compute
    /// the two canonical windows). Exposed so the pipeline can pin `now`
    /// once per run for determinism.
    pub fn canonical_windows(now: NaiveDate) -> (Window, Window) {
        (Window::canonical_30d(now), Window::canonical_180d(now))
    }
}

fn check_single_currency<'c>(
    customer_id: &str,
    codes: impl Iterator<Item = &'c str>,
) -> SpendSenseResult<()> {
    let distinct: BTreeSet<&str> = codes.collect();
    if distinct.len() > 1 {
        return Err(SpendSenseError::MixedCurrency {
            customer_id: customer_id.to_string(),
            currencies: distinct.into_iter().map(str::to_string).collect(),
        });
    }
    Ok(())
}
