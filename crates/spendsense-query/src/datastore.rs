//! The datastore contract consumed by the Query Layer (spec §6).

use spendsense_core::{Account, CreditCardLiability, SpendSenseResult, Transaction};

/// Unfiltered, unwindowed reads against the raw tables/collections named
/// in spec §6: `accounts`, `transactions`, `credit_card_liabilities`.
/// Filtering (consumer-only, pending, currency, window) is the Query
/// Layer's job, not the datastore's -- this trait is deliberately thin so
/// any ingestion collaborator's storage can implement it directly.
pub trait Datastore: Send + Sync {
    fn accounts(&self, customer_id: &str) -> SpendSenseResult<Vec<Account>>;
    fn transactions(&self, customer_id: &str) -> SpendSenseResult<Vec<Transaction>>;
    fn liabilities(&self, customer_id: &str) -> SpendSenseResult<Vec<CreditCardLiability>>;
}
