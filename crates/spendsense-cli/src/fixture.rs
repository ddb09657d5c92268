//! Loads a flat JSON fixture file into an `InMemoryDatastore` for local
//! runs and demos. Not part of the spec's datastore contract itself --
//! production deployments supply their own `Datastore` impl over a real
//! warehouse; this is the CLI's stand-in.

use std::path::Path;

use serde::Deserialize;
use spendsense_core::{Account, CreditCardLiability, Transaction};
use spendsense_query::InMemoryDatastore;

#[derive(Debug, Deserialize)]
struct TransactionRecord {
    customer_id: String,
    #[serde(flatten)]
    transaction: Transaction,
}

#[derive(Debug, Deserialize)]
struct LiabilityRecord {
    customer_id: String,
    #[serde(flatten)]
    liability: CreditCardLiability,
}

#[derive(Debug, Deserialize, Default)]
struct Fixture {
    #[serde(default)]
    accounts: Vec<Account>,
    #[serde(default)]
    transactions: Vec<TransactionRecord>,
    #[serde(default)]
    liabilities: Vec<LiabilityRecord>,
}

pub fn load(path: &Path) -> anyhow::Result<InMemoryDatastore> {
    let content = std::fs::read_to_string(path)?;
    let fixture: Fixture = serde_json::from_str(&content)?;

    let mut datastore = InMemoryDatastore::new();
    for account in fixture.accounts {
        datastore = datastore.with_account(account);
    }
    for record in fixture.transactions {
        datastore = datastore.with_transaction(record.customer_id, record.transaction);
    }
    for record in fixture.liabilities {
        datastore = datastore.with_liability(record.customer_id, record.liability);
    }
    Ok(datastore)
}
