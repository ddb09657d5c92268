//! The consent store (spec §5 "shared resources"): the only piece of
//! shared mutable state in the pipeline. Reads/writes are linearizable
//! per `customer_id`; a single mutex guarding the whole map satisfies the
//! spec's "single-writer discipline is acceptable" note without needing
//! per-customer lock striping.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use spendsense_core::{Consent, ConsentScope, SpendSenseResult};

pub trait ConsentStore: Send + Sync {
    fn status(&self, customer_id: &str) -> SpendSenseResult<Consent>;
    fn grant(&self, customer_id: &str, scope: ConsentScope, at: DateTime<Utc>) -> SpendSenseResult<Consent>;
    fn revoke(&self, customer_id: &str, scope: Option<ConsentScope>, at: DateTime<Utc>) -> SpendSenseResult<Consent>;
}

pub struct InMemoryConsentStore {
    records: Mutex<HashMap<String, Consent>>,
}

impl InMemoryConsentStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConsentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsentStore for InMemoryConsentStore {
    fn status(&self, customer_id: &str) -> SpendSenseResult<Consent> {
        let records = self.records.lock().expect("consent store lock poisoned");
        Ok(records
            .get(customer_id)
            .cloned()
            .unwrap_or_else(|| Consent::pending(customer_id)))
    }

    fn grant(&self, customer_id: &str, scope: ConsentScope, at: DateTime<Utc>) -> SpendSenseResult<Consent> {
        let mut records = self.records.lock().expect("consent store lock poisoned");
        let consent = records
            .entry(customer_id.to_string())
            .or_insert_with(|| Consent::pending(customer_id));
        consent.grant(scope, at);
        Ok(consent.clone())
    }

    fn revoke(&self, customer_id: &str, scope: Option<ConsentScope>, at: DateTime<Utc>) -> SpendSenseResult<Consent> {
        let mut records = self.records.lock().expect("consent store lock poisoned");
        let consent = records
            .entry(customer_id.to_string())
            .or_insert_with(|| Consent::pending(customer_id));
        consent.revoke(scope, at);
        Ok(consent.clone())
    }
}
