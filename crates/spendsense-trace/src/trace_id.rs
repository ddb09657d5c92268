//! Trace id allocation (spec §4.8): `trace_id = hash(customer_id, timestamp_ns)`.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

pub fn allocate(customer_id: &str, timestamp: DateTime<Utc>) -> String {
    let timestamp_ns = timestamp.timestamp_nanos_opt().unwrap_or_else(|| timestamp.timestamp() * 1_000_000_000);
    let mut hasher = Sha256::new();
    hasher.update(customer_id.as_bytes());
    hasher.update(b":");
    hasher.update(timestamp_ns.to_le_bytes());
    let digest = hasher.finalize();
    format!("trc_{}", hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn same_inputs_produce_same_id() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_eq!(allocate("cust_1", ts), allocate("cust_1", ts));
    }

    #[test]
    fn different_customers_produce_different_ids() {
        let ts = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        assert_ne!(allocate("cust_1", ts), allocate("cust_2", ts));
    }

    #[test]
    fn different_timestamps_produce_different_ids() {
        let ts1 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let ts2 = Utc.timestamp_opt(1_700_000_001, 0).unwrap();
        assert_ne!(allocate("cust_1", ts1), allocate("cust_1", ts2));
    }
}
