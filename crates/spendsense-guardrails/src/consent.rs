//! Layer 1: consent gate (spec §4.6).
//!
//! When consent does not cover recommendations, the entire pipeline
//! short-circuits to an empty recommendation set; no signals are
//! recomputed and no prior trace is disclosed. The orchestrator
//! (`spendsense-pipeline`) calls this before running C2-C8 at all; it is
//! exposed here, rather than inlined in the orchestrator, so the rule lives
//! in one place alongside the other four layers.

use spendsense_core::Consent;

pub const CONSENT_MISSING_REASON: &str = "consent_missing";

pub fn consent_allows_recommendations(consent: &Consent) -> bool {
    consent.allows_recommendations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use spendsense_core::ConsentScope;

    #[test]
    fn pending_consent_blocks() {
        let consent = Consent::pending("cust_1");
        assert!(!consent_allows_recommendations(&consent));
    }

    #[test]
    fn active_recommendations_scope_allows() {
        let mut consent = Consent::pending("cust_1");
        consent.grant(ConsentScope::Recommendations, Utc::now());
        assert!(consent_allows_recommendations(&consent));
    }
}
