//! Consent model and lifecycle (spec §3, §6).
//!
//! The consent store is the one piece of durable mutable state the
//! pipeline depends on (spec §5); this module models the record and its
//! transition history, append-only. The store *implementation* (locking,
//! persistence) lives in `spendsense-pipeline`, which is the only crate
//! allowed to mutate it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    Pending,
    Active,
    Revoked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentScope {
    All,
    Recommendations,
    Calculators,
    Chat,
}

impl ConsentScope {
    /// Whether this scope covers the recommendation pipeline.
    pub fn covers_recommendations(self) -> bool {
        matches!(self, Self::All | Self::Recommendations)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsentAction {
    Grant,
    Revoke,
}

/// One entry in the append-only consent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentEvent {
    pub action: ConsentAction,
    pub scope: ConsentScope,
    pub at: DateTime<Utc>,
}

/// The current consent record for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consent {
    pub customer_id: String,
    pub status: ConsentStatus,
    pub scope: ConsentScope,
    pub granted_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
    pub history: Vec<ConsentEvent>,
}

impl Consent {
    /// A brand-new customer starts `pending` (spec §3 lifecycle).
    pub fn pending(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            status: ConsentStatus::Pending,
            scope: ConsentScope::Recommendations,
            granted_at: None,
            revoked_at: None,
            history: Vec::new(),
        }
    }

    /// Explicit grant transition; appends to history (spec §3).
    pub fn grant(&mut self, scope: ConsentScope, at: DateTime<Utc>) {
        self.status = ConsentStatus::Active;
        self.scope = scope;
        self.granted_at = Some(at);
        self.history.push(ConsentEvent {
            action: ConsentAction::Grant,
            scope,
            at,
        });
    }

    /// Explicit revoke transition; appends to history. `scope` defaults to
    /// the currently granted scope if not provided, matching the
    /// `revoke(customer_id, scope?)` signature in spec §6.
    pub fn revoke(&mut self, scope: Option<ConsentScope>, at: DateTime<Utc>) {
        let scope = scope.unwrap_or(self.scope);
        self.status = ConsentStatus::Revoked;
        self.revoked_at = Some(at);
        self.history.push(ConsentEvent {
            action: ConsentAction::Revoke,
            scope,
            at,
        });
    }

    /// Whether recommendations may be generated under this consent record
    /// right now (spec §4.6 layer 1, §8 "`revoked` => empty recommendations").
    pub fn allows_recommendations(&self) -> bool {
        self.status == ConsentStatus::Active && self.scope.covers_recommendations()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    #[test]
    fn grant_revoke_grant_leaves_three_history_events() {
        let mut consent = Consent::pending("cust_1");
        consent.grant(ConsentScope::All, at(1));
        consent.revoke(None, at(2));
        consent.grant(ConsentScope::All, at(3));

        assert_eq!(consent.history.len(), 3);
        assert_eq!(consent.history[0].action, ConsentAction::Grant);
        assert_eq!(consent.history[1].action, ConsentAction::Revoke);
        assert_eq!(consent.history[2].action, ConsentAction::Grant);
        assert!(consent.allows_recommendations());
    }

    #[test]
    fn revoked_consent_disallows_recommendations() {
        let mut consent = Consent::pending("cust_1");
        consent.grant(ConsentScope::Recommendations, at(1));
        consent.revoke(None, at(2));
        assert!(!consent.allows_recommendations());
    }

    #[test]
    fn scope_limited_to_calculators_does_not_cover_recommendations() {
        let mut consent = Consent::pending("cust_1");
        consent.grant(ConsentScope::Calculators, at(1));
        assert!(!consent.allows_recommendations());
    }
}
