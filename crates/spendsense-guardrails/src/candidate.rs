//! The unit the guardrail stack operates on: one candidate item plus
//! everything the five layers need to judge it, assembled by the
//! orchestrator from C4's catalog selection and C5's rationale.

use spendsense_core::{HarmClass, ItemRef, Rationale};
use spendsense_catalog::EligibilityPredicate;

#[derive(Debug, Clone)]
pub struct Candidate {
    pub item_ref: ItemRef,
    /// `None` for education items, which spec §4.4 does not gate on
    /// eligibility; `Some` for offers.
    pub eligibility: Option<EligibilityPredicate>,
    pub harm_class: Option<HarmClass>,
    pub rationale: Rationale,
    pub persona_confidence: f64,
    /// 0 = highest-priority persona (spec §4.3 fixed order), increasing
    /// thereafter. Used to weight final ordering.
    pub persona_priority_rank: usize,
}
