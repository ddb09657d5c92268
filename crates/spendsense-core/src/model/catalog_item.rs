//! Catalog item types shared between the catalog (C4), rationale (C5),
//! guardrail (C6), and trace (C8) crates (spec §4.4).

use serde::{Deserialize, Serialize};

use crate::model::persona::PersonaType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Education,
    Offer,
}

/// Harm classes that must never surface at runtime (spec §4.4, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmClass {
    PaydayLoan,
    RefundAnticipationLoan,
    PredatoryOverdraft,
    HighFeeSubprimeCard,
}

impl HarmClass {
    pub fn blacklist() -> [HarmClass; 4] {
        [
            Self::PaydayLoan,
            Self::RefundAnticipationLoan,
            Self::PredatoryOverdraft,
            Self::HighFeeSubprimeCard,
        ]
    }
}

/// A lightweight, trace-friendly reference to a catalog entry: just enough
/// to record which item was shown and why, without re-embedding the full
/// catalog entry (title/body template/eligibility predicate) into every
/// trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: String,
    pub persona: PersonaType,
    pub kind: ItemKind,
}
