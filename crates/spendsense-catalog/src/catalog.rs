//! Static content/offer catalogs (spec §4.4).
//!
//! Catalogs are process-wide immutable configuration: built once at startup
//! (either the built-in default or loaded from a file) and passed by
//! reference through the rest of the pipeline (spec §5 "global state").

use serde::{Deserialize, Serialize};
use spendsense_core::{HarmClass, ItemKind, ItemRef, PersonaType, SpendSenseError, SpendSenseResult};

use crate::eligibility::EligibilityPredicate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

/// A persona-targeted education entry (spec §4.4).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationItem {
    pub id: String,
    pub persona: PersonaType,
    pub title: String,
    /// Placeholders like `{median_gap_days}` are filled in by C5 from the
    /// customer's own signal bundle, never from free text.
    pub body_template: String,
    pub difficulty: Difficulty,
    pub est_minutes: u32,
    pub tags: Vec<String>,
}

impl EducationItem {
    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id.clone(),
            persona: self.persona,
            kind: ItemKind::Education,
        }
    }
}

/// A persona-targeted partner offer (spec §4.4). Carries both an
/// eligibility predicate and a harm classification so the guardrail stack
/// can enforce both independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfferItem {
    pub id: String,
    pub persona: PersonaType,
    pub title: String,
    pub body_template: String,
    pub difficulty: Difficulty,
    pub est_minutes: u32,
    pub tags: Vec<String>,
    pub eligibility: EligibilityPredicate,
    pub harm_class: Option<HarmClass>,
}

impl OfferItem {
    pub fn item_ref(&self) -> ItemRef {
        ItemRef {
            id: self.id.clone(),
            persona: self.persona,
            kind: ItemKind::Offer,
        }
    }
}

/// The two catalogs, loaded once and held immutably for the life of the
/// process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub education: Vec<EducationItem>,
    pub offers: Vec<OfferItem>,
}

impl Catalog {
    /// Parse a catalog from JSON or YAML source, then strip and log any
    /// entry tagged in the harm blacklist (spec §4.4: "removed at
    /// catalog-load time with a warning -- it must never surface at
    /// runtime"). This never fails on a blacklisted entry; it only fails on
    /// malformed source or a persona left without its guaranteed entry
    /// counts after stripping (see `validate`).
    pub fn from_yaml_str(source: &str) -> SpendSenseResult<Self> {
        let raw: Catalog = serde_yaml::from_str(source)
            .map_err(|e| SpendSenseError::config(format!("catalog parse error: {e}")))?;
        Ok(raw.strip_blacklisted())
    }

    pub fn from_json_str(source: &str) -> SpendSenseResult<Self> {
        let raw: Catalog = serde_json::from_str(source)
            .map_err(|e| SpendSenseError::config(format!("catalog parse error: {e}")))?;
        Ok(raw.strip_blacklisted())
    }

    fn strip_blacklisted(mut self) -> Self {
        let blacklist = HarmClass::blacklist();
        let before = self.offers.len();
        self.offers.retain(|offer| match offer.harm_class {
            Some(class) if blacklist.contains(&class) => {
                tracing::warn!(offer_id = %offer.id, harm_class = ?class, "removed blacklisted offer at catalog load");
                false
            }
            _ => true,
        });
        if self.offers.len() != before {
            tracing::warn!(removed = before - self.offers.len(), "catalog load stripped blacklisted offers");
        }
        self
    }

    pub fn education_for(&self, persona: PersonaType) -> Vec<&EducationItem> {
        self.education.iter().filter(|e| e.persona == persona).collect()
    }

    pub fn offers_for(&self, persona: PersonaType) -> Vec<&OfferItem> {
        self.offers.iter().filter(|o| o.persona == persona).collect()
    }

    /// The built-in default catalog, shipped in-process so the pipeline has
    /// a usable catalog with no external file. Production deployments may
    /// instead load from a file via `from_yaml_str`/`from_json_str`.
    pub fn default_catalog() -> Self {
        crate::defaults::build_default_catalog()
    }
}
