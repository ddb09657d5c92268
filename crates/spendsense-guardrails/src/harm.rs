//! Layer 3: harm filter (spec §4.6).
//!
//! Defense in depth: `spendsense-catalog` already strips blacklisted offers
//! at load time, so in practice this should never fire. It still runs on
//! every candidate so a catalog bug never becomes a customer-visible harm.

use spendsense_core::HarmClass;

use crate::candidate::Candidate;

pub fn check(candidate: &Candidate) -> Result<(), String> {
    let blacklist = HarmClass::blacklist();
    match candidate.harm_class {
        Some(class) if blacklist.contains(&class) => Err("harm_blacklist".to_string()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsense_core::{ItemKind, ItemRef, PersonaType, Rationale};

    fn candidate_with_harm(harm_class: Option<HarmClass>) -> Candidate {
        Candidate {
            item_ref: ItemRef {
                id: "offer_1".into(),
                persona: PersonaType::HighUtilization,
                kind: ItemKind::Offer,
            },
            eligibility: None,
            harm_class,
            rationale: Rationale {
                text: "x".into(),
                citations: vec![],
                used_fallback_template: true,
            },
            persona_confidence: 1.0,
            persona_priority_rank: 0,
        }
    }

    #[test]
    fn clean_offer_passes() {
        assert!(check(&candidate_with_harm(None)).is_ok());
    }

    #[test]
    fn blacklisted_offer_is_rejected() {
        let result = check(&candidate_with_harm(Some(HarmClass::PaydayLoan)));
        assert_eq!(result.unwrap_err(), "harm_blacklist");
    }
}
