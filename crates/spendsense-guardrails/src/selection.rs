//! Final selection cap and ordering (spec §4.6): 3-5 education items, 1-3
//! offers, ordered by persona priority weight x confidence, ties broken by
//! catalog id ascending.

use spendsense_core::ItemKind;

use crate::candidate::Candidate;

/// Higher for higher-priority personas (rank 0) so the weighting favors
/// primary-persona items over secondary-persona ones at equal confidence.
fn priority_weight(rank: usize) -> f64 {
    (5usize.saturating_sub(rank)) as f64
}

fn score(candidate: &Candidate) -> f64 {
    priority_weight(candidate.persona_priority_rank) * candidate.persona_confidence
}

fn sort_by_score_then_id(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        score(b)
            .partial_cmp(&score(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item_ref.id.cmp(&b.item_ref.id))
    });
}

/// Splits the surviving candidates into capped, ordered education and offer
/// lists. `max_education`/`max_offers` come from `SpendSenseConfig`'s
/// `SelectionCaps`.
pub fn select(mut candidates: Vec<Candidate>, max_education: usize, max_offers: usize) -> (Vec<Candidate>, Vec<Candidate>) {
    sort_by_score_then_id(&mut candidates);

    let mut education = Vec::new();
    let mut offers = Vec::new();
    for candidate in candidates {
        match candidate.item_ref.kind {
            ItemKind::Education if education.len() < max_education => education.push(candidate),
            ItemKind::Offer if offers.len() < max_offers => offers.push(candidate),
            _ => {}
        }
    }
    (education, offers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsense_core::{ItemRef, PersonaType, Rationale};

    fn candidate(id: &str, kind: ItemKind, confidence: f64, rank: usize) -> Candidate {
        Candidate {
            item_ref: ItemRef {
                id: id.to_string(),
                persona: PersonaType::SavingsBuilder,
                kind,
            },
            eligibility: None,
            harm_class: None,
            rationale: Rationale {
                text: "x".into(),
                citations: vec![],
                used_fallback_template: true,
            },
            persona_confidence: confidence,
            persona_priority_rank: rank,
        }
    }

    #[test]
    fn caps_each_kind_independently() {
        let candidates = vec![
            candidate("edu_a", ItemKind::Education, 1.0, 0),
            candidate("edu_b", ItemKind::Education, 0.9, 0),
            candidate("edu_c", ItemKind::Education, 0.8, 0),
            candidate("edu_d", ItemKind::Education, 0.7, 0),
            candidate("off_a", ItemKind::Offer, 1.0, 0),
            candidate("off_b", ItemKind::Offer, 0.9, 0),
        ];
        let (education, offers) = select(candidates, 3, 1);
        assert_eq!(education.len(), 3);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].item_ref.id, "off_a");
    }

    #[test]
    fn ties_break_on_ascending_catalog_id() {
        let candidates = vec![
            candidate("edu_z", ItemKind::Education, 0.5, 0),
            candidate("edu_a", ItemKind::Education, 0.5, 0),
        ];
        let (education, _) = select(candidates, 5, 3);
        assert_eq!(education[0].item_ref.id, "edu_a");
    }

    #[test]
    fn higher_priority_persona_outranks_equal_confidence() {
        let candidates = vec![
            candidate("edu_low_priority", ItemKind::Education, 0.5, 4),
            candidate("edu_high_priority", ItemKind::Education, 0.5, 0),
        ];
        let (education, _) = select(candidates, 5, 3);
        assert_eq!(education[0].item_ref.id, "edu_high_priority");
    }
}
