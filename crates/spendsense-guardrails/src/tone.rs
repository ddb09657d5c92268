//! Layer 4: tone validator (spec §4.6).
//!
//! Reuses the same shaming-language lexicon the rationale composer (C5)
//! uses to judge LLM output, so there is exactly one definition of
//! "shaming language" in the whole pipeline.

use spendsense_rationale::contains_shaming_language;

use crate::candidate::Candidate;

pub fn check(candidate: &Candidate) -> Result<(), String> {
    match contains_shaming_language(&candidate.rationale.text) {
        Some(phrase) => Err(format!("tone_violation:{phrase}")),
        None => Ok(()),
    }
}
