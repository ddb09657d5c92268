//! Tone selection and the shaming-language lexicon (spec §4.5, §4.6).
//!
//! The lexicon is shared between the rationale composer (which uses it to
//! decide whether an LLM collaborator's output is even eligible to replace
//! the deterministic template) and the guardrail stack's tone validator
//! (which re-checks every rationale, LLM or template, before it can reach a
//! customer). There is exactly one copy of the matching logic.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Supportive,
    Neutral,
    Educational,
    Empowering,
    Gentle,
}

impl Default for Tone {
    fn default() -> Self {
        Tone::Neutral
    }
}

/// Closed list of shaming phrases (spec §4.6). Matching is case-insensitive,
/// whitespace-normalized (runs of whitespace collapse to a single space
/// before comparison), and word-boundary aware so e.g. "afford" alone does
/// not match "you can't afford".
const SHAMING_PHRASES: &[&str] = &[
    "wasting",
    "stop overspending",
    "you can't afford",
    "you cannot afford",
    "reckless spending",
    "bad with money",
    "financially irresponsible",
];

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_word_boundary(byte: Option<char>) -> bool {
    byte.map(|c| !c.is_alphanumeric()).unwrap_or(true)
}

fn contains_phrase_at_word_boundary(haystack: &str, phrase: &str) -> bool {
    let mut start = 0;
    while let Some(found) = haystack[start..].find(phrase) {
        let abs = start + found;
        let before = haystack[..abs].chars().next_back();
        let after = haystack[abs + phrase.len()..].chars().next();
        if is_word_boundary(before) && is_word_boundary(after) {
            return true;
        }
        start = abs + 1;
        if start >= haystack.len() {
            break;
        }
    }
    false
}

/// Returns the first matching shaming phrase found in `text`, if any.
pub fn contains_shaming_language(text: &str) -> Option<&'static str> {
    let normalized = normalize_whitespace(text).to_ascii_lowercase();
    SHAMING_PHRASES
        .iter()
        .find(|phrase| contains_phrase_at_word_boundary(&normalized, phrase))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_exact_phrase() {
        assert_eq!(contains_shaming_language("You are wasting money."), Some("wasting"));
    }

    #[test]
    fn case_insensitive_and_whitespace_normalized() {
        assert!(contains_shaming_language("STOP   Overspending   now").is_some());
    }

    #[test]
    fn word_boundary_avoids_substring_false_positive() {
        assert_eq!(contains_shaming_language("affordable options exist"), None);
    }

    #[test]
    fn clean_text_has_no_match() {
        assert_eq!(
            contains_shaming_language("Your utilization is above 50 percent this month."),
            None
        );
    }
}
