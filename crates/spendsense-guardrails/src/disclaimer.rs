//! Layer 5: disclaimer affixer (spec §4.6).
//!
//! The exact text is a test-sensitive contract: any deviation, including
//! punctuation, is a defect.

pub const DISCLAIMER_TEXT: &str =
    "This is educational content, not financial advice. Consult a licensed advisor for personalized guidance.";

/// Appends the disclaimer, separated by a space, unless it is already
/// present (idempotent so a retried affix never double-appends).
pub fn affix(rationale_text: &str) -> String {
    if rationale_text.ends_with(DISCLAIMER_TEXT) {
        rationale_text.to_string()
    } else {
        format!("{rationale_text} {DISCLAIMER_TEXT}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_exact_text() {
        let affixed = affix("Your savings grew this period.");
        assert!(affixed.ends_with(DISCLAIMER_TEXT));
    }

    #[test]
    fn idempotent_on_repeated_affix() {
        let once = affix("Body text.");
        let twice = affix(&once);
        assert_eq!(once, twice);
    }
}
