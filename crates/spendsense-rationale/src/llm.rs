//! The optional LLM collaborator (spec §4.5). It is an enhancement over the
//! deterministic template, never a dependency: every call site must still
//! work with `llm = None`, and any error or timeout falls back to the
//! template.

use std::time::Duration;

/// A tightly-scoped prompt: the collaborator sees only the chosen tone, the
/// item being explained, and the exact citation values it is allowed to
/// reference. It never receives raw account data.
#[derive(Debug, Clone)]
pub struct RationalePrompt {
    pub tone: crate::tone::Tone,
    pub item_title: String,
    pub allowed_values: Vec<(String, String)>,
}

/// Implemented by an adapter to an external text-generation service.
/// `compose` must itself respect `timeout` and return `None` rather than
/// block past it; the caller does not additionally enforce a deadline.
pub trait LlmCollaborator: Send + Sync {
    fn compose(&self, prompt: &RationalePrompt, timeout: Duration) -> Option<String>;
}

/// A collaborator that always declines, used when no LLM is configured and
/// in tests. Every call falls straight through to the deterministic
/// template.
#[derive(Debug, Default)]
pub struct NoCollaborator;

impl LlmCollaborator for NoCollaborator {
    fn compose(&self, _prompt: &RationalePrompt, _timeout: Duration) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_collaborator_always_declines() {
        let collaborator = NoCollaborator;
        let prompt = RationalePrompt {
            tone: crate::tone::Tone::Neutral,
            item_title: "test".into(),
            allowed_values: vec![],
        };
        assert!(collaborator.compose(&prompt, Duration::from_millis(100)).is_none());
    }
}
