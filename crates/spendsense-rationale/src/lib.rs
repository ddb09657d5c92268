//! # spendsense-rationale
//!
//! Composes the plain-language "because" clause for each recommended item
//! (C5, spec §4.5). The deterministic template is always available; an
//! optional LLM collaborator may be asked for a tone-adjusted rewrite, but
//! its output is only accepted if it passes the same shaming-language check
//! the guardrail stack re-enforces downstream.

mod llm;
mod template;
mod tone;

pub use llm::{LlmCollaborator, NoCollaborator, RationalePrompt};
pub use tone::{contains_shaming_language, Tone};

use std::time::Duration;

use spendsense_core::{PersonaType, Rationale, SignalBundle, SignalRef};

/// Compose the rationale for one selected item. `triggering_signals` should
/// be the persona candidate's triggers (spec §4.3 `SignalRef`s), which also
/// double as the rationale's structural citations.
pub fn compose_rationale(
    item_title: &str,
    persona: PersonaType,
    bundle: &SignalBundle,
    triggering_signals: &[SignalRef],
    tone: Tone,
    collaborator: Option<&dyn LlmCollaborator>,
    llm_timeout: Duration,
) -> Rationale {
    let (template_text, citations) = template::render(persona, bundle, triggering_signals, tone);

    if let Some(collaborator) = collaborator {
        let prompt = RationalePrompt {
            tone,
            item_title: item_title.to_string(),
            allowed_values: citations.iter().map(|c| (c.field_path.clone(), c.value.clone())).collect(),
        };
        if let Some(candidate_text) = collaborator.compose(&prompt, llm_timeout) {
            if !candidate_text.trim().is_empty() && contains_shaming_language(&candidate_text).is_none() {
                return Rationale {
                    text: candidate_text,
                    citations,
                    used_fallback_template: false,
                };
            }
            tracing::warn!(item_title, "LLM rationale rejected, falling back to template");
        } else {
            tracing::warn!(item_title, "LLM collaborator unavailable or timed out, using template");
        }
    }

    Rationale {
        text: template_text,
        citations,
        used_fallback_template: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendsense_core::{CreditSignals, IncomeSignals, SavingsSignals, SubscriptionSignals};

    fn empty_bundle() -> SignalBundle {
        SignalBundle {
            window_days: 30,
            subscriptions: SubscriptionSignals::default(),
            credit: CreditSignals::default(),
            savings: SavingsSignals::default(),
            income: IncomeSignals::default(),
        }
    }

    struct AlwaysShaming;
    impl LlmCollaborator for AlwaysShaming {
        fn compose(&self, _prompt: &RationalePrompt, _timeout: Duration) -> Option<String> {
            Some("Stop overspending on takeout.".to_string())
        }
    }

    struct AlwaysClean;
    impl LlmCollaborator for AlwaysClean {
        fn compose(&self, _prompt: &RationalePrompt, _timeout: Duration) -> Option<String> {
            Some("Your savings grew steadily this period.".to_string())
        }
    }

    #[test]
    fn no_collaborator_uses_template() {
        let bundle = empty_bundle();
        let rationale = compose_rationale(
            "item",
            PersonaType::SavingsBuilder,
            &bundle,
            &[],
            Tone::Neutral,
            None,
            Duration::from_millis(100),
        );
        assert!(rationale.used_fallback_template);
        assert!(!rationale.citations.is_empty());
    }

    #[test]
    fn shaming_llm_output_falls_back_to_template() {
        let bundle = empty_bundle();
        let collaborator = AlwaysShaming;
        let rationale = compose_rationale(
            "item",
            PersonaType::SavingsBuilder,
            &bundle,
            &[],
            Tone::Neutral,
            Some(&collaborator),
            Duration::from_millis(100),
        );
        assert!(rationale.used_fallback_template);
    }

    #[test]
    fn clean_llm_output_is_accepted() {
        let bundle = empty_bundle();
        let collaborator = AlwaysClean;
        let rationale = compose_rationale(
            "item",
            PersonaType::SavingsBuilder,
            &bundle,
            &[],
            Tone::Neutral,
            Some(&collaborator),
            Duration::from_millis(100),
        );
        assert!(!rationale.used_fallback_template);
        assert_eq!(rationale.text, "Your savings grew steadily this period.");
    }
}
