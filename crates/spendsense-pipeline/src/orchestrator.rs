//! The pipeline orchestrator (spec §5, §6): wires C1 through C8 into one
//! `generate_recommendations` call per customer, plus the operator-override
//! and consent-mutation entry points.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use spendsense_catalog::{Catalog, CustomerContext, SpendSenseConfig};
use spendsense_core::{
    Account, AccountSubtype, ConsentScope, ConsentSnapshot, DecisionTrace, ItemRef, OperatorAction,
    OverrideAction, PersonaType, SpendSenseError, SpendSenseResult, WindowedPersonaAssignments,
    WindowedSignalBundles,
};
use spendsense_counterfactual::{generate_all, CardContext, CounterfactualInputs};
use spendsense_guardrails::{apply_guardrails, consent_allows_recommendations, Candidate};
use spendsense_persona::{classify_window, derive_fragility_signals, effective_primary};
use spendsense_query::{Datastore, QueryLayer};
use spendsense_rationale::{compose_rationale, LlmCollaborator, Tone};
use spendsense_signals::{detect_signals, DetectorContext};
use spendsense_trace::TraceStore;

use crate::consent_store::ConsentStore;
use crate::recommendation::RecommendationResult;

/// Hard ceiling on the LLM collaborator's budget regardless of
/// configuration (spec §5 "no external call may block the pipeline for
/// more than 10 seconds").
const LLM_HARD_TIMEOUT_MS: u64 = 10_000;

/// Per-persona rationale tone. Not part of any upstream crate's public
/// surface; the mapping is a pipeline-level editorial choice (see
/// DESIGN.md).
fn tone_for_persona(persona: PersonaType) -> Tone {
    match persona {
        PersonaType::HighUtilization => Tone::Empowering,
        PersonaType::FinancialFragility => Tone::Gentle,
        PersonaType::VariableIncomeBudgeter => Tone::Supportive,
        PersonaType::SubscriptionHeavy => Tone::Neutral,
        PersonaType::SavingsBuilder => Tone::Educational,
    }
}

/// Everything the orchestrator needs that outlives a single call: the
/// catalog and config are process-wide immutable state (spec §5), the
/// consent and trace stores are the two pieces of shared mutable state.
pub struct Pipeline<'a> {
    pub datastore: &'a dyn Datastore,
    pub catalog: &'a Catalog,
    pub config: &'a SpendSenseConfig,
    pub consent_store: &'a dyn ConsentStore,
    pub trace_store: &'a dyn TraceStore,
    pub collaborator: Option<&'a dyn LlmCollaborator>,
}

impl<'a> Pipeline<'a> {
    fn llm_timeout(&self) -> Duration {
        Duration::from_millis(self.config.llm.timeout_ms.min(LLM_HARD_TIMEOUT_MS))
    }

    /// Run the full C1-C8 flow for one customer (spec §6). Never returns
    /// `Err(ConsentMissing)`: a blocked consent short-circuits to an empty,
    /// but still traced, result (spec §6 "never raised to the caller").
    pub fn generate_recommendations(
        &self,
        customer_id: &str,
        now: NaiveDate,
    ) -> SpendSenseResult<RecommendationResult> {
        let consent = self.consent_store.status(customer_id)?;
        let timestamp = Utc::now();

        if !consent_allows_recommendations(&consent) {
            return self.write_consent_blocked_trace(customer_id, &consent, timestamp);
        }

        let query = QueryLayer::new(self.datastore);
        let accounts = query.accounts_for(customer_id)?;
        if accounts.is_empty() {
            return Err(SpendSenseError::NoData);
        }
        let liabilities = query.liabilities_for(customer_id)?;

        let (window_30, window_180) = QueryLayer::canonical_windows(now);
        let txns_30 = query.transactions_for(customer_id, window_30, false)?;
        let txns_180 = query.transactions_for(customer_id, window_180, false)?;

        let ctx_30 = DetectorContext {
            accounts: &accounts,
            liabilities: &liabilities,
            window: window_30,
            window_transactions: &txns_30,
            reference_180d_transactions: &txns_180,
        };
        let ctx_180 = DetectorContext {
            accounts: &accounts,
            liabilities: &liabilities,
            window: window_180,
            window_transactions: &txns_180,
            reference_180d_transactions: &txns_180,
        };
        let bundle_30 = detect_signals(&ctx_30);
        let bundle_180 = detect_signals(&ctx_180);

        let fragility_30 = derive_fragility_signals(&accounts, &txns_30, window_30);
        let fragility_180 = derive_fragility_signals(&accounts, &txns_180, window_180);

        let persona_30 = classify_window(customer_id, &bundle_30, &fragility_30, timestamp);
        let persona_180 = classify_window(customer_id, &bundle_180, &fragility_180, timestamp);

        let primary = effective_primary(&persona_30, &persona_180).clone();
        let persona_type = primary.persona_type;
        let tone = tone_for_persona(persona_type);

        let education_items = self.catalog.education_for(persona_type);
        let offer_items = self.catalog.offers_for(persona_type);

        let candidate_items: Vec<ItemRef> = education_items
            .iter()
            .map(|item| item.item_ref())
            .chain(offer_items.iter().map(|item| item.item_ref()))
            .collect();

        let mut candidates: Vec<Candidate> = Vec::with_capacity(education_items.len() + offer_items.len());
        for item in &education_items {
            let rationale = compose_rationale(
                &item.title,
                persona_type,
                &bundle_180,
                &primary.triggering_signals,
                tone,
                self.collaborator,
                self.llm_timeout(),
            );
            candidates.push(Candidate {
                item_ref: item.item_ref(),
                eligibility: None,
                harm_class: None,
                rationale,
                persona_confidence: primary.confidence,
                persona_priority_rank: persona_type.priority_rank(),
            });
        }
        for item in &offer_items {
            let rationale = compose_rationale(
                &item.title,
                persona_type,
                &bundle_180,
                &primary.triggering_signals,
                tone,
                self.collaborator,
                self.llm_timeout(),
            );
            candidates.push(Candidate {
                item_ref: item.item_ref(),
                eligibility: Some(item.eligibility.clone()),
                harm_class: item.harm_class,
                rationale,
                persona_confidence: primary.confidence,
                persona_priority_rank: persona_type.priority_rank(),
            });
        }

        let customer_context = CustomerContext {
            income_estimate: None,
            credit_score_band: None,
            existing_products: Vec::new(),
            utilization: bundle_180.credit.aggregate_utilization,
            state_of_residence: None,
        };

        let outcome = apply_guardrails(candidates, &customer_context, &self.config.selection_caps);

        let counterfactual_inputs = build_counterfactual_inputs(&accounts, &liabilities, &bundle_180, window_180.days);
        let counterfactuals = generate_all(&counterfactual_inputs);

        let mut trace = DecisionTrace {
            trace_id: String::new(),
            customer_id: customer_id.to_string(),
            timestamp,
            windows_analyzed: vec![window_30.days, window_180.days],
            signal_bundles: WindowedSignalBundles {
                d30: bundle_30,
                d180: bundle_180,
            },
            persona_assignments: WindowedPersonaAssignments {
                d30: persona_30.clone(),
                d180: persona_180.clone(),
            },
            candidate_items,
            filtered_items: outcome.filtered_items,
            final_education: outcome.final_education,
            final_offers: outcome.final_offers,
            rationales: outcome.rationales,
            counterfactuals,
            consent_snapshot: ConsentSnapshot {
                status: consent.status,
                scope: consent.scope,
            },
            operator_action: None,
            disclaimer_text: spendsense_guardrails::DISCLAIMER_TEXT.to_string(),
            incomplete: false,
        };

        let trace_id = self.trace_store.write(trace.clone())?;
        trace.trace_id = trace_id.clone();

        Ok(RecommendationResult {
            customer_id: customer_id.to_string(),
            persona_30d: persona_30,
            persona_180d: persona_180,
            education: trace.final_education,
            offers: trace.final_offers,
            rationales: trace.rationales,
            counterfactuals: trace.counterfactuals,
            trace_id,
            disclaimer: trace.disclaimer_text,
            incomplete: false,
        })
    }

    /// Layer 1 (consent gate) short-circuit: no detectors run, no catalog
    /// is consulted, but the refusal is still durably traced (spec §4.6,
    /// §6).
    fn write_consent_blocked_trace(
        &self,
        customer_id: &str,
        consent: &spendsense_core::Consent,
        timestamp: chrono::DateTime<Utc>,
    ) -> SpendSenseResult<RecommendationResult> {
        let fallback_persona = |window_days: u32| spendsense_core::PersonaAssignment {
            customer_id: customer_id.to_string(),
            window_days,
            primary: spendsense_core::PersonaCandidate {
                persona_type: PersonaType::SavingsBuilder,
                confidence: 0.0,
                triggering_signals: Vec::new(),
            },
            secondary: None,
            candidates: Vec::new(),
            assigned_at: timestamp,
            default_assignment: true,
        };

        let persona_30 = fallback_persona(30);
        let persona_180 = fallback_persona(180);

        let trace = DecisionTrace {
            trace_id: String::new(),
            customer_id: customer_id.to_string(),
            timestamp,
            windows_analyzed: vec![30, 180],
            signal_bundles: WindowedSignalBundles {
                d30: spendsense_core::SignalBundle::empty(30),
                d180: spendsense_core::SignalBundle::empty(180),
            },
            persona_assignments: WindowedPersonaAssignments {
                d30: persona_30.clone(),
                d180: persona_180.clone(),
            },
            candidate_items: Vec::new(),
            filtered_items: Vec::new(),
            final_education: Vec::new(),
            final_offers: Vec::new(),
            rationales: HashMap::new(),
            counterfactuals: Vec::new(),
            consent_snapshot: ConsentSnapshot {
                status: consent.status,
                scope: consent.scope,
            },
            operator_action: None,
            disclaimer_text: String::new(),
            incomplete: false,
        };

        let trace_id = self.trace_store.write(trace)?;

        Ok(RecommendationResult {
            customer_id: customer_id.to_string(),
            persona_30d: persona_30,
            persona_180d: persona_180,
            education: Vec::new(),
            offers: Vec::new(),
            rationales: HashMap::new(),
            counterfactuals: Vec::new(),
            trace_id,
            disclaimer: String::new(),
            incomplete: false,
        })
    }

    /// Process multiple customers concurrently (spec §5 "MAY be processed
    /// in parallel"). Each customer's run shares no mutable state with
    /// another's beyond the consent and trace stores, both of which are
    /// `Sync`.
    pub fn generate_recommendations_parallel(
        &self,
        customer_ids: &[String],
        now: NaiveDate,
    ) -> Vec<(String, SpendSenseResult<RecommendationResult>)> {
        use rayon::prelude::*;

        customer_ids
            .par_iter()
            .map(|customer_id| (customer_id.clone(), self.generate_recommendations(customer_id, now)))
            .collect()
    }

    /// Record an operator override of a prior trace (spec §4.8, §9). The
    /// override is persisted as a brand-new trace, never a mutation of the
    /// original.
    pub fn record_override(
        &self,
        trace_id: &str,
        operator_id: &str,
        action: OverrideAction,
        reason: &str,
        replacement: Option<ItemRef>,
    ) -> SpendSenseResult<String> {
        let original = self.trace_store.read(trace_id)?;
        let at = Utc::now();

        let mut override_trace = original;
        override_trace.timestamp = at;
        override_trace.operator_action = Some(OperatorAction {
            override_id: spendsense_trace::allocate_trace_id(operator_id, at),
            trace_id: trace_id.to_string(),
            operator_id: operator_id.to_string(),
            action,
            reason: reason.to_string(),
            replacement,
            at,
        });

        self.trace_store.record_override(override_trace)
    }

    pub fn grant_consent(&self, customer_id: &str, scope: ConsentScope) -> SpendSenseResult<()> {
        self.consent_store.grant(customer_id, scope, Utc::now())?;
        Ok(())
    }

    pub fn revoke_consent(&self, customer_id: &str, scope: Option<ConsentScope>) -> SpendSenseResult<()> {
        self.consent_store.revoke(customer_id, scope, Utc::now())?;
        Ok(())
    }
}

/// Derive the closed-form counterfactual inputs from already-computed
/// signals and raw account/liability data (spec §4.7). Uses the 180-day
/// bundle throughout: counterfactual scenarios are meant to reflect a
/// stable baseline, not a 30-day snapshot that may be mid-cycle.
fn build_counterfactual_inputs(
    accounts: &[Account],
    liabilities: &[spendsense_core::CreditCardLiability],
    bundle_180: &spendsense_core::SignalBundle,
    window_days: u32,
) -> CounterfactualInputs {
    let cards: Vec<CardContext> = liabilities
        .iter()
        .filter_map(|liability| {
            let account = accounts
                .iter()
                .find(|a| a.account_id == liability.account_id && a.subtype == AccountSubtype::CreditCard)?;
            let limit = account.balances.limit?;
            Some(CardContext {
                account_id: liability.account_id.clone(),
                current: account.balances.current,
                limit,
                purchase_apr_pct: liability.purchase_apr(),
                minimum_payment: liability.minimum_payment_amount,
            })
        })
        .collect();

    let liquid_balance: Decimal = accounts
        .iter()
        .filter(|a| a.subtype.is_savings_class())
        .map(|a| a.balances.current)
        .sum();

    let net_savings_rate = if window_days > 0 {
        Some(bundle_180.savings.net_inflow * Decimal::from(30) / Decimal::from(window_days))
    } else {
        None
    };

    CounterfactualInputs {
        cards,
        cash_flow_buffer_months: bundle_180.income.cash_flow_buffer_months,
        median_monthly_expense: bundle_180.savings.median_monthly_expense,
        net_savings_rate,
        savings_balance: Some(liquid_balance),
        liquid_balance: Some(liquid_balance),
        recurring_charges: bundle_180.subscriptions.recurring.clone(),
        extra_payment: None,
        window_days,
    }
}
